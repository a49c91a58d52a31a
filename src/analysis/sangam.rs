use serde::{Deserialize, Serialize};

use crate::analysis::absence::AbsenceAnalyzer;
use crate::analysis::frequency::FrequencyAnalyzer;
use crate::config::analysis::SangamSettings;
use crate::domain::{Field, Side};
use crate::models::{HistorySlice, SignalMap};

/// Hot and due sangam codes for each side of the draw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SangamSignals {
    pub hot_open: SignalMap,
    pub hot_close: SignalMap,
    pub due_open: SignalMap,
    pub due_close: SignalMap,
}

pub struct SangamAnalyzer<'a> {
    frequency: FrequencyAnalyzer<'a>,
    absence: AbsenceAnalyzer<'a>,
}

impl<'a> SangamAnalyzer<'a> {
    pub fn new(slice: HistorySlice<'a>) -> Self {
        Self {
            frequency: FrequencyAnalyzer::new(slice),
            absence: AbsenceAnalyzer::new(slice),
        }
    }

    fn field(side: Side) -> Field {
        match side {
            Side::Open => Field::OpenSangam,
            Side::Close => Field::CloseSangam,
        }
    }

    pub fn hot(&self, side: Side, lookback_days: i64, top_n: usize) -> SignalMap {
        self.frequency.hot(Self::field(side), lookback_days, top_n)
    }

    pub fn due(&self, side: Side, lookback_days: i64, threshold_days: i64) -> SignalMap {
        self.absence
            .due(Self::field(side), lookback_days, threshold_days)
    }

    pub fn signals(&self, settings: &SangamSettings) -> SangamSignals {
        SangamSignals {
            hot_open: self.hot(Side::Open, settings.hot_lookback_days, settings.hot_top_n),
            hot_close: self.hot(Side::Close, settings.hot_lookback_days, settings.hot_top_n),
            due_open: self.due(
                Side::Open,
                settings.due_lookback_days,
                settings.due_threshold_days,
            ),
            due_close: self.due(
                Side::Close,
                settings.due_lookback_days,
                settings.due_threshold_days,
            ),
        }
    }
}
