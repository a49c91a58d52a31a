//! Secondary draw patterns shown alongside the picks: digit sums, open/close
//! separation, mirror jodis, weekday breakdowns and repeat-cycle gaps.
//!
//! None of these feed the fusion score.

use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::config::PatternSettings;
use crate::domain::{Field, Record};
use crate::models::{HistorySlice, SignalMap};

/// Digit sum folded to one digit (`"78"` -> 5). None for non-digit input.
pub fn digit_sum(value: &str) -> Option<u32> {
    if value.is_empty() {
        return None;
    }
    let total = value
        .chars()
        .map(|c| c.to_digit(10))
        .sum::<Option<u32>>()?;
    Some(total % 10)
}

/// Mirror of a jodi: each digit shifted by five (`"27"` -> `"72"`, `"05"` -> `"50"`).
pub fn mirror_jodi(jodi: &str) -> Option<String> {
    if jodi.len() != 2 {
        return None;
    }
    jodi.chars()
        .map(|c| c.to_digit(10).map(|d| char::from(b'0' + ((d + 5) % 10) as u8)))
        .collect()
}

/// Draw count and jodi variety for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayBreakdown {
    pub weekday: Weekday,
    pub draws: usize,
    pub distinct_jodis: usize,
}

/// Everything the pattern analyzer contributes to the daily report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Folded jodi digit sum -> count
    pub jodi_sums: SignalMap,
    /// |open - close| -> count
    pub separations: SignalMap,
    /// Jodis whose mirror also appeared in the window -> own count
    pub mirrored_jodis: SignalMap,
    /// Weekday of the next draw day
    pub next_weekday: Option<Weekday>,
    /// Jodi counts on past draws that fell on `next_weekday`
    pub next_weekday_jodis: SignalMap,
    /// Monday first; weekdays without draws are left out
    pub weekday_breakdown: Vec<WeekdayBreakdown>,
}

fn count_keys<I: IntoIterator<Item = String>>(values: I) -> SignalMap {
    values
        .into_iter()
        .counts()
        .into_iter()
        .map(|(k, n)| (k, n as u32))
        .collect()
}

pub struct PatternAnalyzer<'a> {
    slice: HistorySlice<'a>,
}

impl<'a> PatternAnalyzer<'a> {
    pub fn new(slice: HistorySlice<'a>) -> Self {
        Self { slice }
    }

    fn window(&self, lookback_days: i64) -> &'a [Record] {
        self.slice.trailing_window(lookback_days).records()
    }

    pub fn jodi_sums(&self, lookback_days: i64) -> SignalMap {
        count_keys(
            self.window(lookback_days)
                .iter()
                .filter_map(|r| digit_sum(&r.jodi))
                .map(|s| s.to_string()),
        )
    }

    pub fn separations(&self, lookback_days: i64) -> SignalMap {
        count_keys(
            self.window(lookback_days)
                .iter()
                .map(|r| r.open_digit.abs_diff(r.close_digit).to_string()),
        )
    }

    pub fn mirrored_jodis(&self, lookback_days: i64) -> SignalMap {
        let counts = count_keys(self.window(lookback_days).iter().map(|r| r.jodi.clone()));
        counts
            .iter()
            .filter(|(jodi, _)| mirror_jodi(jodi).is_some_and(|m| counts.contains_key(&m)))
            .map(|(jodi, n)| (jodi.clone(), *n))
            .collect()
    }

    /// Jodi counts on draws that fell on `weekday`.
    pub fn weekday_jodis(&self, weekday: Weekday, lookback_days: i64) -> SignalMap {
        count_keys(
            self.window(lookback_days)
                .iter()
                .filter(|r| r.date.weekday() == weekday)
                .map(|r| r.jodi.clone()),
        )
    }

    pub fn weekday_breakdown(&self, lookback_days: i64) -> Vec<WeekdayBreakdown> {
        self.window(lookback_days)
            .iter()
            .into_group_map_by(|r| r.date.weekday().num_days_from_monday())
            .into_iter()
            .sorted_by_key(|(day, _)| *day)
            .map(|(_, records)| WeekdayBreakdown {
                weekday: records[0].date.weekday(),
                draws: records.len(),
                distinct_jodis: records.iter().map(|r| &r.jodi).unique().count(),
            })
            .collect()
    }

    /// Calendar days between successive appearances of `value` over the whole
    /// slice, oldest first. Fewer than two appearances give no gaps.
    pub fn cycle_gaps(&self, field: Field, value: &str) -> Vec<i64> {
        let dates: Vec<NaiveDate> = self
            .slice
            .observations(field)
            .into_iter()
            .filter(|(_, v)| v == value)
            .map(|(date, _)| date)
            .dedup()
            .collect();
        dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .collect()
    }

    /// Report view, with the weekday bias taken for `next_draw`.
    pub fn summary(&self, settings: &PatternSettings, next_draw: Option<NaiveDate>) -> PatternSummary {
        let next_weekday = next_draw.map(|d| d.weekday());
        PatternSummary {
            jodi_sums: self.jodi_sums(settings.lookback_days),
            separations: self.separations(settings.lookback_days),
            mirrored_jodis: self.mirrored_jodis(settings.lookback_days),
            next_weekday,
            next_weekday_jodis: next_weekday
                .map(|w| self.weekday_jodis(w, settings.weekday_lookback_days))
                .unwrap_or_default(),
            weekday_breakdown: self.weekday_breakdown(settings.weekday_lookback_days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{first_monday, history, history_on};
    use chrono::Duration;

    #[test]
    fn test_digit_sum_folds_to_one_digit() {
        assert_eq!(digit_sum("78"), Some(5));
        assert_eq!(digit_sum("05"), Some(5));
        assert_eq!(digit_sum("00"), Some(0));
        assert_eq!(digit_sum("1x"), None);
        assert_eq!(digit_sum(""), None);
    }

    #[test]
    fn test_mirror_shifts_each_digit_by_five() {
        assert_eq!(mirror_jodi("27").as_deref(), Some("72"));
        assert_eq!(mirror_jodi("05").as_deref(), Some("50"));
        assert_eq!(mirror_jodi("99").as_deref(), Some("44"));
        assert_eq!(mirror_jodi("9"), None);
    }

    #[test]
    fn test_sums_and_separations() {
        let store = history(&["78", "16", "91", "44", "35"]);
        let patterns = PatternAnalyzer::new(store.slice());

        let sums = patterns.jodi_sums(30);
        assert_eq!(sums.get("5"), Some(&1));
        assert_eq!(sums.get("7"), Some(&1));
        assert_eq!(sums.get("0"), Some(&1));
        assert_eq!(sums.get("8"), Some(&2));
        assert_eq!(sums.values().sum::<u32>(), 5);

        let separations = patterns.separations(30);
        for (gap, jodi) in [("1", "78"), ("5", "16"), ("8", "91"), ("0", "44"), ("2", "35")] {
            assert_eq!(separations.get(gap), Some(&1), "separation of {}", jodi);
        }
    }

    #[test]
    fn test_mirrored_jodis_need_both_sides_in_window() {
        let store = history(&["27", "72", "27", "13", "99"]);
        let mirrored = PatternAnalyzer::new(store.slice()).mirrored_jodis(30);
        assert_eq!(mirrored.get("27"), Some(&2));
        assert_eq!(mirrored.get("72"), Some(&1));
        assert!(!mirrored.contains_key("13"));
        assert!(!mirrored.contains_key("99"));
    }

    #[test]
    fn test_weekday_breakdown_and_bias() {
        let monday = first_monday();
        let store = history_on(&[
            (monday, "12"),
            (monday + Duration::days(1), "34"),
            (monday + Duration::days(7), "12"),
            (monday + Duration::days(14), "56"),
        ]);
        let patterns = PatternAnalyzer::new(store.slice());

        let breakdown = patterns.weekday_breakdown(90);
        assert_eq!(
            breakdown,
            vec![
                WeekdayBreakdown { weekday: Weekday::Mon, draws: 3, distinct_jodis: 2 },
                WeekdayBreakdown { weekday: Weekday::Tue, draws: 1, distinct_jodis: 1 },
            ]
        );

        let mondays = patterns.weekday_jodis(Weekday::Mon, 90);
        assert_eq!(mondays.get("12"), Some(&2));
        assert_eq!(mondays.get("56"), Some(&1));
        assert!(!mondays.contains_key("34"));
    }

    #[test]
    fn test_cycle_gaps_between_appearances() {
        let d = first_monday();
        let store = history_on(&[
            (d, "12"),
            (d + Duration::days(2), "34"),
            (d + Duration::days(3), "12"),
            (d + Duration::days(10), "12"),
        ]);
        let patterns = PatternAnalyzer::new(store.slice());

        assert_eq!(patterns.cycle_gaps(Field::Jodi, "12"), vec![3, 7]);
        assert!(patterns.cycle_gaps(Field::Jodi, "34").is_empty());
        assert_eq!(patterns.cycle_gaps(Field::Digit, "1"), vec![3, 7]);

        // "11" puts the digit on both sides of one draw; that day counts once
        let store = history(&["11", "23", "11"]);
        let patterns = PatternAnalyzer::new(store.slice());
        assert_eq!(patterns.cycle_gaps(Field::Digit, "1"), vec![2]);
    }

    #[test]
    fn test_summary_of_empty_slice_is_empty() {
        let store = history(&[]);
        let summary = PatternAnalyzer::new(store.slice())
            .summary(&PatternSettings::default(), None);
        assert_eq!(summary, PatternSummary::default());
    }
}
