use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Which half of the draw a digit or sangam belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Open,
    Close,
}

/// Candidate family an analyzer reads out of each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    /// Open and close digits pooled together (two observations per record)
    Digit,
    Jodi,
    OpenSangam,
    CloseSangam,
}

/// One drawn day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub open_digit: u8,
    pub close_digit: u8,
    /// Two-character, zero-padded
    pub jodi: String,
    pub open_sangam: String,
    pub close_sangam: String,
}

impl Record {
    /// Build a validated record. The jodi may come from the source directly, so it
    /// is checked for shape only and not recomputed from the digits.
    pub fn new(
        date: NaiveDate,
        open_digit: u8,
        close_digit: u8,
        jodi: impl Into<String>,
        open_sangam: impl Into<String>,
        close_sangam: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let jodi = jodi.into();
        let open_sangam = open_sangam.into();
        let close_sangam = close_sangam.into();

        check_digit(Side::Open, open_digit)?;
        check_digit(Side::Close, close_digit)?;
        if jodi.len() != 2 || !jodi.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RecordError::BadJodi(jodi));
        }
        check_sangam(Side::Open, &open_sangam, open_digit)?;
        check_sangam(Side::Close, &close_sangam, close_digit)?;

        Ok(Self {
            date,
            open_digit,
            close_digit,
            jodi,
            open_sangam,
            close_sangam,
        })
    }

    /// Values this record contributes for `field`.
    pub fn values(&self, field: Field) -> Vec<String> {
        match field {
            Field::Digit => vec![self.open_digit.to_string(), self.close_digit.to_string()],
            Field::Jodi => vec![self.jodi.clone()],
            Field::OpenSangam => vec![self.open_sangam.clone()],
            Field::CloseSangam => vec![self.close_sangam.clone()],
        }
    }
}

/// Left-pad a jodi to two characters ("7" -> "07").
pub fn normalize_jodi(raw: &str) -> String {
    format!("{:0>2}", raw.trim())
}

fn check_digit(side: Side, value: u8) -> Result<(), RecordError> {
    if value > 9 {
        return Err(RecordError::DigitOutOfRange { side, value });
    }
    Ok(())
}

fn check_sangam(side: Side, code: &str, digit: u8) -> Result<(), RecordError> {
    let first = code.chars().next();
    if code.chars().count() != 3 {
        return Err(RecordError::BadSangamLength {
            side,
            code: code.to_string(),
        });
    }
    if first.and_then(|c| c.to_digit(10)) != Some(u32::from(digit)) {
        return Err(RecordError::SangamDigitMismatch {
            side,
            code: code.to_string(),
            digit,
        });
    }
    Ok(())
}
