use chrono::NaiveDate;

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    // Accepted when reading history files, tried in order
    pub const INPUT_DATE_FORMATS: [&str; 3] = [Self::STANDARD_TIME_FORMAT, "%d/%m/%Y", "%d-%m-%Y"];

    /// Parse a date in any of the accepted input formats.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        Self::INPUT_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(Self::STANDARD_TIME_FORMAT).to_string()
    }
}
