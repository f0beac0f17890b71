use chrono_tz::Tz;

/// Abbreviations accepted at registration, in the order they are offered back.
pub const TIMEZONE_MAPPING: [(&str, Tz); 5] = [
    ("IST", Tz::Asia__Kolkata),
    ("CDT", Tz::America__Chicago),
    ("PDT", Tz::America__Los_Angeles),
    ("PST", Tz::America__Los_Angeles),
    ("EST", Tz::America__New_York),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimezoneError {
    #[error("Unknown timezone {input}, expected one of: {}", .valid.join(", "))]
    UnknownTimezone { input: String, valid: Vec<String> },
}

pub fn valid_abbreviations() -> Vec<String> {
    TIMEZONE_MAPPING.iter().map(|(abbrev, _)| abbrev.to_string()).collect()
}

pub fn resolve(abbrev: &str) -> Result<Tz, TimezoneError> {
    let key = abbrev.trim().to_uppercase();

    TIMEZONE_MAPPING
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, tz)| *tz)
        .ok_or_else(|| {
            warn!("Rejected unknown timezone abbreviation: {}", abbrev);
            TimezoneError::UnknownTimezone {
                input: abbrev.to_string(),
                valid: valid_abbreviations(),
            }
        })
}
