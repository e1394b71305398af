use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DISPLAY_FORMAT: &str = "%b %-d, %Y %H:%M";

/// Parses the timestamp shapes the analysis engine emits. Offsets are
/// normalised to UTC so values from different zones compare correctly.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Human-readable timestamp; unparseable input is shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_naive_forms() {
        let a = parse_timestamp("2024-03-12T09:15:00Z").expect("rfc3339");
        let b = parse_timestamp("2024-03-12 09:15:00").expect("naive");
        let c = parse_timestamp("2024-03-12T11:15:00+02:00").expect("offset");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(parse_timestamp("2024-03-12").is_some());
    }

    #[test]
    fn invalid_dates_fall_back_to_raw_text() {
        assert_eq!(parse_timestamp("last tuesday"), None);
        assert_eq!(format_timestamp("last tuesday"), "last tuesday");
        assert_eq!(format_timestamp(""), "");
    }

    #[test]
    fn formats_for_display() {
        assert_eq!(format_timestamp("2024-03-05T09:15:00Z"), "Mar 5, 2024 09:15");
    }
}
