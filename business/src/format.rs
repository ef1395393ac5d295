//! Display helpers for dates and Brazilian phone numbers.

use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Formats a timestamp as `dd/MM/yyyy HH:mm`.
///
/// RFC 3339 timestamps are shown in the local timezone. `YYYY-MM-DD HH:MM:SS`
/// is already local and taken as is. Anything else is returned unchanged.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return date.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return date.format(DISPLAY_FORMAT).to_string();
    }
    value.to_owned()
}

/// Like [`format_date`], with `-` for a missing or empty value.
pub fn format_optional_date(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => format_date(value),
        _ => "-".to_owned(),
    }
}

/// Applies the `(XX) XXXXX-XXXX` mask while the number is typed.
pub fn format_phone_mask(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).take(11).collect();
    let len = digits.len();

    match len {
        0 => String::new(),
        1..=2 => format!("({digits}"),
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        7..=10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(value: &str) -> String {
        DateTime::parse_from_rfc3339(value)
            .expect("valid timestamp")
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string()
    }

    #[test]
    fn rfc3339_is_shown_in_local_time() {
        assert_eq!(format_date("2024-03-05T14:07:00Z"), local("2024-03-05T14:07:00Z"));
        assert_eq!(
            format_date("2024-12-31T23:59:59.000000Z"),
            local("2024-12-31T23:59:59Z")
        );
    }

    #[test]
    fn same_instant_renders_the_same_whatever_the_offset() {
        assert_eq!(
            format_date("2024-03-05T14:07:00Z"),
            format_date("2024-03-05T11:07:00-03:00")
        );
        assert_ne!(
            format_date("2024-03-05T14:07:00Z"),
            format_date("2024-03-05T14:07:00-03:00")
        );
    }

    #[test]
    fn sql_timestamps_are_accepted() {
        assert_eq!(format_date("2023-01-09 08:30:12"), "09/01/2023 08:30");
    }

    #[test]
    fn unparseable_dates_are_returned() {
        assert_eq!(format_date("ontem"), "ontem");
        assert_eq!(format_optional_date(None), "-");
        assert_eq!(format_optional_date(Some("")), "-");
    }

    #[test]
    fn phone_mask_grows_with_input() {
        assert_eq!(format_phone_mask(""), "");
        assert_eq!(format_phone_mask("6"), "(6");
        assert_eq!(format_phone_mask("61"), "(61");
        assert_eq!(format_phone_mask("6199"), "(61) 99");
        assert_eq!(format_phone_mask("613322"), "(61) 3322");
        assert_eq!(format_phone_mask("6133224455"), "(61) 3322-4455");
        assert_eq!(format_phone_mask("61988887777"), "(61) 98888-7777");
    }

    #[test]
    fn phone_mask_strips_and_truncates() {
        assert_eq!(format_phone_mask("(61) 98888-77779999"), "(61) 98888-7777");
        assert_eq!(format_phone_mask("abc"), "");
        // Re-masking a masked value is stable.
        assert_eq!(format_phone_mask("(61) 3322-4455"), "(61) 3322-4455");
    }
}
