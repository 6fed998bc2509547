/// Utilities for timestamp display in tables

/// RFC 3339 timestamp to `YYYY-MM-DD HH:MM:SS`, dropping fraction and offset.
/// Example: "2026-03-15T14:02:26.123+00:00" -> "2026-03-15 14:02:26"
/// Anything that does not look like a timestamp is returned unchanged.
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let time = time_part
            .split(['.', 'Z', '+', '-'])
            .next()
            .unwrap_or(time_part);
        if date_part.len() == 10 && !time.is_empty() {
            return format!("{} {}", date_part, time);
        }
    }
    datetime_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2026-03-15T14:02:26.123456+00:00"),
            "2026-03-15 14:02:26"
        );
        assert_eq!(format_datetime("2026-03-15T14:02:26Z"), "2026-03-15 14:02:26");
        assert_eq!(format_datetime("2026-03-15T14:02:26-05:00"), "2026-03-15 14:02:26");
        assert_eq!(format_datetime("invalid"), "invalid");
    }
}
