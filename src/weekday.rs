use chrono::NaiveDate;

/// Placeholder title used when a date string does not parse.
pub const UNKNOWN_DAY: &str = "Unknown Day";

/// Year assumed for the year-less dates in the input table.
pub const DEFAULT_ASSUMED_YEAR: i32 = 2024;

/// Derives the full weekday name ("Monday", ...) from a year-less date
/// string such as "3 June", interpreted against `year`.
///
/// Exactly one input shape is accepted: `<day> <month name>`. Anything
/// else, including calendar-invalid dates like "31 February", yields
/// [`UNKNOWN_DAY`]. This function never fails; downstream title rendering
/// depends on it being total.
pub fn resolve_weekday(date: &str, year: i32) -> String {
    match NaiveDate::parse_from_str(&format!("{date} {year}"), "%d %B %Y") {
        Ok(parsed) => parsed.format("%A").to_string(),
        Err(_) => UNKNOWN_DAY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_full_weekday_names() {
        assert_eq!(resolve_weekday("3 June", 2024), "Monday");
        assert_eq!(resolve_weekday("5 June", 2024), "Wednesday");
        assert_eq!(resolve_weekday("10 June", 2024), "Monday");
    }

    #[test]
    fn year_changes_the_answer() {
        assert_eq!(resolve_weekday("3 June", 2024), "Monday");
        assert_eq!(resolve_weekday("3 June", 2025), "Tuesday");
    }

    #[test]
    fn calendar_invalid_dates_degrade_to_placeholder() {
        assert_eq!(resolve_weekday("31 February", 2024), UNKNOWN_DAY);
        assert_eq!(resolve_weekday("29 February", 2023), UNKNOWN_DAY);
        // 2024 is a leap year.
        assert_eq!(resolve_weekday("29 February", 2024), "Thursday");
    }

    #[test]
    fn malformed_strings_degrade_to_placeholder() {
        assert_eq!(resolve_weekday("not a date", 2024), UNKNOWN_DAY);
        assert_eq!(resolve_weekday("", 2024), UNKNOWN_DAY);
        assert_eq!(resolve_weekday("June 3", 2024), UNKNOWN_DAY);
        assert_eq!(resolve_weekday("2024-06-03", 2024), UNKNOWN_DAY);
    }

    #[test]
    fn resolution_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(resolve_weekday("3 June", 2024), "Monday");
            assert_eq!(resolve_weekday("31 February", 2024), UNKNOWN_DAY);
        }
    }
}
