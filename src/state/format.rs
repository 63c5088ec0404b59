//! Count formatting - pure functions of the displayed value.
//!
//! Plain counts are grouped with the locale's separator and grouping rule
//! (`1,247` in `en`, `1.247` in `de`, `12,34,567` in `en_IN`).

use num_format::{Locale, ToFormattedString};

/// How a counter renders its value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CountFormat {
    /// Locale-grouped integer (`1,247`).
    #[default]
    Count,
    /// Integer with a `%` suffix (`99%`).
    Percentage,
}

/// Render `value` with `en` grouping.
pub fn format_count(value: u64, format: CountFormat) -> String {
    format_count_with(value, format, &Locale::en)
}

/// Render `value`, grouping plain counts the way `locale` does.
pub fn format_count_with(value: u64, format: CountFormat, locale: &Locale) -> String {
    match format {
        CountFormat::Percentage => format!("{value}%"),
        CountFormat::Count => value.to_formatted_string(locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_suffix() {
        assert_eq!(format_count(99, CountFormat::Percentage), "99%");
        assert_eq!(format_count(0, CountFormat::Percentage), "0%");
    }

    #[test]
    fn test_count_grouping() {
        assert_eq!(format_count(1247, CountFormat::Count), "1,247");
        assert_eq!(format_count(15, CountFormat::Count), "15");
        assert_eq!(format_count(0, CountFormat::Count), "0");
        assert_eq!(format_count(100_000, CountFormat::Count), "100,000");
        assert_eq!(format_count(1_234_567, CountFormat::Count), "1,234,567");
    }

    #[test]
    fn test_locale_separator() {
        assert_eq!(format_count_with(1247, CountFormat::Count, &Locale::de), "1.247");
        // Percentages are never grouped
        assert_eq!(format_count_with(1000, CountFormat::Percentage, &Locale::de), "1000%");
    }

    #[test]
    fn test_locale_grouping_rule() {
        assert_eq!(format_count_with(1_234_567, CountFormat::Count, &Locale::en_IN), "12,34,567");
    }
}
