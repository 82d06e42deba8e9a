//! Date-key extraction for the trend series.
//!
//! Spreadsheet timestamps are locale-formatted strings (`19/10/2026, 14:30:00`
//! or `2024-01-01 10:00`), not ISO dates, so grouping goes through this
//! extractor rather than a real date parser.

/// Maps a raw timestamp string to the key its record is grouped under.
pub trait DateKeyExtractor: Send + Sync {
    fn date_key<'a>(&self, timestamp: &'a str) -> &'a str;
}

/// Takes everything before the first comma, or before the first space when
/// there is no comma. A timestamp with neither is its own key.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstSeparator;

impl DateKeyExtractor for FirstSeparator {
    fn date_key<'a>(&self, timestamp: &'a str) -> &'a str {
        let timestamp = timestamp.trim();
        let key = match timestamp.split_once(',') {
            Some((date, _)) => date,
            None => timestamp
                .split_once(' ')
                .map_or(timestamp, |(date, _)| date),
        };
        key.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_locale_timestamp() {
        assert_eq!(FirstSeparator.date_key("19/10/2026, 14:30:00"), "19/10/2026");
    }

    #[test]
    fn test_space_separated_timestamp() {
        assert_eq!(FirstSeparator.date_key("2024-01-01 10:00"), "2024-01-01");
    }

    #[test]
    fn test_comma_wins_over_space() {
        assert_eq!(FirstSeparator.date_key("Jan 1 2024, 10:00"), "Jan 1 2024");
    }

    #[test]
    fn test_no_separator() {
        assert_eq!(FirstSeparator.date_key("2024-01-01"), "2024-01-01");
        assert_eq!(FirstSeparator.date_key(""), "");
    }
}
