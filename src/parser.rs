//! CSV parser for the survey spreadsheet export.
//!
//! The export is loosely formatted, so rows that cannot become a valid
//! [`SurveyRecord`] are dropped instead of failing the whole load.

use tracing::debug;

use crate::record::SurveyRecord;

/// Field separator used by the spreadsheet export.
pub const DELIMITER: char = ',';

/// Parses the raw export into records, in input order.
///
/// The first line is the header and is skipped without inspection. Blank
/// lines, rows with too few columns and rows with invalid ratings are
/// silently omitted, so this never fails.
pub fn parse_survey_csv(raw: &str) -> Vec<SurveyRecord> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for line in raw.split('\n').skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_quoted_line(line, DELIMITER);
        match SurveyRecord::from_fields(&fields) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    debug!(kept = records.len(), dropped, "Survey CSV parsed");
    records
}

/// Splits one line on `delimiter`, honouring double-quoted spans.
///
/// A `"` toggles the quoted state and is not copied. The delimiter only ends
/// a field outside quotes. Each field is trimmed.
pub fn split_quoted_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_string());

    fields
}
