//! Source-located diagnostics for record files
//!
//! Parse failures in YAML and CSV record files are reported with the
//! offending line highlighted, using miette's source spans.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A parse error pointing at a location inside a record file
#[derive(Debug, Error, Diagnostic)]
#[error("{kind} error in {filename}: {message}")]
#[diagnostic(code(qcf::records::syntax))]
pub struct SourceError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    kind: &'static str,
    filename: String,
    message: String,
}

impl SourceError {
    /// Create an error from a serde_yml failure
    pub fn from_yaml(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));
        let message = err.to_string();
        let help = yaml_help(&message);
        Self::at_location("YAML", message, source, filename, line, column, help)
    }

    /// Create an error from a csv failure, pointing at the start of the bad row
    pub fn from_csv(err: &csv::Error, source: &str, filename: &str) -> Self {
        let line = err
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(1);
        let message = err.to_string();
        let help = csv_help(&message);
        Self::at_location("CSV", message, source, filename, line, 1, help)
    }

    pub fn at_location(
        kind: &'static str,
        message: impl Into<String>,
        source: &str,
        filename: &str,
        line: usize,
        column: usize,
        help: Option<String>,
    ) -> Self {
        let offset = line_col_to_offset(source, line, column);
        let len = line_len_from(source, offset).max(1);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(len)),
            help,
            kind,
            filename: filename.to_string(),
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the highlighted location
    pub fn offset(&self) -> usize {
        self.span.offset()
    }
}

/// Convert a 1-based line/column to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>()
        .min(source.len());

    let rest = &source[line_start..];
    let line_text = rest.split('\n').next().unwrap_or("");
    let column_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());

    line_start + column_offset
}

/// Length of the remainder of the line starting at `offset`
fn line_len_from(source: &str, offset: usize) -> usize {
    source
        .get(offset..)
        .and_then(|rest| rest.split('\n').next())
        .map(str::len)
        .unwrap_or(0)
}

fn yaml_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("tab") {
        return Some("YAML requires spaces for indentation, not tabs.".to_string());
    }
    if msg_lower.contains("missing field") {
        return Some("Every record needs at least `date`, `station` and `inspected`.".to_string());
    }
    if msg_lower.contains("premature end of input") || msg_lower.contains("input contains invalid characters") {
        return Some("Dates are written as YYYY-MM-DD.".to_string());
    }
    if msg_lower.contains("invalid type") && msg_lower.contains("sequence") {
        return Some("The file should contain a list of records, one `- date: ...` entry per record.".to_string());
    }
    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    None
}

fn csv_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("missing field") {
        return Some("The header row needs at least: date,station,inspected".to_string());
    }
    if msg_lower.contains("found record with") {
        return Some("Every row needs the same number of columns as the header.".to_string());
    }
    if msg_lower.contains("invalid digit") {
        return Some("Quantity columns (inspected, defects) take whole numbers.".to_string());
    }
    if msg_lower.contains("input contains invalid characters") || msg_lower.contains("premature end") {
        return Some("Dates are written as YYYY-MM-DD.".to_string());
    }

    None
}
