//! Rendering of command results in the selected output format
//!
//! Commands build a [`Rows`] for the human and delimited formats and hand
//! over a serializable value for JSON and YAML, so both views come from the
//! same data.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::escape_csv;
use crate::cli::OutputFormat;

/// Header plus string cells for tabular output
#[derive(Debug, Clone, Default)]
pub struct Rows {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Rows {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn table(&self, style: TableStyle) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }
        let mut table = builder.build();
        match style {
            TableStyle::Rounded => table.with(Style::rounded()),
            TableStyle::Markdown => table.with(Style::markdown()),
        };
        format!("{}\n", table)
    }

    fn delimited(&self, delimiter: char, escape: fn(&str) -> String) -> String {
        let mut out = String::new();
        for line in std::iter::once(&self.headers).chain(self.rows.iter()) {
            let cells: Vec<String> = line.iter().map(|cell| escape(cell)).collect();
            out.push_str(&cells.join(&delimiter.to_string()));
            out.push('\n');
        }
        out
    }
}

#[derive(Clone, Copy)]
enum TableStyle {
    Rounded,
    Markdown,
}

/// Render `rows` (or `value`, for structured formats) as a string
pub fn render<T: Serialize + ?Sized>(format: OutputFormat, rows: &Rows, value: &T) -> Result<String> {
    let text = match format {
        OutputFormat::Auto | OutputFormat::Table => rows.table(TableStyle::Rounded),
        OutputFormat::Md => rows.table(TableStyle::Markdown),
        OutputFormat::Tsv => rows.delimited('\t', |cell| cell.replace(['\t', '\n'], " ")),
        OutputFormat::Csv => rows.delimited(',', escape_csv),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value).into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic()?,
    };
    Ok(text)
}

/// Render and print to stdout
pub fn print<T: Serialize + ?Sized>(format: OutputFormat, rows: &Rows, value: &T) -> Result<()> {
    print!("{}", render(format, rows, value)?);
    Ok(())
}
