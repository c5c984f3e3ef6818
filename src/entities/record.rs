//! Inspection records - the rows that weekly and yearly reports summarise
//!
//! Records come from CSV exports (header row required) or YAML lists. Only
//! `date`, `station` and `inspected` are mandatory.

use chrono::NaiveDate;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::diagnostics::SourceError;

/// Kind of quality check a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// In-process or final inspection
    #[default]
    Inspection,
    /// Defect log entry
    Defect,
    /// Incoming quality assurance (supplier material)
    Iqa,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Inspection => write!(f, "inspection"),
            RecordKind::Defect => write!(f, "defect"),
            RecordKind::Iqa => write!(f, "iqa"),
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inspection" => Ok(RecordKind::Inspection),
            "defect" => Ok(RecordKind::Defect),
            "iqa" => Ok(RecordKind::Iqa),
            _ => Err(format!(
                "Invalid record kind: {}. Use inspection, defect, or iqa",
                s
            )),
        }
    }
}

/// One inspection outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    /// Calendar date of the inspection
    pub date: NaiveDate,

    /// Station code (IQA, L1, FQC, ...)
    pub station: String,

    /// Issued inspection number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_no: Option<String>,

    #[serde(default)]
    pub kind: RecordKind,

    /// Production or supplier lot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,

    /// Units inspected
    pub inspected: u64,

    /// Units found defective
    #[serde(default)]
    pub defects: u64,
}

/// Errors loading record files
#[derive(Debug, Error, Diagnostic)]
pub enum RecordError {
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(qcf::records::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported record file '{0}'")]
    #[diagnostic(
        code(qcf::records::format),
        help("record files must end in .csv, .yaml or .yml")
    )]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SourceError),

    #[error("record for {date} at {station} has more defects ({defects}) than units inspected ({inspected})")]
    #[diagnostic(code(qcf::records::defects))]
    DefectsExceedInspected {
        date: NaiveDate,
        station: String,
        inspected: u64,
        defects: u64,
    },
}

/// Load records from a `.csv`, `.yaml` or `.yml` file
pub fn load_records(path: &Path) -> Result<Vec<InspectionRecord>, RecordError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let filename = path.display().to_string();

    let parse: fn(&str, &str) -> Result<Vec<InspectionRecord>, RecordError> = match extension.as_str() {
        "csv" => parse_csv,
        "yaml" | "yml" => parse_yaml,
        _ => return Err(RecordError::UnsupportedFormat(path.to_path_buf())),
    };

    let source = fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse(&source, &filename)?;
    tracing::debug!(path = %filename, count = records.len(), "loaded inspection records");
    Ok(records)
}

/// Parse CSV text with a header row
pub fn parse_csv(source: &str, filename: &str) -> Result<Vec<InspectionRecord>, RecordError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize::<InspectionRecord>() {
        let record = row.map_err(|e| SourceError::from_csv(&e, source, filename))?;
        records.push(validate(record)?);
    }
    Ok(records)
}

/// Parse a YAML list of records
pub fn parse_yaml(source: &str, filename: &str) -> Result<Vec<InspectionRecord>, RecordError> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<InspectionRecord> = serde_yml::from_str(source)
        .map_err(|e| SourceError::from_yaml(&e, source, filename))?;

    records.into_iter().map(validate).collect()
}

fn validate(record: InspectionRecord) -> Result<InspectionRecord, RecordError> {
    if record.defects > record.inspected {
        return Err(RecordError::DefectsExceedInspected {
            date: record.date,
            station: record.station,
            inspected: record.inspected,
            defects: record.defects,
        });
    }
    Ok(record)
}
