//! Assignment sources feeding the overlap analysis.
//!
//! # Responsibility
//! - Define the contract for anything that can supply assignment records.
//! - Turn delimited text into typed records (`csv_source`).
//!
//! # Invariants
//! - Sources never drop a malformed record silently; they fail the load.
//! - The only recovered field is the end date (open-ended fallback).

pub mod csv_source;

use crate::model::assignment::AssignmentRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type LoadResult<T> = Result<T, LoadError>;

/// Record field that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    EmployeeId,
    ProjectId,
    StartDate,
}

impl Display for RecordField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EmployeeId => "employee id",
            Self::ProjectId => "project id",
            Self::StartDate => "start date",
        };
        write!(f, "{name}")
    }
}

/// Failure while loading assignment records.
#[derive(Debug)]
pub enum LoadError {
    /// Input could not be opened; nothing to compute.
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Reading stopped mid-stream.
    Read { line: usize, source: std::io::Error },
    /// Line does not have the expected number of fields.
    FieldCount { line: usize, found: usize },
    /// Core field cannot be parsed.
    InvalidField {
        line: usize,
        field: RecordField,
        value: String,
    },
}

impl LoadError {
    /// Whether the input itself is missing, as opposed to malformed.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }

    /// 1-based line number of the offending record, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::SourceUnavailable { .. } => None,
            Self::Read { line, .. }
            | Self::FieldCount { line, .. }
            | Self::InvalidField { line, .. } => Some(*line),
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable { path, source } => {
                write!(f, "cannot open `{}`: {source}", path.display())
            }
            Self::Read { line, source } => write!(f, "line {line}: read failed: {source}"),
            Self::FieldCount { line, found } => write!(
                f,
                "line {line}: expected 4 comma-separated fields, found {found}"
            ),
            Self::InvalidField { line, field, value } => {
                write!(f, "line {line}: invalid {field} `{value}`")
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SourceUnavailable { source, .. } | Self::Read { source, .. } => Some(source),
            Self::FieldCount { .. } | Self::InvalidField { .. } => None,
        }
    }
}

/// Anything that can supply the full batch of assignment records.
pub trait AssignmentSource {
    fn load(&self) -> LoadResult<Vec<AssignmentRecord>>;
}

/// Pre-typed records, e.g. built by callers or tests.
impl AssignmentSource for Vec<AssignmentRecord> {
    fn load(&self) -> LoadResult<Vec<AssignmentRecord>> {
        Ok(self.clone())
    }
}
