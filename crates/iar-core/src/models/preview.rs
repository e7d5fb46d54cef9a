use serde::{Deserialize, Serialize};

use crate::csv::ParsedCsv;

/// Whether a parsed file can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewState {
    /// No non-blank line at all
    Empty,
    /// A header row but no data rows
    HeadersOnly,
    Ready,
}

impl PreviewState {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PreviewState::Empty => Some("CSV appears empty."),
            PreviewState::HeadersOnly => Some("CSV has headers but no data rows."),
            PreviewState::Ready => None,
        }
    }
}

/// What a user sees before submitting: every parsed row, cells aligned to `headers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPreview {
    pub file_name: String,
    pub size_bytes: u64,
    pub state: PreviewState,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
}

impl CsvPreview {
    pub fn from_parsed(file_name: impl Into<String>, size_bytes: u64, csv: &ParsedCsv) -> Self {
        let state = if csv.is_empty() {
            PreviewState::Empty
        } else if csv.row_count() == 0 {
            PreviewState::HeadersOnly
        } else {
            PreviewState::Ready
        };

        CsvPreview {
            file_name: file_name.into(),
            size_bytes,
            state,
            headers: csv.headers().to_vec(),
            rows: csv.rows().iter().map(|row| row.cells().to_vec()).collect(),
            row_count: csv.row_count(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == PreviewState::Ready
    }

    /// `"name.csv (12 KB)"`; sizes round to the nearest KB with a floor of 1.
    pub fn file_meta(&self) -> String {
        file_meta(&self.file_name, self.size_bytes)
    }
}

pub fn file_meta(file_name: &str, size_bytes: u64) -> String {
    let kb = ((size_bytes as f64) / 1024.0).round().max(1.0) as u64;
    format!("{} ({} KB)", file_name, kb)
}
