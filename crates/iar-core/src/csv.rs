//! CSV parsing shared by ingestion and preview.
//!
//! Both the upload endpoint and every preview surface go through [`parse_csv`], so what a
//! user previews is exactly what gets ingested.
//!
//! Rules:
//! - comma-separated fields; records end at `\n`, `\r\n` or a bare `\r`
//! - double-quoted fields may contain commas and line breaks; `""` is a literal quote
//! - a leading UTF-8 byte-order mark is stripped
//! - rows whose cells are all empty or whitespace are dropped
//! - the first remaining row is the header; header names are trimmed and empty names
//!   become `column_<n>` (1-based)
//! - data rows are padded with empty cells up to the header width; extra cells are ignored

use std::collections::HashMap;

const BOM: char = '\u{feff}';

/// One data row, with cells aligned to the header list of the [`ParsedCsv`] it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    cells: Vec<String>,
}

impl ParsedRow {
    /// Cell values in header order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Header list plus data rows, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    headers: Vec<String>,
    rows: Vec<ParsedRow>,
    /// Header name -> index of the last column carrying that name.
    index: HashMap<String, usize>,
}

impl ParsedCsv {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[ParsedRow] {
        &self.rows
    }

    /// True when the input held no non-blank line at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Number of data rows (the header row is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a cell by header name.
    ///
    /// Duplicate header names resolve to the right-most column, the same way a later
    /// key overwrites an earlier one when the row is built as a mapping.
    pub fn cell<'a>(&self, row: &'a ParsedRow, column: &str) -> Option<&'a str> {
        self.index
            .get(column)
            .and_then(|&idx| row.cells.get(idx))
            .map(String::as_str)
    }
}

/// Decode uploaded bytes (lossy UTF-8) and parse them.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<ParsedCsv, csv::Error> {
    parse_csv(&String::from_utf8_lossy(bytes))
}

/// Parse CSV text into headers and rows.
///
/// An input without any non-blank line yields an empty [`ParsedCsv`] rather than an error.
pub fn parse_csv(text: &str) -> Result<ParsedCsv, csv::Error> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .double_quote(true)
        .from_reader(text.as_bytes());

    let mut grid: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        grid.push(record.iter().map(str::to_string).collect());
    }

    let mut grid = grid.into_iter();
    let Some(header_row) = grid.next() else {
        return Ok(ParsedCsv::default());
    };

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.trim();
            if name.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut index = HashMap::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        index.insert(header.clone(), idx);
    }

    let width = headers.len();
    let rows = grid
        .map(|mut cells| {
            cells.resize(width, String::new());
            ParsedRow { cells }
        })
        .collect();

    Ok(ParsedCsv {
        headers,
        rows,
        index,
    })
}
