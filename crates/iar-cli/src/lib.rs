//! Shared pieces of the `iar` command: local preview, submit gating and table rendering.

use anyhow::Context;
use iar_core::{parse_csv_bytes, CsvPreview, DbStatusResponse};
use std::path::Path;

/// Why an upload was not submitted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitBlocked {
    #[error("Database is not connected. Please fix connection and retry. ({0})")]
    DatabaseUnavailable(String),

    #[error("Please review and fix CSV preview issues before uploading: {0}")]
    PreviewNotReady(String),
}

/// Parse a local file with the same parser the server ingests with.
pub fn load_preview(path: &Path) -> anyhow::Result<CsvPreview> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let csv = parse_csv_bytes(&data).context("Unable to parse CSV file.")?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(CsvPreview::from_parsed(file_name, data.len() as u64, &csv))
}

/// Submission needs a reachable database and a preview with data rows.
pub fn check_submittable(
    status: &DbStatusResponse,
    preview: &CsvPreview,
) -> Result<(), SubmitBlocked> {
    if !status.ok {
        let reason = status
            .error
            .clone()
            .unwrap_or_else(|| "Database connection failed.".to_string());
        return Err(SubmitBlocked::DatabaseUnavailable(reason));
    }
    if let Some(message) = preview.state.message() {
        return Err(SubmitBlocked::PreviewNotReady(message.to_string()));
    }
    Ok(())
}

/// Truncate to `max_chars` characters, ending in "..." when shortened.
///
/// The result never exceeds `max_chars`; below four characters there is no room for
/// the ellipsis and the text is cut without one.
pub fn truncate_cell(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        s.chars().take(max_chars).collect()
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    }
}

/// Plain-text table of the preview. Line breaks inside cells are shown as spaces.
pub fn render_table(preview: &CsvPreview, max_rows: Option<usize>, max_cell_width: usize) -> String {
    let shown = max_rows.unwrap_or(preview.rows.len()).min(preview.rows.len());
    let display = |cell: &str| truncate_cell(&cell.replace(['\r', '\n'], " "), max_cell_width);

    let header: Vec<String> = preview.headers.iter().map(|h| display(h.as_str())).collect();
    let body: Vec<Vec<String>> = preview.rows[..shown]
        .iter()
        .map(|row| row.iter().map(|c| display(c.as_str())).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&header));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &body {
        out.push_str(&line(row));
        out.push('\n');
    }
    if shown < preview.rows.len() {
        out.push_str(&format!("... {} more row(s)\n", preview.rows.len() - shown));
    }
    out
}

/// Initialize tracing for the CLI. Logs go to stderr so command output stays clean.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use iar_core::{parse_csv, PreviewState};
    use std::io::Write;

    fn preview(text: &str) -> CsvPreview {
        CsvPreview::from_parsed("iar.csv", text.len() as u64, &parse_csv(text).unwrap())
    }

    #[test]
    fn truncate_cell_is_char_safe() {
        assert_eq!(truncate_cell("hello", 10), "hello");
        assert_eq!(truncate_cell("hello", 5), "hello");
        assert_eq!(truncate_cell("hello world", 8), "hello...");
        assert_eq!(truncate_cell("₱₱₱₱₱₱", 5), "₱₱...");
    }

    #[test]
    fn truncate_cell_never_exceeds_width() {
        assert_eq!(truncate_cell("abc", 2), "ab");
        assert_eq!(truncate_cell("abcd", 3), "abc");
        assert_eq!(truncate_cell("abcde", 4), "a...");
        assert_eq!(truncate_cell("abc", 0), "");
        for width in 0..8 {
            assert!(truncate_cell("procurement", width).chars().count() <= width);
        }
    }

    #[test]
    fn submit_blocked_when_database_down() {
        let status = DbStatusResponse::failed("Connection refused");
        let result = check_submittable(&status, &preview("a\n1\n"));
        assert_eq!(
            result,
            Err(SubmitBlocked::DatabaseUnavailable("Connection refused".to_string()))
        );
    }

    #[test]
    fn submit_blocked_when_preview_not_ready() {
        let status = DbStatusResponse::connected();
        assert_eq!(
            check_submittable(&status, &preview("a,b\n")),
            Err(SubmitBlocked::PreviewNotReady(
                "CSV has headers but no data rows.".to_string()
            ))
        );
        assert!(matches!(
            check_submittable(&status, &preview("")),
            Err(SubmitBlocked::PreviewNotReady(_))
        ));
    }

    #[test]
    fn submit_allowed() {
        let status = DbStatusResponse::connected();
        assert_eq!(check_submittable(&status, &preview("a\n1\n")), Ok(()));
    }

    #[test]
    fn render_table_aligns_columns() {
        let out = render_table(&preview("po,amount\nPO-1,\"1,250.50\"\nPO-22,\"a\nb\"\n"), None, 40);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "po    | amount");
        assert_eq!(lines[1], "------+---------");
        assert_eq!(lines[2], "PO-1  | 1,250.50");
        assert_eq!(lines[3], "PO-22 | a b");
    }

    #[test]
    fn render_table_limits_rows() {
        let out = render_table(&preview("a\n1\n2\n3\n"), Some(1), 40);
        assert!(out.ends_with("... 2 more row(s)\n"));
    }

    #[test]
    fn load_preview_from_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "\u{feff}purchase_order_no,iar_amount\r\nPO-1,\"₱1,250.50\"\r\n").unwrap();

        let preview = load_preview(file.path()).unwrap();
        assert_eq!(preview.state, PreviewState::Ready);
        assert_eq!(preview.headers, ["purchase_order_no", "iar_amount"]);
        assert_eq!(preview.rows[0][1], "₱1,250.50");
        assert!(preview.file_name.ends_with(".csv"));
    }
}
