//! Document text from PDF files
//!
//! Text is pulled with `pdf-extract` and regrouped into blocks. Blocks laid
//! out as aligned columns are treated as tables: cells are joined with
//! ` | ` and the rows are wrapped in [`TABLE_START`] / [`TABLE_END`] so a
//! language model can tell tabular data from prose.

use crate::error::SourceError;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, info, warn};

/// Line opening a table region
pub const TABLE_START: &str = "--- DATA TABLE WITH ROLES AND COUNTS ---";

/// Line closing a table region
pub const TABLE_END: &str = "--- END OF TABLE DATA ---";

const CELL_SEPARATOR: &str = " | ";

/// Read a PDF into one document string
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, is not a valid
/// PDF, or yields no text.
pub fn try_read_document(path: &Path) -> Result<String, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // pdf-extract panics on some malformed documents
    let raw = match panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(&bytes)
    })) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return Err(SourceError::Pdf(format!("{}: {}", path.display(), e))),
        Err(_) => {
            return Err(SourceError::Pdf(format!(
                "{}: text extraction panicked (malformed PDF)",
                path.display()
            )))
        }
    };
    debug!("pdf-extract returned {} chars from {}", raw.len(), path.display());

    let document = assemble_document(&raw);
    if document.is_empty() {
        return Err(SourceError::EmptyDocument(path.to_path_buf()));
    }

    Ok(document)
}

/// Read a PDF into one document string
///
/// Failures are logged and yield an empty string.
pub fn read_document(path: &Path) -> String {
    match try_read_document(path) {
        Ok(document) => {
            info!("Extracted {} chars from {}", document.chars().count(), path.display());
            document
        }
        Err(e) => {
            warn!("{}; continuing with an empty document", e);
            String::new()
        }
    }
}

/// Group raw page text into blocks and mark tables
///
/// Blocks are separated by blank lines or page breaks. A block of two or
/// more lines that all split into the same number (at least two) of cells
/// is a table; cells are separated by tabs or runs of two or more spaces.
pub fn assemble_document(raw: &str) -> String {
    let mut blocks = Vec::new();
    let mut tables = 0;

    for block in split_blocks(raw) {
        match as_table(&block) {
            Some(rows) => {
                tables += 1;
                blocks.push(format!("{}\n{}\n{}", TABLE_START, rows.join("\n"), TABLE_END));
            }
            None => blocks.push(block.join("\n")),
        }
    }

    if tables > 0 {
        debug!("Marked {} table regions", tables);
    }

    blocks.join("\n\n")
}

fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for page in raw.split('\u{c}') {
        for line in page.lines() {
            let line = line.trim();
            if line.is_empty() {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
    }

    blocks
}

fn as_table(lines: &[&str]) -> Option<Vec<String>> {
    if lines.len() < 2 {
        return None;
    }

    let rows: Vec<Vec<String>> = lines.iter().map(|line| split_cells(line)).collect();
    let columns = rows[0].len();
    if columns < 2 || rows.iter().any(|row| row.len() != columns) {
        return None;
    }

    Some(rows.into_iter().map(|row| row.join(CELL_SEPARATOR)).collect())
}

fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut spaces = 0;

    for c in line.chars() {
        match c {
            '\t' => {
                push_cell(&mut cells, &mut current);
                spaces = 0;
            }
            ' ' => spaces += 1,
            _ => {
                if spaces >= 2 {
                    push_cell(&mut cells, &mut current);
                } else if spaces == 1 {
                    current.push(' ');
                }
                spaces = 0;
                current.push(c);
            }
        }
    }
    push_cell(&mut cells, &mut current);

    cells
}

fn push_cell(cells: &mut Vec<String>, current: &mut String) {
    let cell = current.trim();
    if !cell.is_empty() {
        cells.push(cell.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_prose_blocks_are_kept() {
        let raw = "  Staffing Plan  \n\nThe team grows next quarter.\nHiring starts in May.\n\n\n";
        assert_eq!(
            assemble_document(raw),
            "Staffing Plan\n\nThe team grows next quarter.\nHiring starts in May."
        );
    }

    #[test]
    fn test_aligned_block_becomes_table() {
        let raw = "Headcount\n\nRole            Count\nData Analyst    4\nQA Tester       2\n\nEnd of report.";
        let expected = format!(
            "Headcount\n\n{}\nRole | Count\nData Analyst | 4\nQA Tester | 2\n{}\n\nEnd of report.",
            TABLE_START, TABLE_END
        );
        assert_eq!(assemble_document(raw), expected);
    }

    #[test]
    fn test_tab_separated_cells() {
        let raw = "Role\tCount\nEngineer\t3";
        assert!(assemble_document(raw).contains("Role | Count\nEngineer | 3"));
    }

    #[test]
    fn test_ragged_block_is_prose() {
        let raw = "Role      Count\nA paragraph line with single spaces only";
        let document = assemble_document(raw);
        assert!(!document.contains(TABLE_START));
        assert_eq!(document, raw);
    }

    #[test]
    fn test_single_line_is_never_a_table() {
        assert!(!assemble_document("Name     Value").contains(TABLE_START));
    }

    #[test]
    fn test_page_break_separates_blocks() {
        assert_eq!(assemble_document("Page one\u{c}Page two"), "Page one\n\nPage two");
    }

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("Senior Developer   5"), vec!["Senior Developer", "5"]);
        assert_eq!(split_cells("a b"), vec!["a b"]);
        assert!(split_cells("").is_empty());
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(assemble_document(" \n\t\n\u{c}\n"), "");
    }

    proptest! {
        #[test]
        fn prop_no_blank_lines_inside_blocks(raw in "[a-z \\n\\t]{0,200}") {
            let document = assemble_document(&raw);
            prop_assert_eq!(document.trim(), document.as_str());
            if !document.is_empty() {
                for block in document.split("\n\n") {
                    prop_assert!(!block.is_empty());
                }
            }
        }
    }
}
