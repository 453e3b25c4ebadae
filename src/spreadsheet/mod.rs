//! Spreadsheet output.
//!
//! Thin wrapper over `rust_xlsxwriter`: an ordered sequence of rows goes in
//! (header first), an `.xlsx` file with auto-fitted column widths comes out.

use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::{Error, Result};

const SHEET_NAME: &str = "OCR results";

fn convert_error(path: &Path, e: XlsxError) -> Error {
    match e {
        XlsxError::IoError(source) => Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        },
        other => Error::Spreadsheet(other.to_string()),
    }
}

/// Write `rows` to an `.xlsx` file at `path`.
pub fn write_table(rows: &[Vec<String>], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| convert_error(path, e))?;

    for (row_index, row) in rows.iter().enumerate() {
        for (col_index, cell) in row.iter().enumerate() {
            worksheet
                .write_string(row_index as u32, col_index as u16, cell)
                .map_err(|e| convert_error(path, e))?;
        }
    }

    worksheet.autofit();

    workbook.save(path).map_err(|e| convert_error(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_table_produces_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.xlsx");

        let rows = vec![
            vec!["".to_string(), "r1.png".to_string()],
            vec!["A".to_string(), "hello".to_string()],
        ];

        write_table(&rows, &path).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.xlsx");

        let rows = vec![
            vec!["".to_string(), "r1.png".to_string(), "r2.png".to_string()],
            vec!["B".to_string(), "only one cell".to_string()],
        ];

        assert!(write_table(&rows, &path).is_ok());
    }

    #[test]
    fn test_unwritable_path_is_reported() {
        let rows = vec![vec!["x".to_string()]];
        let result = write_table(&rows, Path::new("/nonexistent-dir/results.xlsx"));
        assert!(result.is_err());
    }
}
