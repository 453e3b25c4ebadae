//! OCR tabulation over an extraction output tree.
//!
//! Walks `output_root/<document>/<region>.png`, OCRs every cell image, and
//! assembles a 2-D table. The column set is discovered from disk, not from
//! the live catalog, so files left behind by a previous run show up too.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::ocr::TextRecognizer;

/// Which axis the documents occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayout {
    /// Header lists region files; one row per document.
    #[default]
    RegionsAsColumns,
    /// Transposed: header lists documents; one row per region file.
    DocumentsAsColumns,
}

/// Document subfolders of the output tree, sorted by name.
fn document_folders(output_root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(output_root).map_err(|source| Error::OutputRead {
        path: output_root.to_path_buf(),
        source,
    })?;

    let mut folders: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    folders.sort();
    Ok(folders)
}

/// Region image files inside one document folder, sorted by name.
fn region_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(folder).map_err(|source| Error::OutputRead {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

fn leaf_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

/// OCR the whole output tree into table rows, header first.
///
/// The header's column set comes from the *first* document folder; a
/// document missing one of those files simply contributes a shorter row,
/// with no padding.
pub fn build_table(
    output_root: &Path,
    layout: TableLayout,
    ocr: &dyn TextRecognizer,
) -> Result<Vec<Vec<String>>> {
    let documents = document_folders(output_root)?;
    let first = documents.first().ok_or_else(|| Error::EmptyOutputTree {
        path: output_root.to_path_buf(),
    })?;

    info!(
        root = %output_root.display(),
        documents = documents.len(),
        "tabulating output tree"
    );

    let mut rows = Vec::new();

    match layout {
        TableLayout::RegionsAsColumns => {
            let mut header = vec![String::new()];
            header.extend(region_files(first)?.iter().map(|p| leaf_name(p)));
            rows.push(header);

            for folder in &documents {
                let mut row = vec![leaf_name(folder)];
                for file in region_files(folder)? {
                    row.push(ocr.recognize(&file)?);
                }
                rows.push(row);
            }
        }
        TableLayout::DocumentsAsColumns => {
            let mut header = vec![String::new()];
            header.extend(documents.iter().map(|p| leaf_name(p)));
            rows.push(header);

            for file in region_files(first)? {
                let name = leaf_name(&file);
                let mut row = vec![name.clone()];
                for folder in &documents {
                    let cell = folder.join(&name);
                    if !cell.is_file() {
                        continue;
                    }
                    row.push(ocr.recognize(&cell)?);
                }
                rows.push(row);
            }
        }
    }

    Ok(rows)
}
