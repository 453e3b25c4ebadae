//! Error taxonomy for user-facing failures.
//!
//! Everything that surfaces as a modal dialog goes through [`Error`];
//! application plumbing (config load, startup) uses `anyhow` instead.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Requested zoom is not one of the discrete zoom steps.
    #[error("invalid zoom value: {0}%")]
    InvalidZoomValue(u32),

    #[error("no document selected - load and select a PDF first")]
    NoFileSelected,

    #[error("no region selected - select a region first")]
    NoRegionSelected,

    #[error("page {page} out of range (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },

    #[error("failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read {path}: {source}")]
    OutputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open document {path}: {message}")]
    DocumentOpen { path: PathBuf, message: String },

    #[error("failed to rasterize page {page} of {path}: {message}")]
    Rasterize {
        path: PathBuf,
        page: u32,
        message: String,
    },

    #[error("OCR failed for {path}: {message}")]
    Ocr { path: PathBuf, message: String },

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("output folder {path} contains no extracted documents")]
    EmptyOutputTree { path: PathBuf },
}

impl Error {
    /// True when the failure is a permission problem, e.g. the target
    /// spreadsheet is still open in another program.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Error::OutputWrite { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied
        )
    }
}
