//! OCR via an external Tesseract executable.
//!
//! The engine shells out to a configured `tesseract` binary rather than
//! embedding a model; each call is synchronous and can take hundreds of
//! milliseconds to seconds per image.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Contract over the text-recognition backend, so tabulation can be tested
/// without a tesseract install.
pub trait TextRecognizer {
    /// Plain-text OCR of one image file.
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// Tesseract CLI wrapper.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    executable: PathBuf,
    language: String,
}

impl TesseractOcr {
    pub fn new(executable: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            language: language.into(),
        }
    }

}

impl TextRecognizer for TesseractOcr {
    fn recognize(&self, image: &Path) -> Result<String> {
        debug!(image = %image.display(), "running tesseract");

        let output = Command::new(&self.executable)
            .arg(image)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .map_err(|e| Error::Ocr {
                path: image.to_path_buf(),
                message: format!("could not run {}: {e}", self.executable.display()),
            })?;

        if !output.status.success() {
            return Err(Error::Ocr {
                path: image.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_reported() {
        let ocr = TesseractOcr::new("/nonexistent/tesseract", "eng");
        let result = ocr.recognize(Path::new("image.png"));
        assert!(matches!(result, Err(Error::Ocr { .. })));
    }
}
