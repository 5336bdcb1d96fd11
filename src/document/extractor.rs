use crate::error::{Result, ScoreError};
use log::{debug, info};
use std::panic;
use std::path::Path;

/// Produces the full text of a document, pages concatenated in order.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Reads text out of PDF files with `pdf-extract`.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| ScoreError::unreadable(path, e))?;

        if !bytes.starts_with(b"%PDF") {
            return Err(ScoreError::unreadable(path, "not a PDF file"));
        }

        // pdf-extract panics on some malformed content streams
        let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
            .map_err(|_| ScoreError::unreadable(path, "PDF parser aborted on corrupt content"))?
            .map_err(|e| ScoreError::unreadable(path, e))?;

        info!(
            "Extracted {} characters from {}",
            extracted.chars().count(),
            path.display()
        );
        debug!("{} starts with {:?}", path.display(), extracted.chars().take(80).collect::<String>());

        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn scratch_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = PdfExtractor::new()
            .extract(Path::new("/definitely/not/here/rfp.pdf"))
            .unwrap_err();
        assert!(matches!(err, ScoreError::DocumentUnreadable { .. }));
    }

    #[test]
    fn test_non_pdf_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = scratch_file(&dir, "notes.pdf", b"just some plain text, not a pdf");
        let err = PdfExtractor::new().extract(&path).unwrap_err();
        match err {
            ScoreError::DocumentUnreadable { reason, .. } => assert_eq!(reason, "not a PDF file"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_pdf_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = scratch_file(&dir, "truncated.pdf", b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog");
        let err = PdfExtractor::new().extract(&path).unwrap_err();
        assert!(matches!(err, ScoreError::DocumentUnreadable { .. }));
    }
    #[test]
    fn test_scratch_files_are_removed_with_their_dir() {
        let dir = TempDir::new().unwrap();
        let path = scratch_file(&dir, "gone.pdf", b"%PDF-1.4\n");
        assert!(path.exists());
        drop(dir);
        assert!(!path.exists());
    }
}
