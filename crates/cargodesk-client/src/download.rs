//! # PDF Downloads
//!
//! Turns a binary response into a named PDF: the filename comes from the
//! server's Content-Disposition header when one is present, otherwise from
//! an `{Entity}-{id}.pdf` fallback supplied by the calling service.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::http::BinaryResponse;

/// A downloaded PDF ready to hand to the caller or write to disk.
#[derive(Debug, Clone)]
pub struct PdfDownload {
    /// Filename to save under, already sanitized.
    pub filename: String,
    /// Raw document bytes.
    pub bytes: Vec<u8>,
}

impl PdfDownload {
    /// Builds a download from a binary response, preferring the server's
    /// Content-Disposition filename over `fallback`.
    pub fn from_response(response: BinaryResponse, fallback: String) -> Self {
        let filename = response
            .content_disposition
            .as_deref()
            .and_then(filename_from_disposition)
            .unwrap_or(fallback);

        debug!(filename = %filename, size = response.bytes.len(), "resolved download");

        PdfDownload {
            filename,
            bytes: response.bytes,
        }
    }

    /// Writes the document into `dir` and returns the full path.
    pub fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Extracts the `filename=` parameter from a Content-Disposition header.
///
/// Handles both quoted (`filename="Order-7.pdf"`) and bare
/// (`filename=Order-7.pdf`) forms. Path separators are stripped so a hostile
/// header cannot escape the target directory.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let start = header.to_ascii_lowercase().find("filename=")?;
    let raw = header[start + "filename=".len()..].trim();

    let name = if let Some(stripped) = raw.strip_prefix('"') {
        stripped.split('"').next().unwrap_or("")
    } else {
        raw.split(';').next().unwrap_or("").trim()
    };

    let name = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_filename() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="Invoice-12.pdf""#),
            Some("Invoice-12.pdf".to_string())
        );
    }

    #[test]
    fn test_bare_filename() {
        assert_eq!(
            filename_from_disposition("attachment; filename=Order-7.pdf"),
            Some("Order-7.pdf".to_string())
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=Order-7.pdf; size=100"),
            Some("Order-7.pdf".to_string())
        );
    }

    #[test]
    fn test_path_components_are_stripped() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="../../etc/passwd""#),
            Some("passwd".to_string())
        );
    }

    #[test]
    fn test_missing_filename_falls_through() {
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename="), None);
    }

    #[test]
    fn test_fallback_when_no_header() {
        let download = PdfDownload::from_response(
            BinaryResponse {
                bytes: vec![0x25, 0x50, 0x44, 0x46],
                content_disposition: None,
            },
            "Order-9.pdf".to_string(),
        );
        assert_eq!(download.filename, "Order-9.pdf");
        assert_eq!(download.bytes.len(), 4);
    }

    #[test]
    fn test_save_to_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let download = PdfDownload {
            filename: "Invoice-3.pdf".to_string(),
            bytes: vec![1, 2, 3],
        };
        let path = download.save_to(dir.path()).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
    }
}
