//! Resume text extraction boundary.
//!
//! Decoding PDF and DOCX lives with an external collaborator; this module owns
//! the contract around it: which content types are accepted, how extracted text
//! is cleaned, and when it is too short to score.

use std::path::Path;

use tracing::debug;

use crate::errors::ExtractionError;

/// Extracted text shorter than this is treated as a failed extraction.
pub const MIN_EXTRACTED_CHARS: usize = 50;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Result<Self, ExtractionError> {
        // ignore parameters such as "; charset=utf-8"
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            MIME_PDF => Ok(DocumentKind::Pdf),
            MIME_DOCX => Ok(DocumentKind::Docx),
            MIME_TEXT => Ok(DocumentKind::PlainText),
            _ => Err(ExtractionError::UnsupportedFormat(mime.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            Some("txt") | Some("text") | Some("md") => Ok(DocumentKind::PlainText),
            _ => Err(ExtractionError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => MIME_PDF,
            DocumentKind::Docx => MIME_DOCX,
            DocumentKind::PlainText => MIME_TEXT,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
            DocumentKind::PlainText => "text file",
        }
    }
}

/// Turns document bytes into raw text. Implemented by decoding backends.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError>;
}

/// Handles plain UTF-8 text only. Binary formats need a decoding backend.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
        match kind {
            DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
                .map_err(|_| ExtractionError::Unreadable(kind.label().to_string())),
            DocumentKind::Pdf | DocumentKind::Docx => {
                Err(ExtractionError::UnsupportedFormat(kind.mime().to_string()))
            }
        }
    }
}

/// Cleans extracted text and rejects it when too little survives.
///
/// Line endings are normalised, runs of whitespace collapse to one space, and
/// the result is trimmed.
pub fn prepare_resume_text(raw: &str) -> Result<String, ExtractionError> {
    let cleaned = raw
        .replace("\r\n", "\n")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let length = cleaned.chars().count();
    if length < MIN_EXTRACTED_CHARS {
        return Err(ExtractionError::TooShort {
            length,
            minimum: MIN_EXTRACTED_CHARS,
        });
    }
    Ok(cleaned)
}

/// Extracts and validates resume text in one step.
pub fn extract_resume_text(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    kind: DocumentKind,
) -> Result<String, ExtractionError> {
    let raw = extractor.extract(bytes, kind)?;
    debug!(kind = kind.label(), bytes = bytes.len(), chars = raw.len(), "Extracted resume text");
    prepare_resume_text(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\r\nSenior backend engineer\r\n\r\n5 years   building REST APIs with Node.js";

    #[test]
    fn test_from_mime() {
        assert_eq!(DocumentKind::from_mime("application/pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(MIME_DOCX).unwrap(), DocumentKind::Docx);
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8").unwrap(),
            DocumentKind::PlainText
        );
        assert_eq!(
            DocumentKind::from_mime("image/png"),
            Err(ExtractionError::UnsupportedFormat("image/png".into()))
        );
    }

    #[test]
    fn test_from_path() {
        assert_eq!(DocumentKind::from_path(Path::new("cv.PDF")).unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("cv.txt")).unwrap(), DocumentKind::PlainText);
        assert!(DocumentKind::from_path(Path::new("cv")).is_err());
        assert!(DocumentKind::from_path(Path::new("cv.exe")).is_err());
    }

    #[test]
    fn test_prepare_collapses_whitespace() {
        let text = prepare_resume_text(RESUME).unwrap();
        assert_eq!(
            text,
            "Jane Doe Senior backend engineer 5 years building REST APIs with Node.js"
        );
    }

    #[test]
    fn test_prepare_rejects_short_text() {
        assert_eq!(
            prepare_resume_text("  Jane Doe \n\n  "),
            Err(ExtractionError::TooShort {
                length: 8,
                minimum: MIN_EXTRACTED_CHARS
            })
        );
        let exactly = "x".repeat(MIN_EXTRACTED_CHARS);
        assert!(prepare_resume_text(&exactly).is_ok());
    }

    #[test]
    fn test_plain_text_extractor() {
        let text =
            extract_resume_text(&PlainTextExtractor, RESUME.as_bytes(), DocumentKind::PlainText)
                .unwrap();
        assert!(text.starts_with("Jane Doe Senior"));

        assert_eq!(
            PlainTextExtractor.extract(&[0xff, 0xfe, 0x00], DocumentKind::PlainText),
            Err(ExtractionError::Unreadable("text file".into()))
        );
        assert_eq!(
            PlainTextExtractor.extract(b"%PDF-1.7", DocumentKind::Pdf),
            Err(ExtractionError::UnsupportedFormat(MIME_PDF.into()))
        );
    }
}
