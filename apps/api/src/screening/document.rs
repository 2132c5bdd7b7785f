//! Document model — uploaded bytes in, extracted text out.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Decoder family for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Unknown,
}

impl DocumentKind {
    /// Resolves the kind from the declared MIME type, falling back to the file extension.
    ///
    /// Browsers frequently send `application/octet-stream` (or nothing) for `.docx`,
    /// so an unrecognised MIME type never wins over a recognised extension.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Self {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            PDF_MIME => return DocumentKind::Pdf,
            DOCX_MIME => return DocumentKind::Docx,
            _ => {}
        }

        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            _ => DocumentKind::Unknown,
        }
    }
}

/// A file as handed over by the upload layer. Read-only for the whole run.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    pub kind: DocumentKind,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, content_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let kind = DocumentKind::detect(&name, content_type);
        Self {
            name,
            kind,
            bytes: bytes.into(),
        }
    }
}

/// Per-file extraction failure. Never fatal to the batch.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format")]
    UnsupportedFormat,

    #[error("corrupt document: {0}")]
    Corrupt(String),

    #[error("document contains no text")]
    Empty,
}

impl ExtractionError {
    pub fn tag(&self) -> ErrorTag {
        match self {
            ExtractionError::UnsupportedFormat => ErrorTag::UnsupportedFormat,
            ExtractionError::Corrupt(_) => ErrorTag::Corrupt,
            ExtractionError::Empty => ErrorTag::Empty,
        }
    }
}

/// Serializable error tag carried on a result record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTag {
    UnsupportedFormat,
    Corrupt,
    Empty,
}

impl ErrorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorTag::UnsupportedFormat => "unsupported_format",
            ErrorTag::Corrupt => "corrupt",
            ErrorTag::Empty => "empty",
        }
    }
}

/// Text derived from one uploaded document.
///
/// Invariant: `error.is_some()` implies `content` is empty.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub source_name: String,
    pub content: String,
    pub error: Option<ErrorTag>,
}

impl ExtractedText {
    pub fn ok(source_name: &str, content: String) -> Self {
        Self {
            source_name: source_name.to_string(),
            content,
            error: None,
        }
    }

    pub fn failed(source_name: &str, error: &ExtractionError) -> Self {
        Self {
            source_name: source_name.to_string(),
            content: String::new(),
            error: Some(error.tag()),
        }
    }
}
