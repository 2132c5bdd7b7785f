//! Document Text Extractor — turns PDF / DOCX bytes into one plain-text string.
//!
//! Dispatch is by `DocumentKind` (MIME first, extension fallback). Every failure is
//! reported as an `ExtractionError` and folded into the per-file `ExtractedText`;
//! nothing here aborts a batch.

use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info, warn};

use crate::screening::document::{DocumentKind, ExtractedText, ExtractionError, UploadedDocument};

const DOCX_BODY_PART: &str = "word/document.xml";

/// A decoder for one document family.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF decoder backed by `pdf-extract`.
///
/// Each page's text runs are joined with single spaces and every page is followed by
/// one trailing space. Reading order is whatever the decoder yields; no layout
/// reconstruction is attempted.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| ExtractionError::Corrupt("PDF decoder aborted".to_string()))?
        .map_err(|e| ExtractionError::Corrupt(e.to_string()))?;

        debug!("Decoded PDF with {} page(s)", pages.len());

        let mut text = String::new();
        for page in &pages {
            text.push_str(&collapse_whitespace(page));
            text.push(' ');
        }
        Ok(text)
    }
}

/// DOCX decoder: opens the OOXML zip package and streams `word/document.xml`.
///
/// Only run text (`w:t`) is kept; tabs and breaks become spaces and paragraphs are
/// joined with a single space. Images and table structure are dropped.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::Corrupt(format!("not a DOCX package: {e}")))?;

        let mut xml = Vec::new();
        archive
            .by_name(DOCX_BODY_PART)
            .map_err(|e| ExtractionError::Corrupt(format!("missing {DOCX_BODY_PART}: {e}")))?
            .read_to_end(&mut xml)
            .map_err(|e| ExtractionError::Corrupt(format!("truncated {DOCX_BODY_PART}: {e}")))?;

        parse_document_xml(&xml)
    }
}

fn parse_document_xml(xml: &[u8]) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(4096);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => flush_paragraph(&mut current, &mut paragraphs),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if matches!(e.local_name().as_ref(), b"tab" | b"br" | b"cr") {
                    current.push(' ');
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_text {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractionError::Corrupt(format!("bad text run: {err}")))?;
                    current.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if in_text {
                    current.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Corrupt(format!(
                    "malformed {DOCX_BODY_PART} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }
    flush_paragraph(&mut current, &mut paragraphs);

    Ok(paragraphs.join(" "))
}

fn flush_paragraph(current: &mut String, paragraphs: &mut Vec<String>) {
    let para = current.trim();
    if !para.is_empty() {
        paragraphs.push(para.to_string());
    }
    current.clear();
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extractor_for(kind: DocumentKind) -> Option<&'static dyn TextExtractor> {
    match kind {
        DocumentKind::Pdf => Some(&PdfExtractor),
        DocumentKind::Docx => Some(&DocxExtractor),
        DocumentKind::Unknown => None,
    }
}

/// Extracts plain text from an uploaded document.
///
/// A blank but well-formed document is a successful extraction unless `flag_empty`
/// is set, in which case it is tagged `Empty`.
pub fn extract(document: &UploadedDocument, flag_empty: bool) -> ExtractedText {
    let result = extractor_for(document.kind)
        .ok_or(ExtractionError::UnsupportedFormat)
        .and_then(|extractor| extractor.extract_text(&document.bytes))
        .and_then(|text| {
            if flag_empty && text.trim().is_empty() {
                Err(ExtractionError::Empty)
            } else {
                Ok(text)
            }
        });

    match result {
        Ok(content) => {
            info!(
                "Extracted {} chars from {} ({:?})",
                content.chars().count(),
                document.name,
                document.kind
            );
            ExtractedText::ok(&document.name, content)
        }
        Err(e) => {
            warn!("Extraction failed for {}: {e}", document.name);
            ExtractedText::failed(&document.name, &e)
        }
    }
}
