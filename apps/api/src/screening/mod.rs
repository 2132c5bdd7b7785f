// Resume Screening Engine
// Implements: document text extraction, contact fields, keyword universes, scoring,
// highlighting, and export formatting. Everything here is pure except `pipeline`,
// which fans files out over spawn_blocking.

pub mod catalog;
pub mod document;
pub mod export;
pub mod extractor;
pub mod fields;
pub mod handlers;
pub mod highlight;
pub mod keywords;
pub mod pipeline;
pub mod scoring;
