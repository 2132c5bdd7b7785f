//! Screening pipeline — one pass per file, files fanned out over blocking workers.
//!
//! `screen_document` is the pure per-file function. `screen_batch` runs it on
//! `tokio::task::spawn_blocking` (PDF/DOCX decoding is CPU-bound), bounded by a
//! semaphore, and returns results in input order. Keyword universes are built once per
//! batch and only ever read afterwards.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::screening::document::{ErrorTag, ExtractedText, UploadedDocument};
use crate::screening::extractor::extract;
use crate::screening::fields::extract_fields;
use crate::screening::highlight::highlight;
use crate::screening::keywords::{KeywordSelections, KeywordUniverses};
use crate::screening::scoring::score;

/// Per-file outcome. Never mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub file_name: String,
    pub email: String,
    pub phone: String,
    pub checklist_matched: Vec<String>,
    pub checklist_missing: Vec<String>,
    pub checklist_score: String,
    pub jd_matched: Vec<String>,
    pub jd_missing: Vec<String>,
    pub jd_score: String,
    pub highlighted_text: String,
    /// Full extracted text, used by the full-text export layouts.
    pub text: String,
    pub error: Option<ErrorTag>,
}

impl ScreeningResult {
    /// A result for a file that could not be read: only the name and tag are set.
    pub fn failed(file_name: &str, error: ErrorTag) -> Self {
        Self {
            file_name: file_name.to_string(),
            error: Some(error),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScreeningOptions {
    /// Maximum number of files decoded at the same time.
    pub concurrency: usize,
    /// Tag blank documents `empty` instead of scoring them at 0%.
    pub flag_empty: bool,
}

impl Default for ScreeningOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            flag_empty: false,
        }
    }
}

/// Everything the upload layer hands over for one run.
#[derive(Debug, Clone, Default)]
pub struct ScreeningRequest {
    pub documents: Vec<UploadedDocument>,
    pub selections: KeywordSelections,
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningBatch {
    pub batch_id: Uuid,
    pub screened_at: DateTime<Utc>,
    pub checklist_keywords: Vec<String>,
    pub job_description_keywords: Vec<String>,
    pub results: Vec<ScreeningResult>,
}

/// Extract → fields → score both universes → highlight, for one file.
pub fn screen_document(
    document: &UploadedDocument,
    universes: &KeywordUniverses,
    options: &ScreeningOptions,
) -> ScreeningResult {
    let ExtractedText {
        source_name,
        content: text,
        error,
    } = extract(document, options.flag_empty);
    if let Some(tag) = error {
        return ScreeningResult::failed(&source_name, tag);
    }

    let contact = extract_fields(&text);
    let checklist = score(&text, &universes.checklist);
    let jd = score(&text, &universes.job_description);

    debug!(
        "{}: checklist {} ({}/{}), jd {} ({}/{})",
        source_name,
        checklist.score,
        checklist.matched.len(),
        universes.checklist.len(),
        jd.score,
        jd.matched.len(),
        universes.job_description.len()
    );

    let marked: Vec<&str> = checklist
        .matched
        .iter()
        .chain(&jd.matched)
        .map(String::as_str)
        .collect();
    let highlighted_text = highlight(&text, &marked);

    ScreeningResult {
        file_name: source_name,
        email: contact.email,
        phone: contact.phone,
        checklist_matched: checklist.matched,
        checklist_missing: checklist.missing,
        checklist_score: checklist.score,
        jd_matched: jd.matched,
        jd_missing: jd.missing,
        jd_score: jd.score,
        highlighted_text,
        text,
        error: None,
    }
}

/// Screens every document against shared universes. Output order matches input order.
///
/// A file whose worker fails is reported as `corrupt`; the rest of the batch is unaffected.
pub async fn screen_batch(
    documents: Vec<UploadedDocument>,
    universes: Arc<KeywordUniverses>,
    options: ScreeningOptions,
) -> Vec<ScreeningResult> {
    let limit = Arc::new(Semaphore::new(options.concurrency.max(1)));

    let handles: Vec<_> = documents
        .into_iter()
        .map(|document| {
            let name = document.name.clone();
            let limit = Arc::clone(&limit);
            let universes = Arc::clone(&universes);
            let handle = tokio::spawn(async move {
                let _permit = limit.acquire_owned().await?;
                let result = tokio::task::spawn_blocking(move || {
                    screen_document(&document, &universes, &options)
                })
                .await?;
                anyhow::Ok(result)
            });
            (name, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        let result = match handle.await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!("Screening worker failed for {name}: {e:?}");
                ScreeningResult::failed(&name, ErrorTag::Corrupt)
            }
            Err(e) => {
                error!("Screening task failed for {name}: {e}");
                ScreeningResult::failed(&name, ErrorTag::Corrupt)
            }
        };
        results.push(result);
    }
    results
}

/// Builds the batch's universes once, then screens all documents.
pub async fn run_screening(request: ScreeningRequest, options: ScreeningOptions) -> ScreeningBatch {
    let universes = Arc::new(KeywordUniverses::build(
        &request.selections,
        &request.job_description,
    ));
    let batch_id = Uuid::new_v4();

    info!(
        "Screening batch {batch_id}: {} file(s), {} checklist keyword(s), {} JD keyword(s)",
        request.documents.len(),
        universes.checklist.len(),
        universes.job_description.len()
    );

    let results = screen_batch(request.documents, Arc::clone(&universes), options).await;
    let failed = results.iter().filter(|r| r.error.is_some()).count();
    info!("Screening batch {batch_id} done: {failed} file(s) unreadable");

    ScreeningBatch {
        batch_id,
        screened_at: Utc::now(),
        checklist_keywords: universes.checklist.keywords().to_vec(),
        job_description_keywords: universes.job_description.keywords().to_vec(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::extractor::fixtures;
    use crate::screening::keywords::KeywordSelections;

    fn universes(skills: &[&str], jd: &str) -> KeywordUniverses {
        let selections = KeywordSelections {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        KeywordUniverses::build(&selections, jd)
    }

    fn docx(name: &str, paragraphs: &[&str]) -> UploadedDocument {
        UploadedDocument::new(name, None, fixtures::docx(paragraphs))
    }

    #[test]
    fn test_screen_document_full_record() {
        let doc = docx(
            "jane.docx",
            &["Jane Doe", "jane.doe@example.com | 555-123-4567", "Python and SQL, some Docker"],
        );
        let u = universes(&["Python", "SQL", "Kubernetes"], "Docker developer wanted");
        let result = screen_document(&doc, &u, &ScreeningOptions::default());

        assert_eq!(result.error, None);
        assert_eq!(result.file_name, "jane.docx");
        assert_eq!(result.email, "jane.doe@example.com");
        assert_eq!(result.phone, "555-123-4567");
        assert_eq!(result.checklist_matched, vec!["python", "sql"]);
        assert_eq!(result.checklist_missing, vec!["kubernetes"]);
        assert_eq!(result.checklist_score, "67%");
        assert_eq!(result.jd_matched, vec!["docker"]);
        assert_eq!(result.jd_missing, vec!["developer", "wanted"]);
        assert_eq!(result.jd_score, "33%");
        assert!(result.highlighted_text.contains("<mark>Python</mark>"));
        assert!(result.highlighted_text.contains("<mark>Docker</mark>"));
        assert!(result.text.starts_with("Jane Doe"));
    }

    #[test]
    fn test_unsupported_file_short_circuits() {
        let doc = UploadedDocument::new("notes.txt", Some("text/plain"), b"Python".to_vec());
        let result = screen_document(&doc, &universes(&["Python"], "python"), &ScreeningOptions::default());
        assert_eq!(result.error, Some(ErrorTag::UnsupportedFormat));
        assert_eq!(result.checklist_score, "");
        assert_eq!(result.jd_score, "");
        assert!(result.checklist_matched.is_empty());
        assert!(result.checklist_missing.is_empty());
        assert!(result.email.is_empty());
    }

    #[test]
    fn test_blank_document_scores_zero() {
        let doc = docx("blank.docx", &[]);
        let result = screen_document(&doc, &universes(&["Rust"], ""), &ScreeningOptions::default());
        assert_eq!(result.error, None);
        assert_eq!(result.checklist_score, "0%");
        assert_eq!(result.jd_score, "");
        assert_eq!(result.email, "Not found");
    }

    #[test]
    fn test_blank_document_flagged() {
        let doc = docx("blank.docx", &[]);
        let options = ScreeningOptions {
            flag_empty: true,
            ..Default::default()
        };
        let result = screen_document(&doc, &universes(&["Rust"], ""), &options);
        assert_eq!(result.error, Some(ErrorTag::Empty));
        assert_eq!(result.checklist_score, "");
    }

    #[test]
    fn test_blank_skill_gives_no_free_match() {
        let doc = docx("cv.docx", &["Rust only"]);
        let u = universes(&["", "Kubernetes"], "");
        let result = screen_document(&doc, &u, &ScreeningOptions::default());
        assert_eq!(u.checklist.keywords(), &["kubernetes".to_string()]);
        assert!(result.checklist_matched.is_empty());
        assert_eq!(result.checklist_score, "0%");
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_isolates_failures() {
        let documents = vec![
            docx("a.docx", &["Rust engineer"]),
            UploadedDocument::new("b.txt", None, b"Rust".to_vec()),
            UploadedDocument::new("c.docx", None, b"garbage".to_vec()),
            docx("d.docx", &["Go developer"]),
        ];
        let u = Arc::new(universes(&["Rust", "Go"], ""));

        for concurrency in [1, 3] {
            let options = ScreeningOptions {
                concurrency,
                ..Default::default()
            };
            let results = screen_batch(documents.clone(), Arc::clone(&u), options).await;
            let names: Vec<_> = results.iter().map(|r| r.file_name.as_str()).collect();
            assert_eq!(names, vec!["a.docx", "b.txt", "c.docx", "d.docx"]);
            assert_eq!(results[0].checklist_score, "50%");
            assert_eq!(results[1].error, Some(ErrorTag::UnsupportedFormat));
            assert_eq!(results[2].error, Some(ErrorTag::Corrupt));
            assert_eq!(results[3].checklist_matched, vec!["go"]);
        }
    }

    #[tokio::test]
    async fn test_run_screening_reports_universes() {
        let request = ScreeningRequest {
            documents: vec![docx("a.docx", &["Looking good"])],
            selections: KeywordSelections {
                keywords: "Rust, rust".to_string(),
                ..Default::default()
            },
            job_description: "Looking for Rust".to_string(),
        };
        let batch = run_screening(request, ScreeningOptions::default()).await;
        assert_eq!(batch.checklist_keywords, vec!["rust"]);
        assert_eq!(batch.job_description_keywords, vec!["looking", "rust"]);
        assert_eq!(batch.results.len(), 1);
        assert_eq!(batch.results[0].jd_score, "50%");
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = screen_batch(vec![], Arc::new(KeywordUniverses::default()), ScreeningOptions::default()).await;
        assert!(results.is_empty());
    }
}
