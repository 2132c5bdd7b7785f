//! Result Serializer — CSV tables, per-file text dumps, and a zip bundle of both.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use serde::Deserialize;
use zip::write::SimpleFileOptions;

use crate::screening::pipeline::ScreeningResult;

pub const CSV_FILE_NAME: &str = "screening_results.csv";
pub const BUNDLE_FILE_NAME: &str = "screening_export.zip";

/// Which columns a CSV export carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportLayout {
    /// File, contact fields, checklist and job-description scoring.
    #[default]
    Dual,
    /// File, contact fields, checklist scoring and the full extracted text.
    FullText,
}

/// One plain-text artifact holding a file's full extracted text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDump {
    pub file_name: String,
    pub content: String,
}

fn record(result: &ScreeningResult, layout: ExportLayout) -> Vec<(&'static str, String)> {
    let error = result
        .error
        .map(|tag| tag.as_str().to_string())
        .unwrap_or_default();

    match layout {
        ExportLayout::Dual => vec![
            ("File", result.file_name.clone()),
            ("Email", result.email.clone()),
            ("Phone", result.phone.clone()),
            ("Matched", result.checklist_matched.join(", ")),
            ("Missing", result.checklist_missing.join(", ")),
            ("Score", result.checklist_score.clone()),
            ("JDMatch", result.jd_matched.join(", ")),
            ("JDScore", result.jd_score.clone()),
            ("JDMissing", result.jd_missing.join(", ")),
            ("Error", error),
        ],
        ExportLayout::FullText => vec![
            ("File", result.file_name.clone()),
            ("Email", result.email.clone()),
            ("Phone", result.phone.clone()),
            ("Matched", result.checklist_matched.join(", ")),
            ("Missing", result.checklist_missing.join(", ")),
            ("Score", result.checklist_score.clone()),
            ("Text", result.text.clone()),
            ("Error", error),
        ],
    }
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn to_csv(results: &[ScreeningResult]) -> String {
    to_csv_with(results, ExportLayout::Dual)
}

/// Header row from the first record's field order, then one fully quoted row per
/// result. An empty batch serializes to an empty string.
pub fn to_csv_with(results: &[ScreeningResult], layout: ExportLayout) -> String {
    let records: Vec<_> = results.iter().map(|r| record(r, layout)).collect();
    let Some(first) = records.first() else {
        return String::new();
    };

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        first
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(","),
    );
    for fields in &records {
        lines.push(
            fields
                .iter()
                .map(|(_, value)| csv_field(value))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// `resume_1.txt`, `resume_2.txt`, ... in batch order.
pub fn text_dumps(results: &[ScreeningResult]) -> Vec<TextDump> {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| TextDump {
            file_name: format!("resume_{}.txt", i + 1),
            content: result.text.clone(),
        })
        .collect()
}

/// Zip archive with the CSV table and every text dump.
pub fn export_bundle(results: &[ScreeningResult], layout: ExportLayout) -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

    writer
        .start_file(CSV_FILE_NAME, SimpleFileOptions::default())
        .context("Failed to start CSV entry")?;
    writer
        .write_all(to_csv_with(results, layout).as_bytes())
        .context("Failed to write CSV entry")?;

    for dump in text_dumps(results) {
        writer
            .start_file(dump.file_name.as_str(), SimpleFileOptions::default())
            .with_context(|| format!("Failed to start entry {}", dump.file_name))?;
        writer
            .write_all(dump.content.as_bytes())
            .with_context(|| format!("Failed to write entry {}", dump.file_name))?;
    }

    let cursor = writer.finish().context("Failed to finalize export bundle")?;
    Ok(cursor.into_inner())
}
