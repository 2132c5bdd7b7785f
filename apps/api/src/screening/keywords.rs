//! Keyword Universe Builder — the two keyword sets a batch is scored against.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Job-description tokens of this many characters or fewer are dropped.
const MIN_JD_TOKEN_EXCLUSIVE: usize = 3;

/// Ordered, duplicate-free set of lower-case keywords. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordUniverse(Vec<String>);

impl KeywordUniverse {
    /// Lower-cases every item and keeps the first occurrence of each.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keywords = items
            .into_iter()
            .map(|item| item.as_ref().to_lowercase())
            .filter(|kw| seen.insert(kw.clone()))
            .collect();
        Self(keywords)
    }

    pub fn keywords(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Checklist inputs as chosen by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordSelections {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    /// Comma-separated free-text keywords.
    #[serde(default)]
    pub keywords: String,
}

/// Both universes for one batch, built before any document is processed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordUniverses {
    pub checklist: KeywordUniverse,
    pub job_description: KeywordUniverse,
}

impl KeywordUniverses {
    pub fn build(selections: &KeywordSelections, job_description: &str) -> Self {
        Self {
            checklist: build_checklist(
                &selections.skills,
                &selections.certifications,
                &selections.education,
                &selections.keywords,
            ),
            job_description: build_job_description(job_description),
        }
    }
}

/// Skills, then certifications, then education, then free-text keywords.
///
/// Items are trimmed and blank ones dropped; an empty keyword would match every text.
pub fn build_checklist(
    skills: &[String],
    certifications: &[String],
    education: &[String],
    free_text: &str,
) -> KeywordUniverse {
    let typed = split_free_text(free_text);
    KeywordUniverse::from_items(
        skills
            .iter()
            .chain(certifications)
            .chain(education)
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .chain(typed),
    )
}

fn split_free_text(free_text: &str) -> impl Iterator<Item = &str> {
    free_text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Tokens of a job description: only `[A-Za-z0-9 ]` survive (so punctuation and line
/// breaks glue neighbouring characters together), then whitespace split, lower-case,
/// tokens longer than three characters.
pub fn build_job_description(job_text: &str) -> KeywordUniverse {
    let stripped: String = job_text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    KeywordUniverse::from_items(
        stripped
            .split_whitespace()
            .filter(|token| token.chars().count() > MIN_JD_TOKEN_EXCLUSIVE),
    )
}
