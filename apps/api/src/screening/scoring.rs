//! Matching & Scoring Engine.
//!
//! A keyword matches when its lower-case form occurs anywhere in the lower-case text.
//! This is plain substring containment, not word matching: "ai" matches inside
//! "maintain". Scores of existing screenings depend on it, so the highlighter's
//! whole-word rule is deliberately not applied here.

use serde::{Deserialize, Serialize};

use crate::screening::keywords::KeywordUniverse;

/// Outcome of scoring one text against one universe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// `"NN%"`, or empty when the universe is empty.
    pub score: String,
}

pub fn score(text: &str, universe: &KeywordUniverse) -> KeywordScore {
    if universe.is_empty() {
        return KeywordScore::default();
    }

    let haystack = text.to_lowercase();

    let (matched, missing): (Vec<String>, Vec<String>) = universe
        .keywords()
        .iter()
        .cloned()
        .partition(|kw| haystack.contains(kw.as_str()));

    let score = format_percentage(matched.len(), universe.len());

    KeywordScore {
        matched,
        missing,
        score,
    }
}

/// Rounded integer percentage; an empty denominator has no applicable score.
pub fn format_percentage(matched: usize, total: usize) -> String {
    if total == 0 {
        return String::new();
    }
    let pct = (matched as f64 / total as f64 * 100.0).round() as u32;
    format!("{pct}%")
}
