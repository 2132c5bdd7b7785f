//! Highlighter — wraps whole-word keyword occurrences in `<mark>` tags for review.
//!
//! Unlike scoring, highlighting only marks whole words, so "ai" never lights up the
//! middle of "maintain". Spans from all keywords are merged first and each merged span
//! is wrapped exactly once; overlapping keywords never produce nested markers.

use regex::RegexBuilder;
use tracing::warn;

pub const MARK_START: &str = "<mark>";
pub const MARK_END: &str = "</mark>";

/// Returns `text` with every whole-word, case-insensitive occurrence of any keyword
/// wrapped in [`MARK_START`] / [`MARK_END`]. All other characters pass through as-is.
pub fn highlight<S: AsRef<str>>(text: &str, keywords: &[S]) -> String {
    let mut spans = Vec::new();
    for keyword in keywords {
        collect_spans(text, keyword.as_ref(), &mut spans);
    }
    if spans.is_empty() {
        return text.to_string();
    }

    let merged = merge_spans(spans);

    let mut out = String::with_capacity(text.len() + merged.len() * (MARK_START.len() + MARK_END.len()));
    let mut cursor = 0;
    for (start, end) in merged {
        out.push_str(&text[cursor..start]);
        out.push_str(MARK_START);
        out.push_str(&text[start..end]);
        out.push_str(MARK_END);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn collect_spans(text: &str, keyword: &str, spans: &mut Vec<(usize, usize)>) {
    if keyword.trim().is_empty() {
        return;
    }
    let re = match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            warn!("Skipping highlight for keyword {keyword:?}: {e}");
            return;
        }
    };

    let mut from = 0;
    while let Some(m) = re.find_at(text, from) {
        if is_whole_word(text, m.start(), m.end()) {
            spans.push((m.start(), m.end()));
        }
        // Step one character so candidates overlapping a rejected match are still seen.
        from = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        if from >= text.len() {
            break;
        }
    }
}

/// ASCII word characters only, like a plain `\b`.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn merge_spans(mut spans: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    spans.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
