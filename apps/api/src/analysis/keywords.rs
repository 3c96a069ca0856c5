//! Keyword scoring: case-folded whitespace tokens of the resume vs the job description.
//!
//! Tokens are kept in ordered sets, so the truncated keyword lists are the
//! alphabetically smallest tokens and repeated calls return identical output.
//! There is no stemming, stop-word removal or punctuation stripping:
//! `"skills,"` and `"skills"` are different tokens.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Maximum number of entries in each keyword list.
pub const KEYWORD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub ats_score: u32, // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Lower-cases and splits on whitespace.
///
/// The information separators U+001C..=U+001F also split tokens;
/// `char::is_whitespace` alone excludes them.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(is_token_separator)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Scores a resume against a job description.
///
/// `ats_score = floor(100 * |resume ∩ jd| / |jd|)`, or 0 when the job
/// description has no tokens.
pub fn score_keywords(resume_text: &str, jd_text: &str) -> ScoreResult {
    let resume_words = tokenize(resume_text);
    let jd_words = tokenize(jd_text);

    let matched: Vec<&String> = jd_words.intersection(&resume_words).collect();

    let ats_score = if jd_words.is_empty() {
        0
    } else {
        ((matched.len() * 100 / jd_words.len()) as u32).min(100)
    };

    ScoreResult {
        ats_score,
        matched_keywords: matched
            .into_iter()
            .take(KEYWORD_LIMIT)
            .cloned()
            .collect(),
        missing_keywords: jd_words
            .difference(&resume_words)
            .take(KEYWORD_LIMIT)
            .cloned()
            .collect(),
    }
}
