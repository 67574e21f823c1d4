//! Description scoring and arbitration
//!
//! A content-derived description only replaces the original filename when it
//! scores clearly better. Both sides are cleaned with the same separator first
//! so the comparison is like for like.

use crate::config::Separator;
use crate::sanitize::clean;

/// Words that make a name look auto-generated
const GENERIC_PATTERNS: &[&str] = &["untitled", "document", "file", "new", "copy", "temp", "test"];

/// Words that usually signal a meaningful title
const DESCRIPTIVE_WORDS: &[&str] = &["report", "analysis", "summary", "guide", "manual", "proposal", "plan"];

pub const MAX_SCORE: i32 = 10;

/// A cleaned description with its usefulness score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredDescription {
    pub text: String,
    pub score: i32,
}

impl ScoredDescription {
    pub fn new(text: String) -> Self {
        let score = score_description(&text);
        Self { text, score }
    }
}

/// Which side won the arbitration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Original,
    Content,
}

/// Outcome of comparing the original name against a content description
#[derive(Debug, Clone)]
pub struct Verdict {
    pub original: ScoredDescription,
    pub content: ScoredDescription,
    pub winner: Winner,
}

impl Verdict {
    /// The winning cleaned description
    pub fn chosen(&self) -> &str {
        match self.winner {
            Winner::Original => &self.original.text,
            Winner::Content => &self.content.text,
        }
    }

    pub fn into_chosen(self) -> String {
        match self.winner {
            Winner::Original => self.original.text,
            Winner::Content => self.content.text,
        }
    }
}

/// Score a description for usefulness as a filename (0-10)
pub fn score_description(description: &str) -> i32 {
    if description.is_empty() {
        return 0;
    }

    let words: Vec<&str> = description
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .collect();

    let mut score = match words.len() {
        2..=6 => 3,
        1 => 1,
        _ => 0,
    };

    for word in &words {
        if word.chars().count() >= 3 {
            score += 1;
        }
        if word.chars().all(char::is_alphabetic) {
            score += 1;
        }
    }

    let lower = description.to_lowercase();
    if GENERIC_PATTERNS.iter().any(|p| lower.contains(p)) {
        score -= 2;
    }

    if words
        .iter()
        .any(|w| DESCRIPTIVE_WORDS.iter().any(|d| w.eq_ignore_ascii_case(d)))
    {
        score += 2;
    }

    score.clamp(0, MAX_SCORE)
}

/// Compare the original name with a content description and pick one
pub fn arbitrate(original_name: &str, content_description: &str, separator: Separator) -> Verdict {
    let original = ScoredDescription::new(clean(original_name, separator));
    let content = ScoredDescription::new(clean(content_description, separator));

    let winner = if content.score > original.score + 2 {
        Winner::Content
    } else if original.score >= 5 && content.score <= original.score + 1 {
        Winner::Original
    } else if content.score >= original.score {
        Winner::Content
    } else {
        Winner::Original
    };

    tracing::debug!(
        "Original '{}' score: {}, Content '{}' score: {}",
        original.text,
        original.score,
        content.text,
        content.score
    );

    Verdict { original, content, winner }
}

/// Convenience wrapper returning only the chosen description
pub fn choose_description(original_name: &str, content_description: &str, separator: Separator) -> String {
    arbitrate(original_name, content_description, separator).into_chosen()
}
