//! Candidate scanning
//!
//! Looks at the first lines of a document for something that reads like a
//! title and returns the highest-priority match.

use regex::RegexSet;
use std::sync::LazyLock;

/// Lines inspected for title-like patterns
const TITLE_SCAN_LINES: usize = 10;
/// Lines inspected for plain meaningful text
const MEANINGFUL_SCAN_LINES: usize = 3;

/// Lines that never make a good description (matched against the lowercased line)
static UNINFORMATIVE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // code
        r"^import\s+",
        r"^from\s+.*import",
        r"^#.*",
        r"^//.*",
        r"^/\*.*",
        r"^\s*$",
        // document structure
        r"^chapter\s+\d+$",
        r"^section\s+\d+$",
        r"^page\s+\d+$",
        r"^\d+\.$",
        r"^[ivx]+\.$",
    ])
    .expect("valid regex")
});

/// Pattern class that produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// `# Heading`
    MarkdownHeader,
    /// `ALL CAPS TITLE`
    CapsTitle,
    /// `Section:`
    ColonHeader,
    /// Ordinary line that passes [`is_meaningful_line`]
    MeaningfulLine,
    /// First line, taken as-is
    FirstLine,
}

impl CandidateKind {
    pub fn priority(self) -> u8 {
        match self {
            CandidateKind::MarkdownHeader => 10,
            CandidateKind::CapsTitle => 8,
            CandidateKind::ColonHeader => 6,
            CandidateKind::MeaningfulLine => 5,
            CandidateKind::FirstLine => 1,
        }
    }
}

/// A possible description found in the content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub kind: CandidateKind,
}

impl Candidate {
    fn new(text: impl Into<String>, kind: CandidateKind) -> Self {
        Self { text: text.into(), kind }
    }

    pub fn priority(&self) -> u8 {
        self.kind.priority()
    }
}

/// Collect every candidate in scan order
pub fn candidates(raw_text: &str) -> Vec<Candidate> {
    let lines: Vec<&str> = raw_text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let Some(first) = lines.first() else {
        return Vec::new();
    };

    let mut found = Vec::new();

    for line in lines.iter().take(TITLE_SCAN_LINES) {
        let words = line.split_whitespace().count();

        if line.starts_with('#') {
            let header = line.trim_start_matches('#').trim();
            found.push(Candidate::new(header, CandidateKind::MarkdownHeader));
        } else if is_all_caps(line) && words <= 6 {
            found.push(Candidate::new(title_case(line), CandidateKind::CapsTitle));
        } else if line.ends_with(':') && words <= 4 {
            found.push(Candidate::new(line.trim_end_matches(':'), CandidateKind::ColonHeader));
        }
    }

    if found.is_empty() {
        found.extend(
            lines
                .iter()
                .take(MEANINGFUL_SCAN_LINES)
                .filter(|l| is_meaningful_line(l))
                .map(|l| Candidate::new(*l, CandidateKind::MeaningfulLine)),
        );
    }

    if found.is_empty() {
        found.push(Candidate::new(*first, CandidateKind::FirstLine));
    }

    found
}

/// Pick the best candidate text, or `None` when the content has no lines.
///
/// Ties go to the earliest candidate.
pub fn scan(raw_text: &str) -> Option<String> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates(raw_text) {
        tracing::debug!("Candidate (priority {}): {:?}", candidate.priority(), candidate.text);
        let better = best.as_ref().map_or(true, |b| candidate.priority() > b.priority());
        if better {
            best = Some(candidate);
        }
    }
    best.map(|c| c.text)
}

/// Check if a line contains meaningful content for a filename
pub fn is_meaningful_line(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    if UNINFORMATIVE.is_match(&lower) {
        return false;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 || words.len() > 10 {
        return false;
    }

    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    total_chars as f64 / words.len() as f64 >= 2.0
}

/// True when the text has cased letters and none of them are lowercase
pub(crate) fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Capitalize the first letter of each word and lowercase the rest
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
