//! Word-preserving truncation

/// Characters treated as word boundaries
const BOUNDARIES: [char; 3] = [' ', '-', '_'];

/// Fraction of `max_length` a boundary cut has to keep
const MIN_KEEP_RATIO: f64 = 0.7;

/// Shorten `text` to at most `max_length` characters without splitting a word.
///
/// Cuts at the rightmost space, dash or underscore inside the first
/// `max_length` characters when that boundary lies past 70% of the limit.
/// Otherwise falls back to a hard cut at `max_length`.
pub fn smart_truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let prefix: Vec<char> = text.chars().take(max_length).collect();
    let last_boundary = prefix.iter().rposition(|c| BOUNDARIES.contains(c));

    match last_boundary {
        Some(idx) if idx as f64 > max_length as f64 * MIN_KEEP_RATIO => {
            prefix[..idx].iter().collect()
        }
        _ => prefix.into_iter().collect(),
    }
}
