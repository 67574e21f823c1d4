//! Filename-safe text cleaning
//!
//! Every non-alphanumeric character becomes the chosen separator, runs of
//! separators collapse to one, and separators are trimmed from both ends.

use crate::config::Separator;

/// Clean text so it can be used as a filename description
pub fn clean(text: &str, separator: Separator) -> String {
    let sep = separator.as_char();
    let mut cleaned = String::with_capacity(text.len());
    let mut prev_sep = true;

    for c in text.chars() {
        if c.is_alphanumeric() {
            cleaned.push(c);
            prev_sep = false;
        } else if !prev_sep {
            cleaned.push(sep);
            prev_sep = true;
        }
    }

    if cleaned.ends_with(sep) {
        cleaned.pop();
    }
    cleaned
}
