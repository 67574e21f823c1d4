//! Filename collision resolution

use std::collections::HashSet;
use std::path::Path;

/// Counter value after which the resolver gives up on numbered suffixes
const MAX_COUNTER: u32 = 1000;

/// Return a filename that is neither in `used_names` nor present in `directory`.
///
/// Collisions get `-2`, `-3`, ... appended to the stem, before the extension.
pub fn resolve_collision(base_name: &str, used_names: &HashSet<String>, directory: &Path) -> String {
    let is_taken = |name: &str| used_names.contains(name) || directory.join(name).exists();

    if !is_taken(base_name) {
        return base_name.to_string();
    }

    let (stem, extension) = split_extension(base_name);

    for counter in 2..=MAX_COUNTER {
        let candidate = format!("{}-{}{}", stem, counter, extension);
        if !is_taken(&candidate) {
            return candidate;
        }
    }

    let unique_id = uuid::Uuid::new_v4().simple().to_string();
    tracing::warn!("Exhausted numbered suffixes for {}, using random suffix", base_name);
    format!("{}-{}{}", stem, &unique_id[..8], extension)
}

/// Split on the last `.`; the extension keeps its dot
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}
