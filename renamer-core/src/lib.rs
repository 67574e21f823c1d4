//! Renamer - date-prefixed, content-aware file names
//!
//! Renames files to `YYYY-MM-DD - Description.ext`. The date comes from the
//! file's modification time, the description from its content (plain text,
//! markdown or PDF) unless the original name is already better.

pub mod config;
pub mod error;
pub mod extract;
pub mod plan;
pub mod renamer;
pub mod resolve;
pub mod sanitize;
pub mod scan;
pub mod score;
pub mod truncate;

pub use config::{RenameConfig, Separator};
pub use error::{RenameError, Result};
pub use extract::{extract_raw_text, ContentKind, PdfDocument, PdfSource, RawContent};
pub use plan::{PlanAction, RenamePlan, RunStats, SkipReason};
pub use renamer::{date_prefix, is_already_renamed, Renamer};
pub use resolve::resolve_collision;
pub use sanitize::clean;
pub use scan::{is_meaningful_line, scan, Candidate, CandidateKind};
pub use score::{arbitrate, choose_description, score_description, ScoredDescription, Verdict, Winner};
pub use truncate::smart_truncate;

use std::path::Path;

/// Characters read from the start of a text file
pub const TEXT_READ_LIMIT: usize = 1000;

/// Default limit for a content-derived description
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 80;

/// Default limit for a complete filename
pub const DEFAULT_MAX_FILENAME_LEN: usize = 200;

/// Description for a file using default limits
pub fn get_file_description(path: &Path, separator: Separator) -> String {
    Renamer::new(RenameConfig::new().with_separator(separator)).describe(path)
}
