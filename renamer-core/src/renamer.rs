//! Rename orchestration
//!
//! Per file: date prefix from the modification time, skip rules, content
//! description, length budget, collision resolution, then the rename itself
//! (or just a log line in dry-run mode).

use crate::config::RenameConfig;
use crate::extract::{extract_raw_text, ContentKind, RawContent};
use crate::plan::{RenamePlan, RunStats, SkipReason};
use crate::resolve::resolve_collision;
use crate::sanitize::clean;
use crate::scan::scan;
use crate::score::arbitrate;
use crate::truncate::smart_truncate;
use crate::{RenameError, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Separator between date prefix and description
const PREFIX_SEPARATOR: &str = " - ";

static ALREADY_RENAMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} - ").expect("valid regex"));

/// Whether a filename already carries a `YYYY-MM-DD - ` prefix
pub fn is_already_renamed(name: &str) -> bool {
    ALREADY_RENAMED.is_match(name)
}

/// Format a file's last-modified time as `YYYY-MM-DD` (local time)
pub fn date_prefix(path: &Path) -> Result<String> {
    let modified = std::fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(local.format("%Y-%m-%d").to_string())
}

/// File name without its final extension
fn original_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final extension including the dot, or empty
fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Renames files according to a [`RenameConfig`]
#[derive(Debug, Clone, Default)]
pub struct Renamer {
    config: RenameConfig,
}

impl Renamer {
    pub fn new(config: RenameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Process a file or every file in a directory
    pub fn run(&self, path: &Path) -> Result<Vec<RenamePlan>> {
        if !path.exists() {
            return Err(RenameError::PathNotFound(path.to_path_buf()));
        }

        if path.is_file() {
            tracing::info!("Processing file: {}", path.display());
            self.rename_file(path).map(|plan| vec![plan])
        } else if path.is_dir() {
            tracing::info!("Processing directory: {}", path.display());
            self.rename_directory(path)
        } else {
            Err(RenameError::NotAFile(path.to_path_buf()))
        }
    }

    /// Rename a single file
    pub fn rename_file(&self, path: &Path) -> Result<RenamePlan> {
        if !path.exists() {
            return Err(RenameError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(RenameError::NotAFile(path.to_path_buf()));
        }

        let plan = self.process(path, &mut HashSet::new());
        if plan.is_skip() {
            tracing::info!("File already renamed: {}", plan.original_name());
        }
        Ok(plan)
    }

    /// Rename every file directly inside `directory` (no recursion)
    pub fn rename_directory(&self, directory: &Path) -> Result<Vec<RenamePlan>> {
        if !directory.exists() {
            return Err(RenameError::PathNotFound(directory.to_path_buf()));
        }
        if !directory.is_dir() {
            return Err(RenameError::NotADirectory(directory.to_path_buf()));
        }

        let files: Vec<_> = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.into_path()),
                Err(e) => {
                    tracing::warn!("Could not read directory entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();

        tracing::debug!("Found {} files in {}", files.len(), directory.display());

        let mut used_names = HashSet::new();
        let mut plans = Vec::with_capacity(files.len());

        for path in files {
            let name = file_name(&path);
            if !self.config.include_hidden && name.starts_with('.') {
                tracing::debug!("Skipping hidden file: {}", name);
                plans.push(RenamePlan::skip(&path, SkipReason::Hidden));
                continue;
            }

            let plan = self.process(&path, &mut used_names);
            if plan.is_skip() {
                tracing::debug!("Skipping already renamed file: {}", name);
            }
            plans.push(plan);
        }

        let stats = RunStats::from_plans(&plans);
        tracing::info!(
            "Done: {} {}, {} skipped, {} errors",
            stats.renamed,
            if self.config.dry_run { "to rename" } else { "renamed" },
            stats.skipped,
            stats.errors
        );

        Ok(plans)
    }

    /// Content-aware description for a file, falling back to its base name
    pub fn describe(&self, path: &Path) -> String {
        let original = original_stem(path);

        match self.content_description(path, &original) {
            Ok(content) => {
                let verdict = arbitrate(&original, &content, self.config.separator);
                verdict.into_chosen()
            }
            Err(e) => {
                tracing::warn!("{}", e);
                original
            }
        }
    }

    /// Cleaned, length-limited description taken from the file content
    fn content_description(&self, path: &Path, original: &str) -> Result<String> {
        let text = match extract_raw_text(path, ContentKind::from_path(path))? {
            RawContent::Title(title) => title,
            RawContent::Text(text) => scan(&text).unwrap_or_else(|| original.to_string()),
        };

        let cleaned = clean(&text, self.config.separator);
        Ok(smart_truncate(&cleaned, self.config.max_description_len))
    }

    /// Build `"{date} - {description}{ext}"` within the filename length limit
    pub fn build_name(&self, date_prefix: &str, description: &str, extension: &str) -> String {
        let name = format!("{}{}{}{}", date_prefix, PREFIX_SEPARATOR, description, extension);
        let max = self.config.max_filename_len;
        if name.chars().count() <= max {
            return name;
        }

        let fixed = date_prefix.chars().count() + PREFIX_SEPARATOR.len() + extension.chars().count();
        let available = max.saturating_sub(fixed);
        let description = smart_truncate(description, available);
        format!("{}{}{}{}", date_prefix, PREFIX_SEPARATOR, description, extension)
    }

    /// Plan and (unless dry-run) perform the rename of one file
    fn process(&self, path: &Path, used_names: &mut HashSet<String>) -> RenamePlan {
        let name = file_name(path);

        let prefix = match date_prefix(path) {
            Ok(prefix) => prefix,
            Err(e) => {
                tracing::error!("Error processing {}: {}", name, e);
                return RenamePlan::error(path, None, e);
            }
        };

        if !self.config.force_rename && is_already_renamed(&name) {
            return RenamePlan::skip(path, SkipReason::AlreadyRenamed);
        }

        let description = self.describe(path);
        let base_name = self.build_name(&prefix, &description, &dotted_extension(path));

        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        let new_name = resolve_collision(&base_name, used_names, directory);
        used_names.insert(new_name.clone());

        if self.config.dry_run {
            tracing::info!("Would rename: {} -> {}", name, new_name);
            return RenamePlan::rename(path, new_name);
        }

        match std::fs::rename(path, directory.join(&new_name)) {
            Ok(()) => {
                tracing::info!("Renamed: {} -> {}", name, new_name);
                RenamePlan::rename(path, new_name)
            }
            Err(source) => {
                let err = RenameError::RenameFailed {
                    from: path.to_path_buf(),
                    to: new_name.clone(),
                    source,
                };
                tracing::error!("Error processing {}: {}", name, err);
                RenamePlan::error(path, Some(new_name), err)
            }
        }
    }
}
