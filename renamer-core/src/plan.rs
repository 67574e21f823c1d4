//! Per-file rename outcomes

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Dotfile in directory mode without `include_hidden`
    Hidden,
    /// Name already starts with a `YYYY-MM-DD - ` prefix
    AlreadyRenamed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Hidden => write!(f, "hidden file"),
            SkipReason::AlreadyRenamed => write!(f, "already renamed"),
        }
    }
}

/// What happened (or would happen) to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    Rename,
    Skip(SkipReason),
    Error(String),
}

/// Outcome for a single file in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub original_path: PathBuf,
    /// Resolved target name, when one was computed
    pub new_name: Option<String>,
    pub action: PlanAction,
}

impl RenamePlan {
    pub fn rename(original_path: &Path, new_name: String) -> Self {
        Self {
            original_path: original_path.to_path_buf(),
            new_name: Some(new_name),
            action: PlanAction::Rename,
        }
    }

    pub fn skip(original_path: &Path, reason: SkipReason) -> Self {
        Self {
            original_path: original_path.to_path_buf(),
            new_name: None,
            action: PlanAction::Skip(reason),
        }
    }

    pub fn error(original_path: &Path, new_name: Option<String>, message: impl ToString) -> Self {
        Self {
            original_path: original_path.to_path_buf(),
            new_name,
            action: PlanAction::Error(message.to_string()),
        }
    }

    /// Current file name, for log messages
    pub fn original_name(&self) -> String {
        self.original_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.original_path.display().to_string())
    }

    pub fn is_rename(&self) -> bool {
        self.action == PlanAction::Rename
    }

    pub fn is_skip(&self) -> bool {
        matches!(self.action, PlanAction::Skip(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.action, PlanAction::Error(_))
    }

    /// Full path of the renamed file
    pub fn new_path(&self) -> Option<PathBuf> {
        let name = self.new_name.as_ref()?;
        Some(match self.original_path.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        })
    }
}

/// Tally of outcomes in a batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub renamed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl RunStats {
    pub fn from_plans(plans: &[RenamePlan]) -> Self {
        plans.iter().fold(Self::default(), |mut stats, plan| {
            match plan.action {
                PlanAction::Rename => stats.renamed += 1,
                PlanAction::Skip(_) => stats.skipped += 1,
                PlanAction::Error(_) => stats.errors += 1,
            }
            stats
        })
    }
}
