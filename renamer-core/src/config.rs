//! Run configuration shared by the orchestrator and the CLI

use crate::{DEFAULT_MAX_DESCRIPTION_LEN, DEFAULT_MAX_FILENAME_LEN};
use std::fmt;
use std::str::FromStr;

/// Character used to join words in a generated description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Dash,
    Underscore,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Dash => '-',
            Separator::Underscore => '_',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Dash => write!(f, "dash"),
            Separator::Underscore => write!(f, "underscore"),
        }
    }
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dash" => Ok(Separator::Dash),
            "underscore" => Ok(Separator::Underscore),
            other => Err(format!("unknown separator '{}' (expected dash or underscore)", other)),
        }
    }
}

/// Configuration for a rename run
#[derive(Debug, Clone)]
pub struct RenameConfig {
    /// Report planned renames without touching the filesystem
    pub dry_run: bool,
    /// Separator style for descriptions
    pub separator: Separator,
    /// Include hidden files (starting with .) in directory mode
    pub include_hidden: bool,
    /// Re-process files that already carry a date prefix
    pub force_rename: bool,
    /// Emit per-candidate scoring detail
    pub verbose: bool,
    /// Maximum length of a content-derived description
    pub max_description_len: usize,
    /// Maximum length of the complete new filename
    pub max_filename_len: usize,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            separator: Separator::Dash,
            include_hidden: false,
            force_rename: false,
            verbose: false,
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            max_filename_len: DEFAULT_MAX_FILENAME_LEN,
        }
    }
}

impl RenameConfig {
    /// Create a new RenameConfig with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Enable/disable hidden files
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn with_force_rename(mut self, force: bool) -> Self {
        self.force_rename = force;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the description length limit
    pub fn with_max_description_len(mut self, len: usize) -> Self {
        self.max_description_len = len;
        self
    }

    /// Set the full filename length limit
    pub fn with_max_filename_len(mut self, len: usize) -> Self {
        self.max_filename_len = len;
        self
    }

    /// Log filter directive matching the verbosity setting
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
