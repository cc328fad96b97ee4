use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::CliArgs;

/// Process-wide settings, fixed at startup
#[derive(Debug, PartialEq, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
        }
    }
}

/// `~/Documents/Git`, or a relative fallback when no home is known.
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("Git")
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

impl Config {
    pub fn from_cli(cli_args: CliArgs) -> Self {
        match cli_args.base_dir {
            Some(base_dir) => Self {
                base_dir: expand_home(&base_dir),
            },
            None => Self::default(),
        }
    }

    /// Create the base directory (and parents) if it is missing.
    pub fn ensure_base_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "Failed to create base directory: {}",
                self.base_dir.display()
            )
        })
    }
}
