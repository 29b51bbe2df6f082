//! Loader settings file
//!
//! The parts of a [`LoaderConfig`](crate::LoaderConfig) that can live in a
//! YAML file. Function tables are code and get added to the builder returned
//! by [`Settings::into_builder`].

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnostics::TracingSink;
use crate::loader::LoaderBuilder;

/// Loader settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one subdirectory per template. Relative paths are
    /// resolved against the directory of the settings file.
    #[serde(rename = "root-path")]
    pub root_path: PathBuf,

    /// Fail rendering on access to missing fields
    #[serde(rename = "strict-mode")]
    pub strict_mode: bool,

    /// Log a warning when a template has no text part
    #[serde(rename = "warn-missing-text")]
    pub warn_missing_text: bool,
}

impl Settings {
    /// Load settings from a YAML file
    ///
    /// A relative `root-path` is anchored at the file's directory, so a
    /// settings file can sit next to its template tree. `~/` paths are left
    /// for the loader to expand.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(?path, "Settings::load: called");
        let content =
            fs::read_to_string(path).context(format!("Failed to read settings file {}", path.display()))?;
        let mut settings: Self =
            serde_yaml::from_str(&content).context(format!("Failed to parse settings file {}", path.display()))?;

        if let Some(base) = path.parent() {
            settings.root_path = anchor(base, &settings.root_path);
        }

        tracing::info!("Loaded settings from: {}", path.display());
        Ok(settings)
    }

    /// Loader builder preset from these settings
    pub fn into_builder(self) -> LoaderBuilder {
        let builder = crate::LoaderConfig::builder()
            .root_path(self.root_path)
            .strict_mode(self.strict_mode);
        if self.warn_missing_text {
            builder.diagnostics(TracingSink)
        } else {
            builder
        }
    }
}

/// `root` resolved against `base` unless it is absolute or home-relative
fn anchor(base: &Path, root: &Path) -> PathBuf {
    if root.is_absolute() || root.starts_with("~") {
        return root.to_path_buf();
    }
    base.join(root)
}
