//! Load and render error types

use std::path::PathBuf;

use thiserror::Error;

use crate::key::TemplateKey;
use crate::template::{Part, Rendered};

/// Errors that abort a load
///
/// A load is all-or-nothing: any of these means no registry is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to walk template root {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Template directory name is not valid UTF-8: {path}")]
    InvalidKey { path: PathBuf },

    #[error("Template {key}: required {part} file not found: {path}")]
    MissingRequired {
        key: TemplateKey,
        part: Part,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template {key}: failed to read {path}: {source}")]
    Read {
        key: TemplateKey,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template {key}: failed to parse {part} file {path}: {source}")]
    Parse {
        key: TemplateKey,
        part: Part,
        path: PathBuf,
        #[source]
        source: Box<handlebars::TemplateError>,
    },
}

impl LoadError {
    /// Key of the template unit that failed, if the failure belongs to one
    pub fn key(&self) -> Option<&TemplateKey> {
        match self {
            LoadError::Walk { .. } | LoadError::InvalidKey { .. } => None,
            LoadError::MissingRequired { key, .. } | LoadError::Read { key, .. } | LoadError::Parse { key, .. } => {
                Some(key)
            }
        }
    }

    /// Check if this is a missing required file
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::MissingRequired { .. })
    }
}

/// Error returned by [`Template::execute`](crate::Template::execute)
///
/// Output already produced by the parts rendered before the failing one is
/// kept in [`ExecuteError::partial`].
#[derive(Debug, Error)]
#[error("Template {key}: failed to render {part} part: {source}")]
pub struct ExecuteError {
    pub key: TemplateKey,
    pub part: Part,
    pub partial: Rendered,
    #[source]
    pub source: Box<handlebars::RenderError>,
}

impl ExecuteError {
    pub fn into_partial(self) -> Rendered {
        self.partial
    }
}
