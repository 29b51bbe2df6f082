//! Loader configuration

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostics::DiagnosticSink;
use crate::error::LoadError;
use crate::funcs::FuncMap;
use crate::registry::Registry;

/// Everything a load needs
///
/// Built once and consumed by [`load`](crate::load); the function tables are
/// moved into the registries created by the load.
#[derive(Default)]
pub struct LoaderConfig {
    /// Directory holding one subdirectory per template. Empty means the
    /// current directory; a leading `~/` is expanded to the home directory.
    pub root_path: PathBuf,

    /// Helpers available to subject templates
    pub subject_funcs: FuncMap,

    /// Helpers available to HTML templates
    pub html_funcs: FuncMap,

    /// Helpers available to text templates
    pub text_funcs: FuncMap,

    /// Receives non-fatal diagnostics, none by default
    pub diagnostics: Option<Box<dyn DiagnosticSink>>,

    /// Fail rendering on access to missing fields
    pub strict_mode: bool,
}

impl LoaderConfig {
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::default()
    }

    /// Root path with `~/` expanded and empty mapped to `.`
    pub fn resolved_root(&self) -> PathBuf {
        resolve_root(&self.root_path)
    }
}

impl fmt::Debug for LoaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderConfig")
            .field("root_path", &self.root_path)
            .field("subject_funcs", &self.subject_funcs)
            .field("html_funcs", &self.html_funcs)
            .field("text_funcs", &self.text_funcs)
            .field("diagnostics", &self.diagnostics.is_some())
            .field("strict_mode", &self.strict_mode)
            .finish()
    }
}

fn resolve_root(root: &Path) -> PathBuf {
    if root.as_os_str().is_empty() {
        debug!("resolve_root: empty root, using current directory");
        return PathBuf::from(".");
    }
    if let Ok(rest) = root.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        debug!(?home, "resolve_root: expanding home directory");
        return home.join(rest);
    }
    root.to_path_buf()
}

/// Builder for [`LoaderConfig`]
#[derive(Debug, Default)]
pub struct LoaderBuilder {
    config: LoaderConfig,
}

impl LoaderBuilder {
    pub fn root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.config.root_path = root_path.into();
        self
    }

    pub fn subject_funcs(mut self, funcs: FuncMap) -> Self {
        self.config.subject_funcs = funcs;
        self
    }

    pub fn html_funcs(mut self, funcs: FuncMap) -> Self {
        self.config.html_funcs = funcs;
        self
    }

    pub fn text_funcs(mut self, funcs: FuncMap) -> Self {
        self.config.text_funcs = funcs;
        self
    }

    pub fn diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.config.diagnostics = Some(Box::new(sink));
        self
    }

    pub fn strict_mode(mut self, strict_mode: bool) -> Self {
        self.config.strict_mode = strict_mode;
        self
    }

    pub fn build(self) -> LoaderConfig {
        self.config
    }

    /// Build the config and load the templates under its root path
    pub fn load(self) -> Result<Registry, LoadError> {
        super::load(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::TracingSink;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.root_path, PathBuf::new());
        assert!(config.subject_funcs.is_empty());
        assert!(config.html_funcs.is_empty());
        assert!(config.text_funcs.is_empty());
        assert!(config.diagnostics.is_none());
        assert!(!config.strict_mode);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = LoaderConfig::builder()
            .root_path("templates")
            .html_funcs(FuncMap::new().with_str_fn("trimSpace", |s| s.trim().to_string()))
            .diagnostics(TracingSink)
            .strict_mode(true)
            .build();
        assert_eq!(config.root_path, PathBuf::from("templates"));
        assert_eq!(config.html_funcs.len(), 1);
        assert!(config.subject_funcs.is_empty());
        assert!(config.diagnostics.is_some());
        assert!(config.strict_mode);
    }

    #[test]
    fn test_resolved_root_empty_is_current_dir() {
        assert_eq!(LoaderConfig::default().resolved_root(), PathBuf::from("."));
    }

    #[test]
    fn test_resolved_root_plain_path_unchanged() {
        let config = LoaderConfig::builder().root_path("/srv/templates").build();
        assert_eq!(config.resolved_root(), PathBuf::from("/srv/templates"));
    }

    #[test]
    fn test_resolved_root_expands_home() {
        let config = LoaderConfig::builder().root_path("~/templates").build();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.resolved_root(), home.join("templates"));
        }
    }

    #[test]
    fn test_debug_hides_sink() {
        let config = LoaderConfig::builder().diagnostics(TracingSink).build();
        let debug = format!("{:?}", config);
        assert!(debug.contains("diagnostics: true"));
    }
}
