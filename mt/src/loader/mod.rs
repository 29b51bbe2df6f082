//! Template Loader
//!
//! Walks a root directory and loads every direct subdirectory as a template
//! unit. The directory name becomes the template key:
//!
//! ```text
//! templates/
//! ├── resetPassword/
//! │   ├── subject.txt   (required)
//! │   ├── html.html     (required)
//! │   └── text.txt      (optional)
//! └── weeklyUsage/
//!     ├── subject.txt
//!     └── html.html
//! ```
//!
//! Files directly under the root are ignored. A load either returns a
//! registry holding every discovered template or an error; nothing partial.
//! Every part of every unit gets its own Handlebars registry, so units cannot
//! include each other as partials.

mod config;

pub use config::{LoaderBuilder, LoaderConfig};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::LoadError;
use crate::funcs::FuncMap;
use crate::key::TemplateKey;
use crate::registry::Registry;
use crate::template::{Part, Template};

/// Load every template under `config.root_path`
pub fn load(config: LoaderConfig) -> Result<Registry, LoadError> {
    let root = config.resolved_root();
    debug!(?root, strict_mode = config.strict_mode, "load: called");
    let units = discover(&root)?;
    debug!(count = units.len(), "load: discovered template directories");
    let registry = Loader::new(config).load_units(units)?;
    info!("Loaded {} email templates from {}", registry.len(), root.display());
    Ok(registry)
}

/// Direct subdirectories of `root`, keyed by base name
///
/// Directory names must be valid UTF-8 so that keys stay unique.
fn discover(root: &Path) -> Result<Vec<(TemplateKey, PathBuf)>, LoadError> {
    debug!(?root, "discover: called");
    let mut units = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_dir() {
            debug!(path = ?entry.path(), "discover: skipping non-directory");
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            debug!(path = ?entry.path(), "discover: directory name is not UTF-8");
            return Err(LoadError::InvalidKey {
                path: entry.path().to_path_buf(),
            });
        };
        let key = TemplateKey::new(name);
        debug!(%key, "discover: found template directory");
        units.push((key, entry.into_path()));
    }

    Ok(units)
}

/// Per-load state: helper tables and options applied to every unit
struct Loader {
    subject_funcs: FuncMap,
    html_funcs: FuncMap,
    text_funcs: FuncMap,
    strict_mode: bool,
    diagnostics: Option<Box<dyn DiagnosticSink>>,
}

impl Loader {
    fn new(config: LoaderConfig) -> Self {
        debug!(?config, "Loader::new: called");
        let LoaderConfig {
            subject_funcs,
            html_funcs,
            text_funcs,
            diagnostics,
            strict_mode,
            ..
        } = config;

        Self {
            subject_funcs,
            html_funcs,
            text_funcs,
            strict_mode,
            diagnostics,
        }
    }

    /// Load each unit, failing on the first error
    fn load_units(&self, units: Vec<(TemplateKey, PathBuf)>) -> Result<Registry, LoadError> {
        debug!(count = units.len(), "Loader::load_units: called");
        let registry = Registry::new();
        for (key, dir) in units {
            let template = self.load_unit(&key, &dir)?;
            registry.set(key, template);
        }
        Ok(registry)
    }

    /// Parse the parts found in `dir` into a template
    fn load_unit(&self, key: &TemplateKey, dir: &Path) -> Result<Template, LoadError> {
        debug!(%key, ?dir, "Loader::load_unit: called");
        let subject = self.load_required(key, dir, Part::Subject)?;
        let html = self.load_required(key, dir, Part::Html)?;
        let text = self.load_optional(key, dir, Part::Text)?;
        Ok(Template::new(key.clone(), subject, html, text))
    }

    fn load_required(&self, key: &TemplateKey, dir: &Path, part: Part) -> Result<Handlebars<'static>, LoadError> {
        let path = dir.join(part.file_name());
        let source = fs::read_to_string(&path).map_err(|e| read_error(key, part, &path, e))?;
        self.parse(key, part, &path, source)
    }

    /// Registry holding the part, or `None` when its file does not exist
    ///
    /// Only not-found counts as absent. Any other read failure and any parse
    /// failure still abort the load.
    fn load_optional(
        &self,
        key: &TemplateKey,
        dir: &Path,
        part: Part,
    ) -> Result<Option<Handlebars<'static>>, LoadError> {
        let path = dir.join(part.file_name());
        match fs::read_to_string(&path) {
            Ok(source) => self.parse(key, part, &path, source).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(%key, %part, "Loader::load_optional: part absent");
                self.emit(Diagnostic::MissingText {
                    key: key.clone(),
                    path,
                });
                Ok(None)
            }
            Err(e) => Err(read_error(key, part, &path, e)),
        }
    }

    fn parse(&self, key: &TemplateKey, part: Part, path: &Path, source: String) -> Result<Handlebars<'static>, LoadError> {
        debug!(%key, %part, "Loader::parse: called");
        let mut hbs = self.engine(part);
        hbs.register_template_string(key.as_str(), source).map_err(|e| LoadError::Parse {
            key: key.clone(),
            part,
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        Ok(hbs)
    }

    /// Create an empty registry for one part
    ///
    /// Only the HTML registry escapes interpolated values.
    fn engine(&self, part: Part) -> Handlebars<'static> {
        let funcs = match part {
            Part::Subject => &self.subject_funcs,
            Part::Html => &self.html_funcs,
            Part::Text => &self.text_funcs,
        };
        let mut hbs = Handlebars::new();
        if part != Part::Html {
            hbs.register_escape_fn(handlebars::no_escape);
        }
        hbs.set_strict_mode(self.strict_mode);
        funcs.register_into(&mut hbs);
        hbs
    }

    fn emit(&self, diagnostic: Diagnostic) {
        if let Some(ref sink) = self.diagnostics {
            sink.emit(&diagnostic);
        }
    }
}

/// Classify a failed read of a part's source
///
/// Sources are read as UTF-8 text, so a file holding invalid UTF-8 fails as
/// [`LoadError::Read`] rather than being parsed.
fn read_error(key: &TemplateKey, part: Part, path: &Path, e: io::Error) -> LoadError {
    if e.kind() == io::ErrorKind::NotFound {
        debug!(%key, %part, ?path, "read_error: part missing");
        LoadError::MissingRequired {
            key: key.clone(),
            part,
            path: path.to_path_buf(),
            source: e,
        }
    } else {
        LoadError::Read {
            key: key.clone(),
            path: path.to_path_buf(),
            source: e,
        }
    }
}
