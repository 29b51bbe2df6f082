//! MailTemplate - directory-backed email templates
//!
//! Loads a tree of email template units into a [`Registry`] and renders a
//! unit into its subject, HTML and plain-text outputs. Templates use
//! [Handlebars](https://handlebarsjs.com/) syntax; the HTML part is
//! HTML-escaped, the subject and text parts are not.
//!
//! # Layout
//!
//! ```text
//! templates/
//! └── {key}/
//!     ├── subject.txt   # required
//!     ├── html.html     # required
//!     └── text.txt      # optional
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mailtemplate::{FuncMap, LoaderConfig};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = LoaderConfig::builder()
//!     .root_path("./templates")
//!     .html_funcs(FuncMap::new().with_str_fn("trimSpace", |s| s.trim().to_string()))
//!     .load()?;
//!
//! if let Some(template) = registry.get("resetPassword") {
//!     let out = template.execute(&json!({ "url": "https://example.com/reset-password" }))?;
//!     println!("{}\n{}\n{}", out.subject_str(), out.html_str(), out.text_str());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`loader`] - Directory walk and [`LoaderConfig`] builder
//! - [`registry`] - Concurrency-safe key to template map
//! - [`template`] - Template units and rendering
//! - [`funcs`] - Per-part helper tables
//! - [`diagnostics`] - Non-fatal load diagnostics
//! - [`settings`] - YAML settings file

pub mod diagnostics;
pub mod error;
pub mod funcs;
pub mod key;
pub mod loader;
pub mod registry;
pub mod settings;
pub mod template;

// Re-export commonly used types
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{ExecuteError, LoadError};
pub use funcs::FuncMap;
pub use key::TemplateKey;
pub use loader::{LoaderBuilder, LoaderConfig, load};
pub use registry::Registry;
pub use settings::Settings;
pub use template::{HTML_FILE, Part, Rendered, SUBJECT_FILE, TEXT_FILE, Template};
