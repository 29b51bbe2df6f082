//! Loaded email templates
//!
//! A [`Template`] is one template unit: a required subject part, a required
//! HTML part and an optional plain-text part. Each part lives alone in its
//! own Handlebars registry, so a unit cannot reach another unit's parts as
//! partials.

use std::borrow::Cow;
use std::fmt;

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::error::ExecuteError;
use crate::key::TemplateKey;

/// Name of the subject template file
pub const SUBJECT_FILE: &str = "subject.txt";

/// Name of the HTML template file
pub const HTML_FILE: &str = "html.html";

/// Name of the text template file
pub const TEXT_FILE: &str = "text.txt";

/// One of the three parts of a template unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Subject,
    Html,
    Text,
}

impl Part {
    /// File the part is loaded from, relative to the template directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Part::Subject => SUBJECT_FILE,
            Part::Html => HTML_FILE,
            Part::Text => TEXT_FILE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Part::Subject => "subject",
            Part::Html => "html",
            Part::Text => "text",
        }
    }

    /// Whether a load fails when the part's file is absent
    pub fn is_required(&self) -> bool {
        !matches!(self, Part::Text)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of [`Template::execute`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub subject: Vec<u8>,
    pub html: Vec<u8>,
    /// Empty when the template has no text part
    pub text: Vec<u8>,
}

impl Rendered {
    pub fn subject_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.subject)
    }

    pub fn html_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.html)
    }

    pub fn text_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    pub fn part(&self, part: Part) -> &[u8] {
        match part {
            Part::Subject => &self.subject,
            Part::Html => &self.html,
            Part::Text => &self.text,
        }
    }
}

/// An email template made up of a subject, an HTML part and a text part
///
/// Templates are immutable once loaded. `execute` takes `&self` and the
/// underlying registries are only read while rendering, so a template can be
/// rendered from many threads at once.
pub struct Template {
    key: TemplateKey,
    subject: Handlebars<'static>,
    html: Handlebars<'static>,
    text: Option<Handlebars<'static>>,
}

impl Template {
    /// Each registry must hold a template named after `key`
    pub(crate) fn new(
        key: TemplateKey,
        subject: Handlebars<'static>,
        html: Handlebars<'static>,
        text: Option<Handlebars<'static>>,
    ) -> Self {
        Self {
            key,
            subject,
            html,
            text,
        }
    }

    pub fn key(&self) -> &TemplateKey {
        &self.key
    }

    /// Whether the optional text part was loaded
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Render the subject, HTML and text parts, in that order, with `data`
    ///
    /// Rendering stops at the first failing part. The returned error holds
    /// whatever was produced up to that point. A template without a text part
    /// renders an empty text buffer.
    pub fn execute<T: Serialize>(&self, data: &T) -> Result<Rendered, ExecuteError> {
        debug!(key = %self.key, has_text = self.has_text(), "Template::execute: called");
        let mut rendered = Rendered::default();
        let name = self.key.as_str();

        if let Err(e) = self.subject.render_to_write(name, data, &mut rendered.subject) {
            debug!(key = %self.key, "Template::execute: subject failed");
            return Err(self.failure(Part::Subject, rendered, e));
        }

        if let Err(e) = self.html.render_to_write(name, data, &mut rendered.html) {
            debug!(key = %self.key, "Template::execute: html failed");
            return Err(self.failure(Part::Html, rendered, e));
        }

        if let Some(ref text) = self.text {
            if let Err(e) = text.render_to_write(name, data, &mut rendered.text) {
                debug!(key = %self.key, "Template::execute: text failed");
                return Err(self.failure(Part::Text, rendered, e));
            }
        } else {
            debug!(key = %self.key, "Template::execute: no text part, skipping");
        }

        Ok(rendered)
    }

    fn failure(&self, part: Part, partial: Rendered, source: handlebars::RenderError) -> ExecuteError {
        ExecuteError {
            key: self.key.clone(),
            part,
            partial,
            source: Box::new(source),
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("key", &self.key)
            .field("has_text", &self.has_text())
            .finish()
    }
}
