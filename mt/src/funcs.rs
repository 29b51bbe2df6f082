//! Function-extension tables
//!
//! A [`FuncMap`] is a named set of Handlebars helpers made available to one
//! template part (subject, HTML or text). Any [`HelperDef`] can be inserted,
//! including helpers declared with [`handlebars::handlebars_helper!`]. Plain
//! string transforms can be added with [`FuncMap::with_str_fn`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, JsonRender, Output, RenderContext, RenderError,
    RenderErrorReason, ScopedJson,
};
use serde_json::Value;
use tracing::debug;

/// Helper as stored in a [`FuncMap`]; shared by every template of a load
pub type SharedHelper = Arc<dyn HelperDef + Send + Sync + 'static>;

/// Named helpers for a single template part
#[derive(Default)]
pub struct FuncMap {
    helpers: BTreeMap<String, SharedHelper>,
}

impl FuncMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a helper, replacing any helper already registered under `name`
    pub fn with(mut self, name: impl Into<String>, helper: impl HelperDef + Send + Sync + 'static) -> Self {
        self.insert(name, helper);
        self
    }

    /// Add a `&str -> String` function as a helper taking one parameter
    ///
    /// Non-string parameters are rendered to their JSON text form before the
    /// function is applied.
    pub fn with_str_fn<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.with(name, StrHelper(f))
    }

    pub fn insert(&mut self, name: impl Into<String>, helper: impl HelperDef + Send + Sync + 'static) {
        let name = name.into();
        debug!(%name, "FuncMap::insert: called");
        self.helpers.insert(name, Arc::new(helper));
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    /// Register every helper in `hbs`
    ///
    /// Helpers are shared, so the same table can populate any number of
    /// registries.
    pub(crate) fn register_into(&self, hbs: &mut Handlebars<'static>) {
        debug!(count = self.helpers.len(), "FuncMap::register_into: called");
        for (name, helper) in &self.helpers {
            hbs.register_helper(name, Box::new(Shared(Arc::clone(helper))));
        }
    }
}

impl fmt::Debug for FuncMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncMap")
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Registers a shared helper by delegating to it
struct Shared(SharedHelper);

impl HelperDef for Shared {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        self.0.call_inner(h, r, ctx, rc)
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        self.0.call(h, r, ctx, rc, out)
    }
}

/// Adapts a string function to a Handlebars helper
struct StrHelper<F>(F);

impl<F> HelperDef for StrHelper<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let param = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("str_fn", 0))?;
        let output = match param.value() {
            Value::String(s) => (self.0)(s.as_str()),
            other => (self.0)(other.render().as_str()),
        };
        Ok(ScopedJson::Derived(Value::String(output)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handlebars::handlebars_helper;
    use serde_json::json;

    handlebars_helper!(shout: |s: String| format!("{}!", s));

    #[test]
    fn test_func_map_insert_and_names() {
        let funcs = FuncMap::new()
            .with("shout", shout)
            .with_str_fn("toUpper", |s| s.to_uppercase());
        assert_eq!(funcs.len(), 2);
        assert_eq!(funcs.names().collect::<Vec<_>>(), vec!["shout", "toUpper"]);
    }

    #[test]
    fn test_func_map_replaces_same_name() {
        let funcs = FuncMap::new()
            .with_str_fn("f", |s| s.to_uppercase())
            .with_str_fn("f", |s| s.to_lowercase());
        assert_eq!(funcs.len(), 1);
    }

    #[test]
    fn test_str_fn_renders_through_handlebars() {
        let mut hbs = Handlebars::new();
        FuncMap::new()
            .with_str_fn("toUpper", |s| s.to_uppercase())
            .register_into(&mut hbs);
        let out = hbs
            .render_template("hello {{toUpper name}} #{{toUpper n}}", &json!({"name": "Jane", "n": 7}))
            .unwrap();
        assert_eq!(out, "hello JANE #7");
    }

    #[test]
    fn test_str_fn_output_is_escaped_by_html_engine() {
        let mut hbs = Handlebars::new();
        FuncMap::new()
            .with_str_fn("wrap", |s| format!("<{}>", s))
            .register_into(&mut hbs);
        let out = hbs.render_template("{{wrap name}}", &json!({"name": "b"})).unwrap();
        assert_eq!(out, "&lt;b&gt;");
    }

    #[test]
    fn test_str_fn_missing_param_is_render_error() {
        let mut hbs = Handlebars::new();
        FuncMap::new()
            .with_str_fn("toUpper", |s| s.to_uppercase())
            .register_into(&mut hbs);
        assert!(hbs.render_template("{{toUpper}}", &json!({})).is_err());
    }

    #[test]
    fn test_same_table_registers_into_many_registries() {
        let funcs = FuncMap::new().with("shout", shout);
        let mut first = Handlebars::new();
        let mut second = Handlebars::new();
        funcs.register_into(&mut first);
        funcs.register_into(&mut second);
        let data = json!({"v": "hi"});
        assert_eq!(first.render_template("{{shout v}}", &data).unwrap(), "hi!");
        assert_eq!(second.render_template("{{shout v}}", &data).unwrap(), "hi!");
    }

    #[test]
    fn test_debug_lists_names() {
        let funcs = FuncMap::new().with("shout", shout);
        assert!(format!("{:?}", funcs).contains("shout"));
    }
}
