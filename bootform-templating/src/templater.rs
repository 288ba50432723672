//! Scope-stacked store of named markup patterns.
//!
//! Patterns contain `{{placeholder}}` slots substituted from a variable map.
//! Formatting is total: an unknown template name renders the empty string and
//! unknown placeholders render empty, so callers can build fallback chains on
//! top of [`StringTemplater::get`] without a missing-template failure mode.

use std::ops::{Deref, DerefMut};
use std::path::Path;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{Result, TemplatingError};

/// Named template patterns, in insertion order.
pub type TemplateSet = IndexMap<String, String>;

/// Substitution variables for a single format call.
pub type TemplateVars = IndexMap<String, String>;

/// Build a [`TemplateSet`] from `(name, pattern)` pairs.
pub fn template_set<'a, I>(entries: I) -> TemplateSet
where
    I: IntoIterator<Item = &'a (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .map(|(name, pattern)| (name.to_string(), pattern.to_string()))
        .collect()
}

/// A template store with a scope stack.
///
/// `push()` snapshots the current set; `add()` and `load()` merge definitions
/// into it key-by-key (later definitions win per key, never wholesale);
/// `pop()` restores the snapshot. Pushes and pops must balance — the
/// [`scope`](Self::scope) guard enforces this on every exit path.
#[derive(Debug, Clone, Default)]
pub struct StringTemplater {
    current: TemplateSet,
    saved: Vec<TemplateSet>,
}

impl StringTemplater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: TemplateSet) -> Self {
        Self {
            current: templates,
            saved: Vec::new(),
        }
    }

    /// Look up a pattern. Absence is not an error.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.current.get(name).map(String::as_str)
    }

    /// Merge definitions into the current scope, key-by-key.
    pub fn add(&mut self, templates: TemplateSet) {
        for (name, pattern) in templates {
            self.current.insert(name, pattern);
        }
    }

    /// Load a TOML table of `name = "pattern"` definitions into the current
    /// scope.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path).map_err(|source| TemplatingError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let templates: TemplateSet =
            toml::from_str(&raw).map_err(|source| TemplatingError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        trace!(path = %path.display(), count = templates.len(), "loaded template file");
        self.add(templates);
        Ok(())
    }

    /// Snapshot the current scope.
    pub fn push(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Restore the most recent snapshot. A pop with no matching push is a
    /// no-op; balance is normally maintained by [`scope`](Self::scope).
    pub fn pop(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }

    /// Push a scope that pops when the returned guard drops, on every exit
    /// path including early returns.
    pub fn scope(&mut self) -> ScopedTemplates<'_> {
        self.push();
        ScopedTemplates { templater: self }
    }

    /// Current scope depth, i.e. the number of unmatched pushes.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Render the named template with the given variables. Unknown template
    /// names and unknown placeholders render empty.
    pub fn format(&self, name: &str, vars: &TemplateVars) -> String {
        match self.get(name) {
            Some(pattern) => substitute(pattern, vars),
            None => String::new(),
        }
    }
}

/// Drop guard for a pushed template scope.
pub struct ScopedTemplates<'a> {
    templater: &'a mut StringTemplater,
}

impl Deref for ScopedTemplates<'_> {
    type Target = StringTemplater;

    fn deref(&self) -> &StringTemplater {
        self.templater
    }
}

impl DerefMut for ScopedTemplates<'_> {
    fn deref_mut(&mut self) -> &mut StringTemplater {
        self.templater
    }
}

impl Drop for ScopedTemplates<'_> {
    fn drop(&mut self) {
        self.templater.pop();
    }
}

fn substitute(pattern: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                if let Some(value) = vars.get(name) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated placeholder: emit the tail literally.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(entries: &[(&str, &str)]) -> TemplateVars {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn templater() -> StringTemplater {
        StringTemplater::with_templates(template_set(&[
            ("error", "<div class=\"invalid-feedback\">{{content}}</div>"),
            ("label", "<label{{attrs}}>{{text}}</label>"),
        ]))
    }

    #[test]
    fn format_substitutes_named_placeholders() {
        let t = templater();
        let html = t.format("error", &vars(&[("content", "Required")]));
        assert_eq!(html, "<div class=\"invalid-feedback\">Required</div>");
    }

    #[test]
    fn unknown_placeholders_render_empty() {
        let t = templater();
        let html = t.format("label", &vars(&[("text", "Name")]));
        assert_eq!(html, "<label>Name</label>");
    }

    #[test]
    fn unknown_template_renders_empty() {
        let t = templater();
        assert_eq!(t.format("missing", &TemplateVars::new()), "");
        assert!(t.get("missing").is_none());
    }

    #[test]
    fn repeated_placeholder_substitutes_everywhere() {
        let t = StringTemplater::with_templates(template_set(&[("echo", "{{x}} and {{x}}")]));
        assert_eq!(t.format("echo", &vars(&[("x", "a")])), "a and a");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let t = StringTemplater::with_templates(template_set(&[("bad", "a {{oops")]));
        assert_eq!(t.format("bad", &TemplateVars::new()), "a {{oops");
    }

    #[test]
    fn push_add_pop_restores_prior_definitions() {
        let mut t = templater();
        t.push();
        t.add(template_set(&[("error", "X")]));
        assert_eq!(t.get("error"), Some("X"));
        t.pop();
        assert_eq!(
            t.get("error"),
            Some("<div class=\"invalid-feedback\">{{content}}</div>")
        );
    }

    #[test]
    fn add_merges_key_by_key() {
        let mut t = templater();
        t.add(template_set(&[("help", "<small>{{content}}</small>")]));
        // Pre-existing keys survive a merge that does not name them.
        assert!(t.get("error").is_some());
        assert!(t.get("label").is_some());
        assert_eq!(t.get("help"), Some("<small>{{content}}</small>"));
    }

    #[test]
    fn pop_without_push_is_a_noop() {
        let mut t = templater();
        t.pop();
        assert_eq!(t.depth(), 0);
        assert!(t.get("error").is_some());
    }

    #[test]
    fn scope_guard_pops_on_drop() {
        let mut t = templater();
        {
            let mut scope = t.scope();
            scope.add(template_set(&[("error", "X")]));
            assert_eq!(scope.get("error"), Some("X"));
            assert_eq!(scope.depth(), 1);
        }
        assert_eq!(t.depth(), 0);
        assert_eq!(
            t.get("error"),
            Some("<div class=\"invalid-feedback\">{{content}}</div>")
        );
    }

    #[test]
    fn scopes_nest_lifo() {
        let mut t = templater();
        let mut outer = t.scope();
        outer.add(template_set(&[("error", "outer")]));
        {
            let mut inner = outer.scope();
            inner.add(template_set(&[("error", "inner")]));
            assert_eq!(inner.get("error"), Some("inner"));
        }
        assert_eq!(outer.get("error"), Some("outer"));
        drop(outer);
        assert!(t.get("error").unwrap().starts_with("<div"));
    }

    #[test]
    fn load_reads_toml_definitions() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "error = 'from-file'").unwrap();
        writeln!(file, "custom = '<p>{{{{content}}}}</p>'").unwrap();

        let mut t = templater();
        t.load(file.path()).unwrap();
        assert_eq!(t.get("error"), Some("from-file"));
        assert_eq!(
            t.format("custom", &vars(&[("content", "hi")])),
            "<p>hi</p>"
        );
    }

    #[test]
    fn load_missing_file_errors() {
        let mut t = templater();
        let err = t.load(Path::new("/nonexistent/templates.toml")).unwrap_err();
        assert!(err.to_string().contains("templates.toml"));
    }
}
