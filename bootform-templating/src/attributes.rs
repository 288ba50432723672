//! HTML attribute bags and CSS class lists.
//!
//! `ClassList` is the class-merge primitive the whole composition engine
//! leans on: injection is idempotent and keeps the order classes were first
//! seen. `Attributes` is an ordered attribute bag with the `class` key
//! special-cased into a `ClassList`, serializing to escaped ` key="value"`
//! pairs with a leading space (patterns embed it as `<div{{attrs}}>`).

use std::fmt;

use indexmap::IndexMap;

/// Escape a string for use inside an HTML attribute value or text node.
pub fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An ordered, deduplicated CSS class list.
///
/// Injecting a class that is already present is a no-op; classes keep the
/// order in which they were first seen. Both operations are total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated class string, e.g. `"form-group row"`.
    pub fn parse(classes: &str) -> Self {
        let mut list = Self::new();
        list.inject([classes]);
        list
    }

    /// Merge classes into the list. Each item may itself be a
    /// whitespace-separated class string. Already-present classes are
    /// skipped; new classes append in the given order.
    pub fn inject<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in classes {
            for class in item.as_ref().split_whitespace() {
                if !self.classes.iter().any(|c| c == class) {
                    self.classes.push(class.to_string());
                }
            }
        }
    }

    /// Whether any of the candidate classes is present.
    pub fn has_any<I, S>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates.into_iter().any(|candidate| {
            candidate
                .as_ref()
                .split_whitespace()
                .any(|class| self.contains(class))
        })
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Map every class through `f`, keeping order and dropping duplicates
    /// the mapping may introduce.
    pub fn map<F>(&mut self, f: F)
    where
        F: Fn(&str) -> String,
    {
        let mapped: Vec<String> = self.classes.iter().map(|c| f(c)).collect();
        self.classes.clear();
        self.inject(mapped);
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.classes.join(" "))
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        list.inject(iter);
        list
    }
}

/// An ordered HTML attribute bag.
///
/// The `class` attribute is held as a [`ClassList`]; everything else is a
/// name → value pair in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    classes: ClassList,
    attrs: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute. `class` is routed into the class list.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        if name == "class" {
            self.classes.inject([value.into()]);
        } else {
            self.attrs.insert(name.to_string(), value.into());
        }
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.attrs.shift_remove(name)
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassList {
        &mut self.classes
    }

    /// Take the class list out of the bag, leaving it empty.
    pub fn take_classes(&mut self) -> ClassList {
        std::mem::take(&mut self.classes)
    }

    pub fn inject_classes<I, S>(&mut self, classes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.classes.inject(classes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.attrs.is_empty()
    }

    /// Serialize to ` key="value"` pairs with a leading space per attribute,
    /// class first, values escaped. Names listed in `exclude` are skipped.
    /// Returns the empty string for an empty bag.
    pub fn render(&self, exclude: &[&str]) -> String {
        let mut out = String::new();
        if !self.classes.is_empty() && !exclude.contains(&"class") {
            out.push_str(&format!(" class=\"{}\"", html_escape(&self.classes.to_string())));
        }
        for (name, value) in &self.attrs {
            if exclude.contains(&name.as_str()) {
                continue;
            }
            out.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
        }
        out
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_is_idempotent() {
        let mut list = ClassList::parse("a");
        list.inject(["a"]);
        assert_eq!(list.to_string(), "a");
    }

    #[test]
    fn inject_appends_new_classes_in_order() {
        let mut list = ClassList::parse("a");
        list.inject(["b"]);
        assert_eq!(list.to_string(), "a b");

        list.inject(["d c", "a"]);
        assert_eq!(list.to_string(), "a b d c");
    }

    #[test]
    fn inject_splits_space_separated_strings() {
        let mut list = ClassList::new();
        list.inject(["form-group row", "row"]);
        assert_eq!(list.to_string(), "form-group row");
    }

    #[test]
    fn has_any_does_not_mutate() {
        let list = ClassList::parse("form-horizontal custom");
        assert!(list.has_any(["form-horizontal"]));
        assert!(list.has_any(["missing", "custom"]));
        assert!(!list.has_any(["form-inline"]));
        assert_eq!(list.to_string(), "form-horizontal custom");
    }

    #[test]
    fn attributes_render_class_first_and_escape() {
        let mut attrs = Attributes::new();
        attrs.set("data-label", "a \"b\" & c");
        attrs.set("class", "x y");
        assert_eq!(
            attrs.render(&[]),
            " class=\"x y\" data-label=\"a &quot;b&quot; &amp; c\""
        );
    }

    #[test]
    fn attributes_render_exclusions() {
        let mut attrs = Attributes::new();
        attrs.set("class", "x");
        attrs.set("id", "the-id");
        attrs.set("content", "nope");
        assert_eq!(attrs.render(&["class", "content"]), " id=\"the-id\"");
    }

    #[test]
    fn empty_bag_renders_empty() {
        assert_eq!(Attributes::new().render(&[]), "");
    }

    #[test]
    fn class_routed_into_class_list() {
        let mut attrs = Attributes::new();
        attrs.set("class", "a");
        attrs.set("class", "b a");
        assert_eq!(attrs.classes().to_string(), "a b");
        assert!(attrs.get("class").is_none());
    }

    #[test]
    fn map_rewrites_classes() {
        let mut list = ClassList::parse("primary lg");
        list.map(|c| format!("btn-{c}"));
        assert_eq!(list.to_string(), "btn-primary btn-lg");
    }
}
