//! Widget layer: resolved option set → bare control markup.
//!
//! A widget renders the input element(s) only; labels, groups, and
//! containers are assembled around its output by the helper. Widgets are
//! pure functions over the resolved options and the current template
//! definitions, so per-call template overrides (inline wrappers, nested
//! labels) apply without the widget knowing why.

use bootform_templating::{html_escape, Attributes, StringTemplater, TemplateVars};
use indexmap::IndexMap;

use crate::options::{dom_id, humanize, FieldType, Multiple, ResolvedControl, SelectOption};

/// Renders one control element from its resolved options.
pub trait Widget: std::fmt::Debug + Send + Sync {
    fn render(&self, templater: &StringTemplater, control: &ResolvedControl) -> String;
}

/// Widgets keyed by field type, with a fallback for everything else.
#[derive(Debug)]
pub struct WidgetRegistry {
    widgets: IndexMap<FieldType, Box<dyn Widget>>,
    fallback: Box<dyn Widget>,
}

impl WidgetRegistry {
    /// The Bootstrap widget set: checkbox, radio set, select box, and
    /// multi-checkbox renderers over a basic input fallback.
    pub fn bootstrap() -> Self {
        let mut registry = Self {
            widgets: IndexMap::new(),
            fallback: Box::new(BasicWidget),
        };
        registry.register(FieldType::Checkbox, Box::new(CheckboxWidget));
        registry.register(FieldType::Radio, Box::new(RadioSetWidget));
        registry.register(FieldType::Select, Box::new(SelectBoxWidget));
        registry.register(FieldType::Multicheckbox, Box::new(MultiCheckboxWidget));
        registry
    }

    pub fn register(&mut self, field_type: FieldType, widget: Box<dyn Widget>) {
        self.widgets.insert(field_type, widget);
    }

    pub fn widget_for(&self, field_type: FieldType) -> &dyn Widget {
        self.widgets
            .get(&field_type)
            .map(Box::as_ref)
            .unwrap_or(self.fallback.as_ref())
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::bootstrap()
    }
}

fn vars(entries: Vec<(&str, String)>) -> TemplateVars {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn input_attrs(control: &ResolvedControl) -> Attributes {
    let mut attrs = control.attrs.clone();
    if !attrs.contains("id") {
        attrs.set("id", control.dom_id.clone());
    }
    attrs
}

/// Input-plus-label pair for one choice of a set control. The hidden slot
/// stays empty here; set widgets place their hidden input in the first
/// wrapper instead.
fn choice_label(
    templater: &StringTemplater,
    choice: &SelectOption,
    item_id: &str,
    input: String,
) -> String {
    let mut attrs = Attributes::new();
    attrs.set("class", "form-check-label");
    attrs.set("for", item_id);
    templater.format(
        "nestingLabel",
        &vars(vec![
            ("input", input),
            ("attrs", attrs.render(&[])),
            ("text", html_escape(&choice.text)),
        ]),
    )
}

/// Plain `<input>` renderer; the `type` attribute falls back to the field
/// type (`text` for the default type) unless the caller supplied one.
#[derive(Debug)]
pub struct BasicWidget;

impl Widget for BasicWidget {
    fn render(&self, templater: &StringTemplater, control: &ResolvedControl) -> String {
        let mut attrs = input_attrs(control);
        let input_type = attrs
            .remove("type")
            .unwrap_or_else(|| control.field_type.type_str().to_string());
        if let Some(value) = &control.value {
            attrs.set("value", value.clone());
        }
        templater.format(
            "input",
            &vars(vec![
                ("type", input_type),
                ("name", control.name_attr.clone()),
                ("attrs", attrs.render(&[])),
            ]),
        )
    }
}

/// Single checkbox with its unchecked-state hidden input. With a nested
/// label the whole input/label pair renders through the nesting-label
/// pattern and the helper emits no separate label.
#[derive(Debug)]
pub struct CheckboxWidget;

impl Widget for CheckboxWidget {
    fn render(&self, templater: &StringTemplater, control: &ResolvedControl) -> String {
        let attrs = input_attrs(control);
        let value = control.value.clone().unwrap_or_else(|| "1".to_string());

        let mut hidden_attrs = Attributes::new();
        hidden_attrs.set("value", "0");
        let hidden = templater.format(
            "hidden",
            &vars(vec![
                ("name", control.name_attr.clone()),
                ("attrs", hidden_attrs.render(&[])),
            ]),
        );
        let checkbox = templater.format(
            "checkbox",
            &vars(vec![
                ("name", control.name_attr.clone()),
                ("value", html_escape(&value)),
                ("attrs", attrs.render(&[])),
            ]),
        );

        if control.nested_input {
            let label = control.label.clone().unwrap_or_default();
            let mut label_attrs = label.attrs.clone();
            if !label_attrs.contains("for") {
                label_attrs.set("for", control.dom_id.clone());
            }
            let mut nesting_vars = label.template_vars.clone();
            nesting_vars.insert("hidden".to_string(), hidden);
            nesting_vars.insert("input".to_string(), checkbox);
            nesting_vars.insert("attrs".to_string(), label_attrs.render(&[]));
            nesting_vars.insert(
                "text".to_string(),
                label.text.unwrap_or_else(|| humanize(&control.field)),
            );
            return templater.format("nestingLabel", &nesting_vars);
        }

        format!("{hidden}{checkbox}")
    }
}

/// A set of radios, one wrapper per choice, with a single empty-value
/// hidden input ahead of the first.
#[derive(Debug)]
pub struct RadioSetWidget;

impl Widget for RadioSetWidget {
    fn render(&self, templater: &StringTemplater, control: &ResolvedControl) -> String {
        let mut hidden_attrs = Attributes::new();
        hidden_attrs.set("value", "");
        let hidden = templater.format(
            "hidden",
            &vars(vec![
                ("name", control.name_attr.clone()),
                ("attrs", hidden_attrs.render(&[])),
            ]),
        );

        let mut out = String::new();
        for (index, choice) in control.choices.iter().enumerate() {
            let item_id = format!("{}-{}", control.dom_id, dom_id(&choice.value));
            let mut attrs = control.attrs.clone();
            attrs.set("id", item_id.clone());
            if choice.selected {
                attrs.set("checked", "checked");
            }
            let input = templater.format(
                "radio",
                &vars(vec![
                    ("name", control.name_attr.clone()),
                    ("value", html_escape(&choice.value)),
                    ("attrs", attrs.render(&[])),
                ]),
            );
            let label = choice_label(templater, choice, &item_id, input);

            let mut wrapper_vars = control.template_vars.clone();
            wrapper_vars.insert(
                "hidden".to_string(),
                if index == 0 { hidden.clone() } else { String::new() },
            );
            wrapper_vars.insert("label".to_string(), label);
            out.push_str(&templater.format("radioWrapper", &wrapper_vars));
        }
        out
    }
}

/// A select rendered as a checkbox list, one wrapper per choice.
#[derive(Debug)]
pub struct MultiCheckboxWidget;

impl Widget for MultiCheckboxWidget {
    fn render(&self, templater: &StringTemplater, control: &ResolvedControl) -> String {
        let name = format!("{}[]", control.name_attr);
        let mut out = String::new();
        for choice in &control.choices {
            let item_id = format!("{}-{}", control.dom_id, dom_id(&choice.value));
            let mut attrs = control.attrs.clone();
            attrs.set("id", item_id.clone());
            if choice.selected {
                attrs.set("checked", "checked");
            }
            let input = templater.format(
                "checkbox",
                &vars(vec![
                    ("name", name.clone()),
                    ("value", html_escape(&choice.value)),
                    ("attrs", attrs.render(&[])),
                ]),
            );
            let label = choice_label(templater, choice, &item_id, input);

            let mut wrapper_vars = control.template_vars.clone();
            wrapper_vars.insert("label".to_string(), label);
            out.push_str(&templater.format("checkboxWrapper", &wrapper_vars));
        }
        out
    }
}

/// Native `<select>` renderer, single or multiple.
#[derive(Debug)]
pub struct SelectBoxWidget;

impl Widget for SelectBoxWidget {
    fn render(&self, templater: &StringTemplater, control: &ResolvedControl) -> String {
        let attrs = input_attrs(control);
        let mut content = String::new();
        for choice in &control.choices {
            let option_attrs = if choice.selected {
                " selected=\"selected\"".to_string()
            } else {
                String::new()
            };
            content.push_str(&templater.format(
                "option",
                &vars(vec![
                    ("value", html_escape(&choice.value)),
                    ("attrs", option_attrs),
                    ("text", html_escape(&choice.text)),
                ]),
            ));
        }

        let template = if control.multiple == Some(Multiple::Multiple) {
            "selectMultiple"
        } else {
            "select"
        };
        templater.format(
            template,
            &vars(vec![
                ("name", control.name_attr.clone()),
                ("attrs", attrs.render(&[])),
                ("content", content),
            ]),
        )
    }
}
