//! Field descriptors and resolved option sets.
//!
//! `ControlOptions` is the raw per-call option bag a caller hands to
//! `FormHelper::control`; `ResolvedControl` is what the composition engine
//! produces from it: final template overrides, substitution variables, class
//! lists, and pre-rendered fragments, ready for the widget and container
//! templates. A descriptor lives for one render call.

use std::path::PathBuf;

use bootform_templating::{Attributes, TemplateSet, TemplateVars};
use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackStyle, GroupPosition};

/// The kind of control a field renders as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// Plain input (text, email, password, … via a `type` attribute)
    #[default]
    Default,
    Checkbox,
    Radio,
    Select,
    /// A select rendered as a checkbox list; normally produced by resolution
    /// from `Select` with `Multiple::Checkbox`
    Multicheckbox,
    Range,
    Date,
    Time,
    #[serde(rename = "datetime", alias = "datetime-local")]
    DateTime,
}

impl FieldType {
    /// The type string used both for the `{{type}}` container variable and
    /// for the `{type}Container` / `{type}FormGroup` template lookups.
    pub fn type_str(self) -> &'static str {
        match self {
            FieldType::Default => "text",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Select => "select",
            FieldType::Multicheckbox => "multicheckbox",
            FieldType::Range => "range",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::DateTime => "datetime-local",
        }
    }
}

/// How a select handles multiple values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiple {
    /// A native `multiple` select
    Multiple,
    /// Render the select as a list of checkboxes
    Checkbox,
}

/// One choice in a select, radio, or multi-checkbox control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Label handling for a control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelOptions {
    /// Generate the label text from the field name
    #[default]
    Auto,
    /// Render no label at all
    Disabled,
    /// Explicit label text
    Text(String),
    /// Explicit attributes and optional text
    Attrs {
        text: Option<String>,
        attrs: Attributes,
    },
}

impl LabelOptions {
    pub fn text(text: impl Into<String>) -> Self {
        LabelOptions::Text(text.into())
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, LabelOptions::Disabled)
    }
}

/// Help text under a control: plain text or text plus attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpOptions {
    Text(String),
    Custom { content: String, attrs: Attributes },
}

impl From<&str> for HelpOptions {
    fn from(text: &str) -> Self {
        HelpOptions::Text(text.to_string())
    }
}

impl From<String> for HelpOptions {
    fn from(text: String) -> Self {
        HelpOptions::Text(text)
    }
}

/// Per-call template overrides: an inline mapping or an external TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateOverrides {
    #[default]
    None,
    Set(TemplateSet),
    File(PathBuf),
}

impl TemplateOverrides {
    pub fn is_none(&self) -> bool {
        matches!(self, TemplateOverrides::None)
    }
}

/// The raw option bag for one `control()` call.
#[derive(Debug, Clone, Default)]
pub struct ControlOptions {
    pub field_type: FieldType,
    pub label: LabelOptions,
    /// Validation message supplied by the caller; its presence selects the
    /// `…ContainerError` template variants
    pub error: Option<String>,
    pub required: bool,
    pub help: Option<HelpOptions>,
    pub tooltip: Option<String>,
    /// Container attributes; `class` prepends to the container class list
    pub container: Option<Attributes>,
    pub prepend: Option<String>,
    pub append: Option<String>,
    /// Inline rendering for checkbox-shaped controls
    pub inline: Option<bool>,
    /// Place the input inside the label element
    pub nested_input: bool,
    /// Switch-style checkbox variant
    pub switch: bool,
    pub multiple: Option<Multiple>,
    pub templates: TemplateOverrides,
    pub template_vars: TemplateVars,
    pub feedback_style: Option<FeedbackStyle>,
    pub group_position: Option<GroupPosition>,
    /// Free-form input attributes, including extra classes and a `type`
    /// override for plain inputs
    pub attrs: Attributes,
    pub value: Option<String>,
    pub choices: Vec<SelectOption>,
    /// Explicit DOM id; generated from the field name when unset
    pub id: Option<String>,
}

impl ControlOptions {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            ..Self::default()
        }
    }

    pub fn label(mut self, label: LabelOptions) -> Self {
        self.label = label;
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn help(mut self, help: impl Into<HelpOptions>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn container(mut self, container: Attributes) -> Self {
        self.container = Some(container);
        self
    }

    pub fn prepend(mut self, addon: impl Into<String>) -> Self {
        self.prepend = Some(addon.into());
        self
    }

    pub fn append(mut self, addon: impl Into<String>) -> Self {
        self.append = Some(addon.into());
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = Some(inline);
        self
    }

    pub fn nested_input(mut self, nested: bool) -> Self {
        self.nested_input = nested;
        self
    }

    pub fn switch(mut self, switch: bool) -> Self {
        self.switch = switch;
        self
    }

    pub fn multiple(mut self, multiple: Multiple) -> Self {
        self.multiple = Some(multiple);
        self
    }

    pub fn templates(mut self, templates: TemplateOverrides) -> Self {
        self.templates = templates;
        self
    }

    pub fn feedback_style(mut self, style: FeedbackStyle) -> Self {
        self.feedback_style = Some(style);
        self
    }

    pub fn group_position(mut self, position: GroupPosition) -> Self {
        self.group_position = Some(position);
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn choices(mut self, choices: Vec<SelectOption>) -> Self {
        self.choices = choices;
        self
    }
}

/// The label half of a resolved control. `None` at the control level means
/// the label is disabled entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLabel {
    /// Explicit text; generated from the field name when unset
    pub text: Option<String>,
    pub attrs: Attributes,
    pub template_vars: TemplateVars,
}

/// The engine's output for one control: everything the widget, group, and
/// container templates need.
#[derive(Debug, Clone, Default)]
pub struct ResolvedControl {
    /// Dot-path field name, e.g. `user.email`
    pub field: String,
    /// Final type after resolution (a checkbox-select arrives as
    /// `Multicheckbox` here)
    pub field_type: FieldType,
    /// Input attributes with all resolved classes
    pub attrs: Attributes,
    pub label: Option<ResolvedLabel>,
    /// Template overrides for this call only
    pub template_overrides: TemplateSet,
    pub template_vars: TemplateVars,
    /// Pre-rendered help fragment
    pub help: Option<String>,
    pub error: Option<String>,
    pub required: bool,
    /// Shared id tying a group's label to its container `aria-labelledby`
    pub group_id: Option<String>,
    pub value: Option<String>,
    pub choices: Vec<SelectOption>,
    pub multiple: Option<Multiple>,
    pub prepend: Option<String>,
    pub append: Option<String>,
    /// Render the input inside its label element
    pub nested_input: bool,
    pub dom_id: String,
    /// HTML `name` attribute derived from the dot path
    pub name_attr: String,
}

/// DOM id for a dot-path field name: `user.email` → `user-email`.
pub fn dom_id(field: &str) -> String {
    field
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// HTML name attribute for a dot path: `user.email` → `user[email]`.
pub fn name_attr(field: &str) -> String {
    let mut parts = field.split('.');
    let mut name = parts.next().unwrap_or_default().to_string();
    for part in parts {
        name.push('[');
        name.push_str(part);
        name.push(']');
    }
    name
}

/// Human-readable label text from the last path segment:
/// `user.first_name` → `First Name`.
pub fn humanize(field: &str) -> String {
    let segment = field.rsplit('.').next().unwrap_or(field);
    segment
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
