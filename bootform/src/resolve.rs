//! Field-type dispatch: descriptor → resolved option set.
//!
//! The resolver is a pure transform over in-memory options. It reads the
//! current template definitions (per-call scoped overrides included) to pick
//! the patterns a control swaps in, but mutates nothing — template overrides
//! it produces are applied by the caller for the duration of one render.
//! Every transform is total: malformed input degrades, it does not fail.

use bootform_templating::{Attributes, ClassList, StringTemplater, TemplateVars};
use tracing::trace;

use crate::align::{grid_class, Alignment, GridPosition, GridSpec};
use crate::config::FormConfig;
use crate::feedback;
use crate::options::{
    dom_id, name_attr, ControlOptions, FieldType, HelpOptions, LabelOptions, Multiple,
    ResolvedControl, ResolvedLabel,
};

/// Ambient context for one resolution pass: the form's alignment and grid
/// plus the template store the pass reads pattern definitions from.
pub(crate) struct Resolver<'a> {
    pub templater: &'a StringTemplater,
    pub config: &'a FormConfig,
    pub align: Alignment,
    pub grid: Option<&'a GridSpec>,
}

impl Resolver<'_> {
    pub fn resolve(&self, field: &str, options: ControlOptions) -> ResolvedControl {
        trace!(field, field_type = ?options.field_type, "resolving control options");

        let mut rc = ResolvedControl {
            field: field.to_string(),
            field_type: options.field_type,
            attrs: options.attrs.clone(),
            label: resolve_label(&options.label),
            template_vars: options.template_vars.clone(),
            error: options.error.clone(),
            required: options.required,
            value: options.value.clone(),
            choices: options.choices.clone(),
            multiple: options.multiple,
            prepend: options.prepend.clone(),
            append: options.append.clone(),
            nested_input: options.nested_input,
            dom_id: options.id.clone().unwrap_or_else(|| dom_id(field)),
            name_attr: name_attr(field),
            ..ResolvedControl::default()
        };

        // Plain inputs get `form-control`; typed controls swap in their own
        // Bootstrap class instead.
        let mut inject_form_control = true;

        match options.field_type {
            FieldType::Checkbox => {
                self.checkbox_options(&options, &mut rc);
                inject_form_control = false;
            }
            FieldType::Radio => {
                self.radio_options(&options, &mut rc);
                inject_form_control = false;
            }
            FieldType::Select | FieldType::Multicheckbox => {
                self.select_options(&options, &mut rc);
                inject_form_control = false;
            }
            FieldType::Range => {
                self.label_options(&mut rc);
                if self.align == Alignment::Horizontal {
                    if let Some(label) = rc.label.as_mut() {
                        label.attrs.inject_classes(["pt-0"]);
                    }
                }
                rc.attrs.inject_classes(["form-range"]);
                inject_form_control = false;
            }
            FieldType::Date | FieldType::Time | FieldType::DateTime => {
                self.datetime_options(&mut rc);
            }
            FieldType::Default => {
                self.label_options(&mut rc);
            }
        }

        if inject_form_control {
            rc.attrs.inject_classes(["form-control"]);
        }
        if rc.error.is_some() {
            rc.attrs.inject_classes([self.config.error_class.as_str()]);
        }

        self.container_options(options.container.clone(), &mut rc);
        self.feedback_options(&options, &mut rc);
        self.help_options(&options, &mut rc);
        self.tooltip_options(&options, &mut rc);

        rc
    }

    /// Common label rules: `form-label` outside horizontal alignment, the
    /// left grid class plus `col-form-label` under horizontal, and
    /// `visually-hidden` under inline (hidden, not omitted).
    fn label_options(&self, rc: &mut ResolvedControl) {
        let Some(label) = rc.label.as_mut() else {
            return;
        };
        match self.align {
            Alignment::Horizontal => {
                let size = grid_class(self.grid, GridPosition::Left, false);
                label.attrs.inject_classes([format!("col-form-label {size}")]);
            }
            Alignment::Default => {
                label.attrs.inject_classes(["form-label"]);
            }
            Alignment::Inline => {
                label.attrs.inject_classes(["form-label", "visually-hidden"]);
            }
        }
    }

    fn checkbox_options(&self, options: &ControlOptions, rc: &mut ResolvedControl) {
        if let Some(label) = rc.label.as_mut() {
            label.attrs.inject_classes(["form-check-label"]);
        }
        rc.attrs.inject_classes(["form-check-input"]);

        // Horizontal alignment has no inline checkbox rendition; the form
        // override wins over the per-field request.
        let inline = if self.align == Alignment::Horizontal {
            false
        } else {
            options.inline.unwrap_or(false)
        };

        if inline || self.align == Alignment::Inline {
            self.swap_template(rc, "checkboxContainer", "checkboxInlineContainer");
            self.swap_template(rc, "checkboxContainerError", "checkboxInlineContainerError");
        }

        if options.nested_input {
            self.swap_template(rc, "nestingLabel", "nestingLabelNestedInput");
        }
        if options.switch {
            rc.template_vars
                .insert("variant".to_string(), " form-switch".to_string());
        }
    }

    fn radio_options(&self, options: &ControlOptions, rc: &mut ResolvedControl) {
        self.label_options(rc);
        rc.attrs.inject_classes(["form-check-input"]);
        self.group_label_wiring(rc, true);
        self.group_label_classes(rc);
        self.swap_template(rc, "label", "radioLabel");

        if options.inline.unwrap_or(false) || self.align == Alignment::Inline {
            self.swap_template(rc, "radioWrapper", "radioInlineWrapper");
        }
        if options.nested_input {
            self.swap_template(rc, "nestingLabel", "nestingLabelNestedInput");
        }
    }

    fn select_options(&self, options: &ControlOptions, rc: &mut ResolvedControl) {
        self.label_options(rc);

        if options.multiple == Some(Multiple::Checkbox) || rc.field_type == FieldType::Multicheckbox
        {
            rc.field_type = FieldType::Multicheckbox;
            self.group_label_wiring(rc, true);
            self.group_label_classes(rc);
            self.swap_template(rc, "label", "multicheckboxLabel");
            rc.attrs.inject_classes(["form-check-input"]);

            if options.inline.unwrap_or(false) || self.align == Alignment::Inline {
                self.swap_template(rc, "checkboxWrapper", "checkboxInlineWrapper");
            }
            if options.nested_input {
                self.swap_template(rc, "nestingLabel", "nestingLabelNestedInput");
            }
            if options.switch {
                rc.template_vars
                    .insert("variant".to_string(), " form-switch".to_string());
            }
        }

        if self.align == Alignment::Inline {
            if let Some(label) = rc.label.as_mut() {
                label.attrs.inject_classes(["visually-hidden"]);
            }
        }

        if rc.field_type != FieldType::Multicheckbox {
            rc.attrs.inject_classes(["form-select"]);
        }
    }

    fn datetime_options(&self, rc: &mut ResolvedControl) {
        self.label_options(rc);

        // Group ids are no longer required by the date/time markup; kept for
        // backward compatibility.
        self.group_label_wiring(rc, false);

        self.swap_template(rc, "label", "datetimeLabel");
        self.swap_template(rc, "inputContainer", "datetimeContainer");
        self.swap_template(rc, "inputContainerError", "datetimeContainerError");
    }

    /// Generate the shared group id and wire it into the control's and the
    /// label's template variables; `as_label_id` additionally makes it the
    /// label's DOM id so the container's `aria-labelledby` resolves.
    fn group_label_wiring(&self, rc: &mut ResolvedControl, as_label_id: bool) {
        let group_id = format!("{}-group-label", rc.dom_id);
        rc.template_vars
            .insert("groupId".to_string(), group_id.clone());
        if let Some(label) = rc.label.as_mut() {
            label
                .template_vars
                .insert("groupId".to_string(), group_id.clone());
            if as_label_id {
                label.attrs.set("id", group_id.clone());
            }
        }
        rc.group_id = Some(group_id);
    }

    /// Group labels stack over their options (`d-block`) and drop the
    /// column padding under horizontal alignment (`pt-0`).
    fn group_label_classes(&self, rc: &mut ResolvedControl) {
        let Some(label) = rc.label.as_mut() else {
            return;
        };
        if self.align != Alignment::Inline {
            label.attrs.inject_classes(["d-block"]);
        }
        if self.align == Alignment::Horizontal {
            label.attrs.inject_classes(["pt-0"]);
        }
    }

    /// Record an override of `name` with the current definition of
    /// `replacement`. An undefined replacement is skipped, never an error.
    fn swap_template(&self, rc: &mut ResolvedControl, name: &str, replacement: &str) {
        if let Some(pattern) = self.templater.get(replacement) {
            rc.template_overrides
                .insert(name.to_string(), pattern.to_string());
        }
    }

    /// Container option → template variables (`containerClass`,
    /// `containerAttrs`). Outside inline alignment every typed control's
    /// container carries `mb-3`.
    fn container_options(&self, container: Option<Attributes>, rc: &mut ResolvedControl) {
        let mut container = container;
        if self.align != Alignment::Inline {
            container
                .get_or_insert_with(Attributes::new)
                .inject_classes(["mb-3"]);
        }

        let Some(mut attrs) = container else {
            return;
        };
        let classes = attrs.take_classes();
        if !classes.is_empty() {
            rc.template_vars
                .insert("containerClass".to_string(), format!("{classes} "));
        }
        if !attrs.is_empty() {
            rc.template_vars
                .insert("containerAttrs".to_string(), attrs.render(&[]));
        }
    }

    fn feedback_options(&self, options: &ControlOptions, rc: &mut ResolvedControl) {
        let resolved = feedback::resolve(
            options.feedback_style,
            options.group_position,
            self.config.feedback_style,
            self.config.group_position,
            self.align,
        );
        if resolved.tooltip {
            self.swap_template(rc, "error", "errorTooltip");
        }
        if let Some(position) = resolved.position_var() {
            rc.template_vars
                .insert("formGroupPosition".to_string(), position);
        }
    }

    fn help_options(&self, options: &ControlOptions, rc: &mut ResolvedControl) {
        let Some(help) = &options.help else {
            return;
        };
        let mut vars = TemplateVars::new();
        match help {
            HelpOptions::Text(content) => {
                vars.insert("content".to_string(), content.clone());
            }
            HelpOptions::Custom { content, attrs } => {
                vars.insert("content".to_string(), content.clone());
                // The help pattern carries its own class attribute.
                vars.insert("attrs".to_string(), attrs.render(&["class"]));
            }
        }
        rc.help = Some(self.templater.format("help", &vars));
    }

    fn tooltip_options(&self, options: &ControlOptions, rc: &mut ResolvedControl) {
        let Some(tooltip) = &options.tooltip else {
            return;
        };
        let Some(label) = rc.label.as_mut() else {
            return;
        };
        let mut vars = TemplateVars::new();
        vars.insert("content".to_string(), tooltip.clone());
        let rendered = self.templater.format("tooltip", &vars);
        label
            .template_vars
            .insert("tooltip".to_string(), format!(" {rendered}"));
    }
}

fn resolve_label(options: &LabelOptions) -> Option<ResolvedLabel> {
    match options {
        LabelOptions::Auto => Some(ResolvedLabel::default()),
        LabelOptions::Disabled => None,
        LabelOptions::Text(text) => Some(ResolvedLabel {
            text: Some(text.clone()),
            ..ResolvedLabel::default()
        }),
        LabelOptions::Attrs { text, attrs } => Some(ResolvedLabel {
            text: text.clone(),
            attrs: attrs.clone(),
            template_vars: TemplateVars::new(),
        }),
    }
}

/// Prepare attribute bags for standalone radio / multi-checkbox rendering:
/// `form-check-input` on the input, `form-check-label` on the label.
pub fn multi_input_attributes(attrs: &mut Attributes, label: Option<&mut Attributes>) {
    attrs.inject_classes(["form-check-input"]);
    if let Some(label) = label {
        label.inject_classes(["form-check-label"]);
    }
}

const BUTTON_VARIANTS: &[&str] = &[
    "primary", "secondary", "success", "danger", "warning", "info", "light", "dark", "link",
];
const BUTTON_SIZES: &[&str] = &["sm", "lg"];

/// Rewrite bare Bootstrap button variant and size names (`primary`, `lg`)
/// into their `btn-` classes and ensure `btn` itself leads the list.
pub fn apply_button_classes(attrs: &mut Attributes) {
    let existing = attrs.take_classes();
    let mut rewritten = ClassList::parse("btn");
    for class in existing.iter() {
        if BUTTON_VARIANTS.contains(&class) || BUTTON_SIZES.contains(&class) {
            rewritten.inject([format!("btn-{class}")]);
        } else {
            rewritten.inject([class]);
        }
    }
    attrs.inject_classes(rewritten.iter());
}
