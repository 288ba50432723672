//! Built-in template catalog and alignment overlays.
//!
//! Three layers make up the effective template set for a form: the base set,
//! the overlay for the form's alignment, and per-call scoped overrides. The
//! horizontal overlay carries a single `%s` format slot per pattern that is
//! instantiated with the computed grid classes once per form open — label
//! patterns take the left-column class, the form group takes the middle
//! class, and the checkbox/submit containers take the left offset plus
//! middle class.

use bootform_templating::{templater::template_set, TemplateSet};

use crate::align::{Alignment, GridPosition, GridSpec};

const BASE_TEMPLATES: &[(&str, &str)] = &[
    ("error", "<div class=\"invalid-feedback\">{{content}}</div>"),
    ("errorTooltip", "<div class=\"invalid-tooltip\">{{content}}</div>"),
    ("label", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
    (
        "help",
        "<small{{attrs}} class=\"d-block form-text text-muted\">{{content}}</small>",
    ),
    (
        "tooltip",
        "<span data-bs-toggle=\"tooltip\" title=\"{{content}}\" class=\"fas fa-info-circle\"></span>",
    ),
    (
        "datetimeContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{type}}{{required}}\">{{content}}{{help}}</div>",
    ),
    (
        "datetimeContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{formGroupPosition}}{{type}}{{required}} is-invalid\">{{content}}{{error}}{{help}}</div>",
    ),
    ("datetimeLabel", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
    (
        "inputContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{type}}{{required}}\">{{content}}{{help}}</div>",
    ),
    (
        "inputContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{formGroupPosition}}{{type}}{{required}} is-invalid\">{{content}}{{error}}{{help}}</div>",
    ),
    (
        "checkboxContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group form-check{{variant}} {{type}}{{required}}\">{{content}}{{help}}</div>",
    ),
    (
        "checkboxContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group form-check{{variant}} {{formGroupPosition}}{{type}}{{required}} is-invalid\">{{content}}{{error}}{{help}}</div>",
    ),
    (
        "checkboxInlineContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-check{{variant}} form-check-inline {{type}}{{required}}\">{{content}}</div>",
    ),
    (
        "checkboxInlineContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-check{{variant}} form-check-inline {{type}}{{required}} is-invalid\">{{content}}</div>",
    ),
    ("checkboxFormGroup", "{{input}}{{label}}"),
    ("checkboxWrapper", "<div class=\"form-check{{variant}}\">{{label}}</div>"),
    (
        "checkboxInlineWrapper",
        "<div class=\"form-check{{variant}} form-check-inline\">{{label}}</div>",
    ),
    (
        "radioContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{type}}{{required}}\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}{{help}}</div>",
    ),
    (
        "radioContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{formGroupPosition}}{{type}}{{required}} is-invalid\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}{{error}}{{help}}</div>",
    ),
    ("radioLabel", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
    ("radioWrapper", "<div class=\"form-check\">{{hidden}}{{label}}</div>"),
    (
        "radioInlineWrapper",
        "<div class=\"form-check form-check-inline\">{{label}}</div>",
    ),
    ("staticControl", "<p class=\"form-control-plaintext\">{{content}}</p>"),
    ("inputGroupContainer", "<div{{attrs}}>{{prepend}}{{content}}{{append}}</div>"),
    ("inputGroupText", "<span class=\"input-group-text\">{{content}}</span>"),
    (
        "multicheckboxContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{type}}{{required}}\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}{{help}}</div>",
    ),
    (
        "multicheckboxContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{formGroupPosition}}{{type}}{{required}} is-invalid\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}{{error}}{{help}}</div>",
    ),
    ("multicheckboxLabel", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
    (
        "multicheckboxWrapper",
        "<fieldset class=\"mb-3 form-group\">{{content}}</fieldset>",
    ),
    (
        "multicheckboxTitle",
        "<legend class=\"col-form-label pt-0\">{{text}}</legend>",
    ),
    (
        "nestingLabel",
        "{{hidden}}{{input}}<label{{attrs}}>{{text}}{{tooltip}}</label>",
    ),
    (
        "nestingLabelNestedInput",
        "{{hidden}}<label{{attrs}}>{{input}}{{text}}{{tooltip}}</label>",
    ),
    (
        "submitContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}submit\">{{content}}</div>",
    ),
    // Element templates consumed by the widget layer.
    ("formStart", "<form{{attrs}}>"),
    ("formEnd", "</form>"),
    ("formGroup", "{{label}}{{input}}"),
    ("input", "<input type=\"{{type}}\" name=\"{{name}}\"{{attrs}}/>"),
    ("hidden", "<input type=\"hidden\" name=\"{{name}}\"{{attrs}}/>"),
    (
        "checkbox",
        "<input type=\"checkbox\" name=\"{{name}}\" value=\"{{value}}\"{{attrs}}>",
    ),
    (
        "radio",
        "<input type=\"radio\" name=\"{{name}}\" value=\"{{value}}\"{{attrs}}>",
    ),
    ("select", "<select name=\"{{name}}\"{{attrs}}>{{content}}</select>"),
    (
        "selectMultiple",
        "<select name=\"{{name}}[]\" multiple=\"multiple\"{{attrs}}>{{content}}</select>",
    ),
    ("option", "<option value=\"{{value}}\"{{attrs}}>{{text}}</option>"),
    ("button", "<button{{attrs}}>{{text}}</button>"),
    ("inputSubmit", "<input type=\"{{type}}\"{{attrs}}/>"),
];

const INLINE_TEMPLATES: &[(&str, &str)] = &[
    ("elementWrapper", "<div class=\"col-auto\">{{content}}</div>"),
    (
        "help",
        "<small{{attrs}} class=\"visually-hidden form-text text-muted\">{{content}}</small>",
    ),
    (
        "checkboxInlineContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-check{{variant}} {{type}}{{required}}\">{{content}}{{help}}</div>",
    ),
    (
        "checkboxInlineContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-check{{variant}} {{formGroupPosition}}{{type}}{{required}} is-invalid\">{{content}}{{error}}{{help}}</div>",
    ),
    (
        "datetimeContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{formGroupPosition}}{{type}}{{required}}\">{{content}}{{help}}</div>",
    ),
    (
        "datetimeContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{formGroupPosition}}{{type}}{{required}} is-invalid\">{{content}}{{error}}{{help}}</div>",
    ),
    ("datetimeLabel", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
    (
        "radioContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{formGroupPosition}}{{type}}{{required}}\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}{{help}}</div>",
    ),
    (
        "radioContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group {{formGroupPosition}}{{type}}{{required}} is-invalid\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}{{error}}{{help}}</div>",
    ),
    ("radioLabel", "<span{{attrs}}>{{text}}{{tooltip}}</span>"),
    (
        "multicheckboxContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group d-flex {{formGroupPosition}}{{type}}{{required}}\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}{{help}}</div>",
    ),
    (
        "multicheckboxContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group d-flex {{formGroupPosition}}{{type}}{{required}} is-invalid\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}{{error}}{{help}}</div>",
    ),
    ("multicheckboxLabel", "<span{{attrs}}>{{text}}{{tooltip}}</span>"),
    (
        "multicheckboxWrapper",
        "<fieldset class=\"form-group\">{{content}}</fieldset>",
    ),
    (
        "multicheckboxTitle",
        "<legend class=\"col-form-label float-none pt-0\">{{text}}</legend>",
    ),
];

const HORIZONTAL_TEMPLATES: &[(&str, &str)] = &[
    ("label", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
    ("formGroup", "{{label}}<div class=\"%s\">{{input}}{{error}}{{help}}</div>"),
    (
        "checkboxFormGroup",
        "<div class=\"%s\"><div class=\"form-check{{variant}}\">{{input}}{{label}}{{error}}{{help}}</div></div>",
    ),
    (
        "datetimeContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{type}}{{required}}\">{{content}}</div>",
    ),
    (
        "datetimeContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{formGroupPosition}}{{type}}{{required}} is-invalid\">{{content}}</div>",
    ),
    ("datetimeLabel", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
    (
        "checkboxInlineFormGroup",
        "<div class=\"%s\"><div class=\"form-check{{variant}} form-check-inline\">{{input}}{{label}}</div></div>",
    ),
    (
        "submitContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row\"><div class=\"%s\">{{content}}</div></div>",
    ),
    (
        "inputContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{type}}{{required}}\">{{content}}</div>",
    ),
    (
        "inputContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{formGroupPosition}}{{type}}{{required}} is-invalid\">{{content}}</div>",
    ),
    (
        "checkboxContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{type}}{{required}}\">{{content}}</div>",
    ),
    (
        "checkboxContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{formGroupPosition}}{{type}}{{required}} is-invalid\">{{content}}</div>",
    ),
    (
        "radioContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{type}}{{required}}\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}</div>",
    ),
    (
        "radioContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{formGroupPosition}}{{type}}{{required}} is-invalid\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}</div>",
    ),
    ("radioLabel", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
    (
        "multicheckboxContainer",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{type}}{{required}}\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}</div>",
    ),
    (
        "multicheckboxContainerError",
        "<div{{containerAttrs}} class=\"{{containerClass}}form-group row {{formGroupPosition}}{{type}}{{required}} is-invalid\" role=\"group\" aria-labelledby=\"{{groupId}}\">{{content}}</div>",
    ),
    ("multicheckboxLabel", "<label{{attrs}}>{{text}}{{tooltip}}</label>"),
];

/// Patterns whose `%s` slot takes the left grid class. Most carry no slot
/// and pass through unchanged.
const LEFT_SLOT: &[&str] = &["label", "datetimeLabel", "radioLabel", "multicheckboxLabel"];

/// Patterns whose `%s` slot takes the offset-group class (left offset plus
/// middle column).
const OFFSET_SLOT: &[&str] = &["checkboxFormGroup", "checkboxInlineFormGroup", "submitContainer"];

/// The built-in base template set.
pub fn base_templates() -> TemplateSet {
    template_set(BASE_TEMPLATES)
}

/// The overlay for an alignment, with horizontal grid slots instantiated.
/// Default alignment has no overlay.
pub fn alignment_overlay(align: Alignment, grid: Option<&GridSpec>) -> TemplateSet {
    match align {
        Alignment::Default => TemplateSet::new(),
        Alignment::Inline => template_set(INLINE_TEMPLATES),
        Alignment::Horizontal => {
            let mut overlay = template_set(HORIZONTAL_TEMPLATES);
            let left = crate::align::grid_class(grid, GridPosition::Left, false);
            let middle = crate::align::grid_class(grid, GridPosition::Middle, false);
            let offset_group = grid.map(GridSpec::offset_group_class).unwrap_or_default();

            for name in LEFT_SLOT {
                fill_slot(&mut overlay, name, &left);
            }
            fill_slot(&mut overlay, "formGroup", &middle);
            for name in OFFSET_SLOT {
                fill_slot(&mut overlay, name, &offset_group);
            }
            overlay
        }
    }
}

fn fill_slot(overlay: &mut TemplateSet, name: &str, class: &str) {
    if let Some(pattern) = overlay.get_mut(name) {
        *pattern = pattern.replacen("%s", class, 1);
    }
}
