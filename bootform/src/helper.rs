//! The form helper: a request-scoped session object.
//!
//! One `FormHelper` owns the template store, the widget registry, and the
//! alignment state for exactly one render session. Alignment and grid are
//! set once at `create()` and cleared unconditionally at `end()`; every
//! control call in between reads them but never mutates them. Concurrent
//! render sessions use independent helpers — there is no process-wide state.

use std::mem;

use bootform_templating::{html_escape, Attributes, StringTemplater, TemplateVars};
use tracing::{debug, trace, warn};

use crate::align::{detect_alignment, Alignment, GridSpec};
use crate::config::FormConfig;
use crate::error::{FormError, Result};
use crate::options::{humanize, ControlOptions, FieldType, ResolvedControl, TemplateOverrides};
use crate::resolve::{apply_button_classes, Resolver};
use crate::templates::{alignment_overlay, base_templates};
use crate::widget::WidgetRegistry;

/// Options for opening a form.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Requested alignment; unset auto-detects from the class list, then
    /// falls back to the configured default. Validated at open time.
    pub align: Option<String>,
    /// Explicit grid; forces horizontal alignment
    pub grid: Option<GridSpec>,
    /// Attributes of the `<form>` element, including outer CSS classes
    pub attrs: Attributes,
    /// Template overrides scoped to this form
    pub templates: TemplateOverrides,
}

impl FormOptions {
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align.to_string());
        self
    }

    pub fn grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn class(mut self, classes: &str) -> Self {
        self.attrs.inject_classes([classes]);
        self
    }

    pub fn templates(mut self, templates: TemplateOverrides) -> Self {
        self.templates = templates;
        self
    }
}

/// Options for a submit element.
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub attrs: Attributes,
    pub container: Option<Attributes>,
    pub templates: TemplateOverrides,
}

impl SubmitOptions {
    pub fn class(mut self, classes: &str) -> Self {
        self.attrs.inject_classes([classes]);
        self
    }

    pub fn container(mut self, container: Attributes) -> Self {
        self.container = Some(container);
        self
    }
}

/// Options for a button element.
#[derive(Debug, Clone, Default)]
pub struct ButtonOptions {
    pub attrs: Attributes,
    pub templates: TemplateOverrides,
}

impl ButtonOptions {
    pub fn class(mut self, classes: &str) -> Self {
        self.attrs.inject_classes([classes]);
        self
    }
}

/// Options for a static (plain-text) control.
#[derive(Debug, Clone)]
pub struct StaticControlOptions {
    /// HTML-escape the value; on by default
    pub escape: bool,
}

impl Default for StaticControlOptions {
    fn default() -> Self {
        Self { escape: true }
    }
}

/// Composes form controls: resolves each field descriptor against the
/// form's alignment context and renders it through the layered template set.
#[derive(Debug)]
pub struct FormHelper {
    config: FormConfig,
    templater: StringTemplater,
    widgets: WidgetRegistry,
    align: Option<Alignment>,
    grid: Option<GridSpec>,
}

impl FormHelper {
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    pub fn with_config(config: FormConfig) -> Self {
        let mut templater = StringTemplater::with_templates(base_templates());
        templater.add(config.templates.clone());
        Self {
            config,
            templater,
            widgets: WidgetRegistry::bootstrap(),
            align: None,
            grid: None,
        }
    }

    /// The current alignment; `None` outside an open form.
    pub fn alignment(&self) -> Option<Alignment> {
        self.align
    }

    /// The current grid; present iff the open form is horizontal.
    pub fn grid(&self) -> Option<&GridSpec> {
        self.grid.as_ref()
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn templater(&self) -> &StringTemplater {
        &self.templater
    }

    pub fn widgets_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.widgets
    }

    /// Open a form: resolve alignment and grid, layer the alignment overlay
    /// (and any per-form overrides) over the base template set, and render
    /// the opening `<form>` tag.
    pub fn create(&mut self, options: FormOptions) -> Result<String> {
        if self.align.is_some() {
            warn!("create() called while a form is open; closing the previous form");
            self.close_context();
        }

        let mut attrs = options.attrs;
        if !attrs.contains("role") {
            attrs.set("role", "form");
        }

        let mut align = match &options.align {
            Some(raw) => raw.parse::<Alignment>()?,
            None => detect_alignment(attrs.classes(), self.config.align),
        };
        let grid = if let Some(grid) = options.grid {
            align = Alignment::Horizontal;
            Some(grid)
        } else if align == Alignment::Horizontal {
            Some(self.config.grid.clone())
        } else {
            None
        };

        match align {
            Alignment::Default => {}
            Alignment::Horizontal => {
                attrs.inject_classes(["form-horizontal"]);
            }
            Alignment::Inline => {
                attrs.inject_classes(["form-inline", "row g-3 align-items-center"]);
            }
        }

        self.templater.push();
        self.templater.add(alignment_overlay(align, grid.as_ref()));
        let applied = match &options.templates {
            TemplateOverrides::None => Ok(()),
            TemplateOverrides::Set(set) => {
                self.templater.add(set.clone());
                Ok(())
            }
            TemplateOverrides::File(path) => self.templater.load(path).map_err(FormError::from),
        };
        if let Err(err) = applied {
            self.templater.pop();
            return Err(err);
        }

        self.align = Some(align);
        self.grid = grid;
        debug!(align = %align, "opened form");

        let mut vars = TemplateVars::new();
        vars.insert("attrs".to_string(), attrs.render(&[]));
        Ok(self.templater.format("formStart", &vars))
    }

    /// Close the form. The alignment context is cleared unconditionally,
    /// even when the form body failed partway — no alignment state leaks
    /// into the next form.
    pub fn end(&mut self) -> String {
        debug!("closed form");
        self.close_context();
        self.templater.format("formEnd", &TemplateVars::new())
    }

    fn close_context(&mut self) {
        if self.align.take().is_some() {
            self.templater.pop();
        }
        self.grid = None;
    }

    /// Resolve a field descriptor to its option set without rendering.
    /// Per-call template overrides are visible during resolution and
    /// unwound afterwards.
    pub fn resolve_control(
        &mut self,
        field: &str,
        mut options: ControlOptions,
    ) -> Result<ResolvedControl> {
        let align = self.align.ok_or(FormError::FormNotOpen)?;
        let overrides = mem::take(&mut options.templates);
        self.with_call_scope(overrides, |this| {
            let resolver = Resolver {
                templater: &this.templater,
                config: &this.config,
                align,
                grid: this.grid.as_ref(),
            };
            Ok(resolver.resolve(field, options))
        })
    }

    /// Render a complete form control: label, input, validation feedback,
    /// help text, and container.
    pub fn control(&mut self, field: &str, mut options: ControlOptions) -> Result<String> {
        let align = self.align.ok_or(FormError::FormNotOpen)?;
        trace!(field, field_type = ?options.field_type, "rendering control");

        let overrides = mem::take(&mut options.templates);
        let html = self.with_call_scope(overrides, |this| {
            let resolver = Resolver {
                templater: &this.templater,
                config: &this.config,
                align,
                grid: this.grid.as_ref(),
            };
            let resolved = resolver.resolve(field, options);

            // The transforms picked template overrides for this call only;
            // apply them for the render and restore afterwards.
            this.templater.push();
            this.templater.add(resolved.template_overrides.clone());
            let html = assemble(&this.templater, &this.widgets, &resolved);
            this.templater.pop();
            Ok(html)
        })?;
        Ok(self.post_process(&html))
    }

    /// Render a submit input inside the submit container. Bare Bootstrap
    /// variant names in the class list become `btn-` classes; `primary` is
    /// the default.
    pub fn submit(&mut self, caption: Option<&str>, mut options: SubmitOptions) -> Result<String> {
        self.align.ok_or(FormError::FormNotOpen)?;
        let overrides = mem::take(&mut options.templates);
        let html = self.with_call_scope(overrides, |this| {
            let mut attrs = options.attrs.clone();
            if attrs.classes().is_empty() {
                attrs.set("class", "primary");
            }
            apply_button_classes(&mut attrs);
            attrs.set("value", caption.unwrap_or("Submit"));

            let mut vars = TemplateVars::new();
            vars.insert("type".to_string(), "submit".to_string());
            vars.insert("attrs".to_string(), attrs.render(&[]));
            let input = this.templater.format("inputSubmit", &vars);

            let mut container_vars = TemplateVars::new();
            if let Some(mut container) = options.container.clone() {
                let classes = container.take_classes();
                if !classes.is_empty() {
                    container_vars.insert("containerClass".to_string(), format!("{classes} "));
                }
                if !container.is_empty() {
                    container_vars.insert("containerAttrs".to_string(), container.render(&[]));
                }
            }
            container_vars.insert("content".to_string(), input);
            Ok(this.templater.format("submitContainer", &container_vars))
        })?;
        Ok(self.post_process(&html))
    }

    /// Render a `<button>` element with Bootstrap button classes.
    pub fn button(&mut self, title: &str, mut options: ButtonOptions) -> Result<String> {
        self.align.ok_or(FormError::FormNotOpen)?;
        let overrides = mem::take(&mut options.templates);
        let html = self.with_call_scope(overrides, |this| {
            let mut attrs = options.attrs.clone();
            apply_button_classes(&mut attrs);
            if !attrs.classes().iter().any(|class| class.starts_with("btn-")) {
                attrs.inject_classes(["btn-secondary"]);
            }
            if !attrs.contains("type") {
                attrs.set("type", "submit");
            }
            let mut vars = TemplateVars::new();
            vars.insert("attrs".to_string(), attrs.render(&[]));
            vars.insert("text".to_string(), html_escape(title));
            Ok(this.templater.format("button", &vars))
        })?;
        Ok(self.post_process(&html))
    }

    /// Render plain text in place of an input, escaped by default.
    pub fn static_control(&self, value: &str, options: StaticControlOptions) -> Result<String> {
        self.align.ok_or(FormError::FormNotOpen)?;
        let content = if options.escape {
            html_escape(value)
        } else {
            value.to_string()
        };
        let mut vars = TemplateVars::new();
        vars.insert("content".to_string(), content);
        Ok(self.post_process(&self.templater.format("staticControl", &vars)))
    }

    /// Run `f` with per-call template overrides applied, restoring the
    /// prior definitions on every exit path.
    fn with_call_scope<T>(
        &mut self,
        overrides: TemplateOverrides,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if overrides.is_none() {
            return f(self);
        }
        self.templater.push();
        let prepared = match overrides {
            TemplateOverrides::None => Ok(()),
            TemplateOverrides::Set(set) => {
                self.templater.add(set);
                Ok(())
            }
            TemplateOverrides::File(path) => self.templater.load(&path).map_err(FormError::from),
        };
        let result = prepared.and_then(|()| f(self));
        self.templater.pop();
        result
    }

    /// Inline forms wrap every rendered element in a grid cell.
    fn post_process(&self, html: &str) -> String {
        if self.align == Some(Alignment::Inline) {
            let mut vars = TemplateVars::new();
            vars.insert("content".to_string(), html.to_string());
            self.templater.format("elementWrapper", &vars)
        } else {
            html.to_string()
        }
    }
}

impl Default for FormHelper {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the final markup for one resolved control: widget output,
/// label, and feedback composed through the group and container template
/// fallback chains.
fn assemble(
    templater: &StringTemplater,
    widgets: &WidgetRegistry,
    resolved: &ResolvedControl,
) -> String {
    let raw_input = widgets.widget_for(resolved.field_type).render(templater, resolved);
    let input_html = wrap_input_group(templater, resolved, raw_input);
    let label_html = render_label(templater, resolved);
    let error_html = match &resolved.error {
        Some(message) => {
            let mut vars = TemplateVars::new();
            vars.insert("content".to_string(), html_escape(message));
            templater.format("error", &vars)
        }
        None => String::new(),
    };
    let help_html = resolved.help.clone().unwrap_or_default();
    // A caller-supplied `type` attribute (password, email, …) names the
    // container and its template lookups, like any built-in type.
    let type_str = resolved
        .attrs
        .get("type")
        .unwrap_or(resolved.field_type.type_str());

    // Group template: `{type}FormGroup` if defined, else the generic
    // `formGroup`. Resolved fresh per call — the type varies per field.
    let specific_group = format!("{type_str}FormGroup");
    let group_name = if templater.get(&specific_group).is_some() {
        specific_group
    } else {
        "formGroup".to_string()
    };
    let mut group_vars = resolved.template_vars.clone();
    group_vars.insert("input".to_string(), input_html);
    group_vars.insert("label".to_string(), label_html);
    group_vars.insert("error".to_string(), error_html.clone());
    group_vars.insert("help".to_string(), help_html.clone());
    let content = templater.format(&group_name, &group_vars);

    // Container template: `{type}Container[Error]` if defined, else the
    // generic `inputContainer[Error]`.
    let suffix = if resolved.error.is_some() { "Error" } else { "" };
    let specific_container = format!("{type_str}Container{suffix}");
    let container_name = if templater.get(&specific_container).is_some() {
        specific_container
    } else {
        format!("inputContainer{suffix}")
    };
    let mut container_vars = resolved.template_vars.clone();
    container_vars.insert("content".to_string(), content);
    container_vars.insert("error".to_string(), error_html);
    container_vars.insert(
        "required".to_string(),
        if resolved.required {
            " required".to_string()
        } else {
            String::new()
        },
    );
    container_vars.insert("type".to_string(), type_str.to_string());
    container_vars.insert("help".to_string(), help_html);
    templater.format(&container_name, &container_vars)
}

fn render_label(templater: &StringTemplater, resolved: &ResolvedControl) -> String {
    let Some(label) = &resolved.label else {
        return String::new();
    };
    // A nested checkbox input renders inside its label via the widget.
    if resolved.field_type == FieldType::Checkbox && resolved.nested_input {
        return String::new();
    }
    let mut attrs = label.attrs.clone();
    let grouped = matches!(
        resolved.field_type,
        FieldType::Radio | FieldType::Multicheckbox
    );
    if !grouped && !attrs.contains("for") && !attrs.contains("id") {
        attrs.set("for", resolved.dom_id.clone());
    }
    let mut vars = label.template_vars.clone();
    vars.insert(
        "text".to_string(),
        html_escape(&label.text.clone().unwrap_or_else(|| humanize(&resolved.field))),
    );
    vars.insert("attrs".to_string(), attrs.render(&[]));
    templater.format("label", &vars)
}

fn wrap_input_group(
    templater: &StringTemplater,
    resolved: &ResolvedControl,
    input_html: String,
) -> String {
    if resolved.prepend.is_none() && resolved.append.is_none() {
        return input_html;
    }
    let prepend = resolved
        .prepend
        .as_deref()
        .map(|addon| render_addon(templater, addon))
        .unwrap_or_default();
    let append = resolved
        .append
        .as_deref()
        .map(|addon| render_addon(templater, addon))
        .unwrap_or_default();

    let mut attrs = Attributes::new();
    attrs.set("class", "input-group");
    if resolved.error.is_some() {
        attrs.inject_classes(["has-validation"]);
    }
    let mut vars = TemplateVars::new();
    vars.insert("attrs".to_string(), attrs.render(&[]));
    vars.insert("prepend".to_string(), prepend);
    vars.insert("content".to_string(), input_html);
    vars.insert("append".to_string(), append);
    templater.format("inputGroupContainer", &vars)
}

/// Addons that already look like markup pass through; plain text is wrapped
/// in the input-group text pattern.
fn render_addon(templater: &StringTemplater, addon: &str) -> String {
    if addon.trim_start().starts_with('<') {
        addon.to_string()
    } else {
        let mut vars = TemplateVars::new();
        vars.insert("content".to_string(), addon.to_string());
        templater.format("inputGroupText", &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_end_reset_alignment_state() {
        let mut form = FormHelper::new();
        assert_eq!(form.alignment(), None);

        form.create(FormOptions::default().align(Alignment::Horizontal))
            .unwrap();
        assert_eq!(form.alignment(), Some(Alignment::Horizontal));
        assert!(form.grid().is_some());

        form.end();
        assert_eq!(form.alignment(), None);
        assert!(form.grid().is_none());
        assert_eq!(form.templater().depth(), 0);
    }

    #[test]
    fn grid_is_present_iff_horizontal() {
        let mut form = FormHelper::new();
        form.create(FormOptions::default()).unwrap();
        assert_eq!(form.alignment(), Some(Alignment::Default));
        assert!(form.grid().is_none());
        form.end();

        form.create(FormOptions::default().align(Alignment::Inline))
            .unwrap();
        assert!(form.grid().is_none());
        form.end();
    }

    #[test]
    fn explicit_grid_forces_horizontal() {
        let mut form = FormHelper::new();
        form.create(FormOptions::default().grid(GridSpec::default()))
            .unwrap();
        assert_eq!(form.alignment(), Some(Alignment::Horizontal));
        form.end();
    }

    #[test]
    fn invalid_alignment_is_a_configuration_error() {
        let mut form = FormHelper::new();
        let err = form
            .create(FormOptions {
                align: Some("diagonal".to_string()),
                ..FormOptions::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("default, horizontal, inline"));
        // The failed open left no form state behind.
        assert_eq!(form.alignment(), None);
        assert_eq!(form.templater().depth(), 0);
    }

    #[test]
    fn alignment_detected_from_form_classes() {
        let mut form = FormHelper::new();
        let html = form
            .create(FormOptions::default().class("form-inline"))
            .unwrap();
        assert_eq!(form.alignment(), Some(Alignment::Inline));
        assert!(html.contains("row g-3 align-items-center"));
        form.end();
    }

    #[test]
    fn create_renders_form_tag_with_role() {
        let mut form = FormHelper::new();
        let html = form.create(FormOptions::default()).unwrap();
        assert_eq!(html, "<form role=\"form\">");
        assert_eq!(form.end(), "</form>");
    }

    #[test]
    fn control_outside_form_is_rejected() {
        let mut form = FormHelper::new();
        let err = form.control("title", ControlOptions::default()).unwrap_err();
        assert!(matches!(err, FormError::FormNotOpen));
    }

    #[test]
    fn create_while_open_closes_previous_form() {
        let mut form = FormHelper::new();
        form.create(FormOptions::default().align(Alignment::Horizontal))
            .unwrap();
        form.create(FormOptions::default()).unwrap();
        assert_eq!(form.alignment(), Some(Alignment::Default));
        form.end();
        assert_eq!(form.templater().depth(), 0);
    }

    #[test]
    fn static_control_escapes_by_default() {
        let mut form = FormHelper::new();
        form.create(FormOptions::default()).unwrap();
        let html = form
            .static_control("<b>raw</b>", StaticControlOptions::default())
            .unwrap();
        assert_eq!(
            html,
            "<p class=\"form-control-plaintext\">&lt;b&gt;raw&lt;/b&gt;</p>"
        );
        let html = form
            .static_control("<b>raw</b>", StaticControlOptions { escape: false })
            .unwrap();
        assert!(html.contains("<b>raw</b>"));
        form.end();
    }
}
