//! Form open/close lifecycle: alignment state is set once per form and
//! cleared unconditionally at close, with no leaks across forms.

use bootform::{
    Alignment, ButtonOptions, ControlOptions, FormError, FormHelper, FormOptions, GridSpec,
    SubmitOptions, TemplateOverrides,
};

#[test_log::test]
fn alignment_state_resets_after_every_form() {
    let mut form = FormHelper::new();

    form.create(FormOptions::default().align(Alignment::Horizontal))
        .unwrap();
    for field in ["one", "two", "three"] {
        form.control(field, ControlOptions::default()).unwrap();
    }
    form.end();

    assert_eq!(form.alignment(), None);
    assert!(form.grid().is_none());
    assert_eq!(form.templater().depth(), 0);

    // A following form without alignment options renders plain.
    form.create(FormOptions::default()).unwrap();
    let html = form.control("title", ControlOptions::default()).unwrap();
    assert!(!html.contains("col-form-label"));
    assert!(!html.contains("row"));
    assert_eq!(
        form.templater().get("formGroup").unwrap(),
        "{{label}}{{input}}"
    );
    form.end();
}

#[test]
fn failed_template_load_unwinds_the_call_scope() {
    let mut form = FormHelper::new();
    form.create(FormOptions::default().align(Alignment::Horizontal))
        .unwrap();

    let err = form
        .control(
            "broken",
            ControlOptions::default()
                .templates(TemplateOverrides::File("/nonexistent/templates.toml".into())),
        )
        .unwrap_err();
    assert!(matches!(err, FormError::Templating(_)));

    // The scope was unwound; subsequent controls render normally.
    let html = form.control("title", ControlOptions::default()).unwrap();
    assert!(html.contains("col-form-label col-md-2"));
    form.end();
    assert_eq!(form.templater().depth(), 0);
}

#[test]
fn multi_breakpoint_grid_spans_all_breakpoints() {
    let grid: GridSpec =
        toml::from_str("[sm]\nleft = 4\nmiddle = 8\n\n[lg]\nleft = 2\nmiddle = 10").unwrap();

    let mut form = FormHelper::new();
    form.create(FormOptions::default().grid(grid)).unwrap();
    assert_eq!(form.alignment(), Some(Alignment::Horizontal));

    let html = form.control("title", ControlOptions::default()).unwrap();
    assert!(html.contains("col-form-label col-sm-4 col-lg-2"));
    assert!(html.contains("<div class=\"col-sm-8 col-lg-10\">"));
    form.end();
}

#[test]
fn submit_under_horizontal_uses_the_offset_group() {
    let mut form = FormHelper::new();
    form.create(FormOptions::default().align(Alignment::Horizontal))
        .unwrap();
    let html = form.submit(Some("Save"), SubmitOptions::default()).unwrap();
    assert_eq!(
        html,
        "<div class=\"form-group row\"><div class=\"offset-md-2 col-md-10\">\
         <input type=\"submit\" class=\"btn btn-primary\" value=\"Save\"/>\
         </div></div>"
    );
    form.end();
}

#[test]
fn submit_default_alignment_and_variant_classes() {
    let mut form = FormHelper::new();
    form.create(FormOptions::default()).unwrap();

    let html = form.submit(None, SubmitOptions::default()).unwrap();
    assert_eq!(
        html,
        "<div class=\"submit\"><input type=\"submit\" class=\"btn btn-primary\" value=\"Submit\"/></div>"
    );

    let html = form
        .submit(Some("Delete"), SubmitOptions::default().class("danger lg"))
        .unwrap();
    assert!(html.contains("class=\"btn btn-danger btn-lg\""));
    form.end();
}

#[test]
fn inline_forms_wrap_submit_and_button() {
    let mut form = FormHelper::new();
    form.create(FormOptions::default().align(Alignment::Inline))
        .unwrap();

    let html = form.submit(None, SubmitOptions::default()).unwrap();
    assert!(html.starts_with("<div class=\"col-auto\">"));

    let html = form.button("Go", ButtonOptions::default()).unwrap();
    assert_eq!(
        html,
        "<div class=\"col-auto\"><button class=\"btn btn-secondary\" type=\"submit\">Go</button></div>"
    );
    form.end();
}

#[test]
fn controls_outside_a_form_are_rejected() {
    let mut form = FormHelper::new();
    assert!(matches!(
        form.control("title", ControlOptions::default()),
        Err(FormError::FormNotOpen)
    ));
    assert!(matches!(
        form.submit(None, SubmitOptions::default()),
        Err(FormError::FormNotOpen)
    ));
    assert!(matches!(
        form.button("Go", ButtonOptions::default()),
        Err(FormError::FormNotOpen)
    ));
}

#[test]
fn end_without_open_form_still_closes_the_tag() {
    let mut form = FormHelper::new();
    assert_eq!(form.end(), "</form>");
    assert_eq!(form.templater().depth(), 0);
}

#[test]
fn sessions_are_independent() {
    let mut horizontal = FormHelper::new();
    let mut plain = FormHelper::new();
    horizontal
        .create(FormOptions::default().align(Alignment::Horizontal))
        .unwrap();
    plain.create(FormOptions::default()).unwrap();

    let html = plain.control("title", ControlOptions::default()).unwrap();
    assert!(!html.contains("col-form-label"));

    let html = horizontal.control("title", ControlOptions::default()).unwrap();
    assert!(html.contains("col-form-label"));

    horizontal.end();
    plain.end();
}
