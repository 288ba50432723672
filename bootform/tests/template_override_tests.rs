//! Scoped template overrides and feedback-style resolution through the
//! full rendering path.

use std::io::Write;

use bootform::{
    Alignment, ControlOptions, FeedbackStyle, FormConfig, FormHelper, FormOptions, GroupPosition,
    TemplateOverrides, TemplateSet,
};

fn overrides(entries: &[(&str, &str)]) -> TemplateOverrides {
    let mut set = TemplateSet::new();
    for (name, pattern) in entries {
        set.insert(name.to_string(), pattern.to_string());
    }
    TemplateOverrides::Set(set)
}

#[test]
fn per_call_override_applies_to_that_call_only() {
    let mut form = FormHelper::new();
    form.create(FormOptions::default()).unwrap();

    let html = form
        .control(
            "title",
            ControlOptions::default()
                .error("Bad")
                .templates(overrides(&[(
                    "error",
                    "<div class=\"custom-feedback\">{{content}}</div>",
                )])),
        )
        .unwrap();
    assert!(html.contains("<div class=\"custom-feedback\">Bad</div>"));

    // The next call sees the pre-push definition again.
    let html = form
        .control("title", ControlOptions::default().error("Bad"))
        .unwrap();
    assert!(html.contains("<div class=\"invalid-feedback\">Bad</div>"));
    assert!(!html.contains("custom-feedback"));
    form.end();
}

#[test_log::test]
fn external_template_file_behaves_like_an_inline_mapping() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "error = '<div class=\"file-feedback\">{{{{content}}}}</div>'"
    )
    .unwrap();

    let mut form = FormHelper::new();
    form.create(FormOptions::default()).unwrap();

    let html = form
        .control(
            "title",
            ControlOptions::default()
                .error("Bad")
                .templates(TemplateOverrides::File(file.path().to_path_buf())),
        )
        .unwrap();
    assert!(html.contains("<div class=\"file-feedback\">Bad</div>"));

    let html = form
        .control("title", ControlOptions::default().error("Bad"))
        .unwrap();
    assert!(html.contains("invalid-feedback"));
    form.end();
}

#[test]
fn form_level_template_overrides_last_for_the_whole_form() {
    let mut form = FormHelper::new();
    form.create(
        FormOptions::default().templates(overrides(&[(
            "help",
            "<p class=\"form-hint\">{{content}}</p>",
        )])),
    )
    .unwrap();

    let html = form
        .control("title", ControlOptions::default().help("Hint"))
        .unwrap();
    assert!(html.contains("<p class=\"form-hint\">Hint</p>"));
    form.end();

    // Gone after close.
    form.create(FormOptions::default()).unwrap();
    let html = form
        .control("title", ControlOptions::default().help("Hint"))
        .unwrap();
    assert!(html.contains("form-text text-muted"));
    form.end();
}

#[test]
fn config_templates_override_the_base_set_permanently() {
    let mut config = FormConfig::default();
    config.templates.insert(
        "error".to_string(),
        "<em class=\"oops\">{{content}}</em>".to_string(),
    );
    let mut form = FormHelper::with_config(config);
    form.create(FormOptions::default()).unwrap();
    let html = form
        .control("title", ControlOptions::default().error("Bad"))
        .unwrap();
    assert!(html.contains("<em class=\"oops\">Bad</em>"));
    form.end();
}

#[test]
fn tooltip_feedback_swaps_error_template_and_positions_the_group() {
    let mut form = FormHelper::new();
    form.create(FormOptions::default()).unwrap();
    let html = form
        .control(
            "title",
            ControlOptions::default()
                .error("Bad")
                .feedback_style(FeedbackStyle::Tooltip),
        )
        .unwrap();
    assert!(html.contains("<div class=\"invalid-tooltip\">Bad</div>"));
    assert!(!html.contains("invalid-feedback"));
    assert!(html.contains("position-relative "));
    form.end();
}

#[test]
fn explicit_group_position_wins_over_tooltip_default() {
    let mut form = FormHelper::new();
    form.create(FormOptions::default()).unwrap();
    let html = form
        .control(
            "title",
            ControlOptions::default()
                .error("Bad")
                .feedback_style(FeedbackStyle::Tooltip)
                .group_position(GroupPosition::Sticky),
        )
        .unwrap();
    assert!(html.contains("position-sticky "));
    assert!(!html.contains("position-relative"));
    form.end();
}

#[test]
fn inline_alignment_forces_tooltip_feedback() {
    let mut form = FormHelper::new();
    form.create(FormOptions::default().align(Alignment::Inline))
        .unwrap();
    let html = form
        .control("title", ControlOptions::default().error("Bad"))
        .unwrap();
    assert!(html.contains("invalid-tooltip"));
    assert!(html.contains("position-relative "));
    form.end();
}

#[test]
fn form_level_feedback_style_applies_to_every_control() {
    let config = FormConfig {
        feedback_style: Some(FeedbackStyle::Tooltip),
        ..FormConfig::default()
    };
    let mut form = FormHelper::with_config(config);
    form.create(FormOptions::default()).unwrap();
    let html = form
        .control("title", ControlOptions::default().error("Bad"))
        .unwrap();
    assert!(html.contains("invalid-tooltip"));
    form.end();
}

#[test]
fn overrides_are_visible_during_resolution() {
    // A per-call override of an inline wrapper is picked up by the
    // resolution step that swaps wrappers in.
    let mut form = FormHelper::new();
    form.create(FormOptions::default()).unwrap();
    let resolved = form
        .resolve_control(
            "terms",
            ControlOptions::new(bootform::FieldType::Checkbox)
                .inline(true)
                .templates(overrides(&[(
                    "checkboxInlineContainer",
                    "<span>{{content}}</span>",
                )])),
        )
        .unwrap();
    assert_eq!(
        resolved.template_overrides.get("checkboxContainer").unwrap(),
        "<span>{{content}}</span>"
    );
    form.end();
}
