//! Bootstrap 5 form-control composition engine
//!
//! `bootform` renders web-form markup with a consistent visual framework —
//! labels, help text, validation feedback, grouping, responsive grid
//! columns — across three alignment regimes (default, horizontal, inline).
//! The core is a composition engine: given a field descriptor and the
//! ambient context of the enclosing form, it resolves an internally
//! consistent set of rendering directives (template patterns, substitution
//! variables, CSS class lists, container nesting) and renders them through
//! a layered string-template store.
//!
//! # Architecture
//!
//! - **Session object**: one [`FormHelper`] per render session owns the
//!   template store and the per-form alignment state; nothing is shared
//!   between sessions
//! - **Three template layers**: built-in base set, alignment overlay
//!   (instantiated with grid classes at form open), and per-call scoped
//!   overrides — later layers win key-by-key
//! - **Enum-keyed dispatch**: each [`FieldType`] maps to a pure option
//!   transform; exhaustiveness is a compile-time property
//! - **Pure computation**: no I/O and no blocking calls; the only failure
//!   points are form configuration and external template files
//!
//! # Quick start
//!
//! ```
//! use bootform::{Alignment, ControlOptions, FormHelper, FormOptions};
//!
//! let mut form = FormHelper::new();
//! let mut html = form.create(FormOptions::default().align(Alignment::Horizontal))?;
//! html += &form.control("user.email", ControlOptions::default().help("Work address"))?;
//! html += &form.end();
//! assert!(html.contains("col-form-label col-md-2"));
//! # Ok::<(), bootform::FormError>(())
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod feedback;
pub mod helper;
pub mod options;
pub mod templates;
pub mod widget;

mod resolve;

pub use align::{detect_alignment, grid_class, Alignment, GridColumns, GridPosition, GridSpec};
pub use config::FormConfig;
pub use error::{FormError, Result};
pub use feedback::{FeedbackStyle, GroupPosition, ResolvedFeedback};
pub use helper::{ButtonOptions, FormHelper, FormOptions, StaticControlOptions, SubmitOptions};
pub use options::{
    ControlOptions, FieldType, HelpOptions, LabelOptions, Multiple, ResolvedControl,
    ResolvedLabel, SelectOption, TemplateOverrides,
};
pub use resolve::{apply_button_classes, multi_input_attributes};
pub use widget::{Widget, WidgetRegistry};

pub use bootform_templating::{
    html_escape, Attributes, ClassList, StringTemplater, TemplateSet, TemplateVars,
};
