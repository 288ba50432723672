//! Form-level configuration defaults.

use bootform_templating::TemplateSet;
use serde::{Deserialize, Serialize};

use crate::align::{Alignment, GridSpec};
use crate::feedback::{FeedbackStyle, GroupPosition};

/// Defaults applied to every form a helper opens. Per-form and per-call
/// options override these key-by-key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormConfig {
    /// Alignment used when a form requests none and none is detectable
    pub align: Alignment,

    /// Class injected on inputs that carry a validation error
    pub error_class: String,

    /// Grid applied under horizontal alignment when no per-form grid is given
    pub grid: GridSpec,

    /// Form-level feedback style; unset lets inline forms force tooltip
    pub feedback_style: Option<FeedbackStyle>,

    /// Form-level group positioning; unset lets tooltip feedback force relative
    pub group_position: Option<GroupPosition>,

    /// Extra template definitions merged over the built-in base set
    pub templates: TemplateSet,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            align: Alignment::Default,
            error_class: "is-invalid".to_string(),
            grid: GridSpec::default(),
            feedback_style: None,
            group_position: None,
            templates: TemplateSet::new(),
        }
    }
}
