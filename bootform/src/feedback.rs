//! Validation feedback style and form-group positioning.
//!
//! Feedback is either an inline block under the input or a tooltip-style
//! popover; tooltips require the containing group to establish a positioning
//! context, so an unset position defaults to `relative` whenever the
//! effective style is tooltip. Inline forms have no room for block feedback
//! and force the tooltip style when none is configured.

use serde::{Deserialize, Serialize};

use crate::align::Alignment;

/// How validation errors are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackStyle {
    /// Block-level message under the input
    #[default]
    Default,
    /// Tooltip-style popover over the group
    Tooltip,
}

/// CSS positioning applied to a field's container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupPosition {
    Absolute,
    Fixed,
    Relative,
    Static,
    Sticky,
}

impl GroupPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupPosition::Absolute => "absolute",
            GroupPosition::Fixed => "fixed",
            GroupPosition::Relative => "relative",
            GroupPosition::Static => "static",
            GroupPosition::Sticky => "sticky",
        }
    }
}

/// The effective feedback decision for one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFeedback {
    /// Swap the block error template for the tooltip one
    pub tooltip: bool,
    pub position: Option<GroupPosition>,
}

impl ResolvedFeedback {
    /// The `formGroupPosition` template variable: `position-{value} `.
    /// The trailing space is deliberate — the value is concatenated directly
    /// into a class attribute by the container patterns.
    pub fn position_var(&self) -> Option<String> {
        self.position.map(|p| format!("position-{} ", p.as_str()))
    }
}

/// Resolve the effective feedback style and group position for one control.
///
/// Style: per-call value, else the form-level default, else tooltip under
/// inline alignment. Position: per-call value, else the form-level default,
/// else `relative` when the effective style is tooltip.
pub fn resolve(
    style: Option<FeedbackStyle>,
    position: Option<GroupPosition>,
    default_style: Option<FeedbackStyle>,
    default_position: Option<GroupPosition>,
    alignment: Alignment,
) -> ResolvedFeedback {
    let mut style = style.or(default_style);
    if style.is_none() && alignment == Alignment::Inline {
        style = Some(FeedbackStyle::Tooltip);
    }
    let tooltip = style == Some(FeedbackStyle::Tooltip);

    let mut position = position.or(default_position);
    if position.is_none() && tooltip {
        position = Some(GroupPosition::Relative);
    }

    ResolvedFeedback { tooltip, position }
}
