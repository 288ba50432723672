//! Form alignment modes and responsive grid columns.
//!
//! Alignment is resolved once per form at open time: an explicit request is
//! validated, otherwise the form's outer class list is scanned for
//! `form-horizontal` / `form-inline` markers, otherwise the configured
//! default applies. A grid spec exists only under horizontal alignment.

use std::fmt;
use std::str::FromStr;

use bootform_templating::ClassList;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// The layout regime for a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Stacked label over input
    #[default]
    Default,
    /// Label and input in grid columns
    Horizontal,
    /// Fields laid out in a single row
    Inline,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Default => "default",
            Alignment::Horizontal => "horizontal",
            Alignment::Inline => "inline",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "default" => Ok(Alignment::Default),
            "horizontal" => Ok(Alignment::Horizontal),
            "inline" => Ok(Alignment::Inline),
            other => Err(FormError::InvalidAlignment {
                given: other.to_string(),
            }),
        }
    }
}

/// Detect alignment from a form's outer class list (`form-horizontal`,
/// `form-inline`), falling back to the configured default.
pub fn detect_alignment(classes: &ClassList, fallback: Alignment) -> Alignment {
    for align in [Alignment::Horizontal, Alignment::Inline] {
        if classes.has_any([format!("form-{align}")]) {
            return align;
        }
    }
    fallback
}

/// A grid column region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPosition {
    Left,
    Middle,
    Right,
}

/// Column counts for the label (left), input (middle), and trailing (right)
/// regions at one breakpoint. A missing position occupies no column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridColumns {
    pub left: Option<u32>,
    pub middle: Option<u32>,
    pub right: Option<u32>,
}

impl GridColumns {
    pub fn new(left: u32, middle: u32, right: u32) -> Self {
        Self {
            left: Some(left),
            middle: Some(middle),
            right: Some(right),
        }
    }

    fn get(&self, position: GridPosition) -> Option<u32> {
        match position {
            GridPosition::Left => self.left,
            GridPosition::Middle => self.middle,
            GridPosition::Right => self.right,
        }
    }
}

/// A breakpoint → column-count table, present only under horizontal
/// alignment. The single-breakpoint form maps to the implicit `md`
/// breakpoint; the table form emits one class per breakpoint that defines
/// the requested position, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridSpec {
    Columns(GridColumns),
    Breakpoints(IndexMap<String, GridColumns>),
}

impl Default for GridSpec {
    /// The configured default grid: `{left: 2, middle: 10, right: 0}`.
    fn default() -> Self {
        GridSpec::Columns(GridColumns::new(2, 10, 0))
    }
}

impl GridSpec {
    /// The grid class string for a position, e.g. `col-md-2`, or the
    /// offset variant `offset-md-2`. Missing positions yield no class.
    pub fn class_for(&self, position: GridPosition, offset: bool) -> String {
        let prefix = if offset { "offset" } else { "col" };
        match self {
            GridSpec::Columns(columns) => columns
                .get(position)
                .map(|n| format!("{prefix}-md-{n}"))
                .unwrap_or_default(),
            GridSpec::Breakpoints(table) => table
                .iter()
                .filter_map(|(breakpoint, columns)| {
                    columns
                        .get(position)
                        .map(|n| format!("{prefix}-{breakpoint}-{n}"))
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// The class string for a control spanning the input region offset past
    /// the label region, used by checkbox and submit containers under
    /// horizontal alignment.
    pub fn offset_group_class(&self) -> String {
        let offset = self.class_for(GridPosition::Left, true);
        let middle = self.class_for(GridPosition::Middle, false);
        [offset, middle]
            .iter()
            .filter(|class| !class.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `class_for` over an optional grid: no grid yields the empty string.
pub fn grid_class(grid: Option<&GridSpec>, position: GridPosition, offset: bool) -> String {
    grid.map(|g| g.class_for(position, offset)).unwrap_or_default()
}
