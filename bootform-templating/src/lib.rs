//! String templating for bootform
//!
//! `bootform-templating` is the rendering collaborator of the form
//! composition engine: a store of named markup patterns with `{{placeholder}}`
//! substitution, a scope stack for temporary overrides, and HTML attribute
//! bags with an order-preserving CSS class list.
//!
//! # Architecture
//!
//! - **Patterns are plain strings**: `{{name}}` placeholders substitute from a
//!   variable map; unknown placeholders render empty, unknown template names
//!   render the empty string
//! - **Scope stack**: `push()` snapshots the current set, `add()`/`load()`
//!   merge into it, `pop()` restores — strict LIFO
//! - **Attribute bags**: `Attributes` serializes to escaped ` key="value"`
//!   pairs with the class list special-cased; `ClassList` injection is
//!   idempotent and keeps first-seen order

pub mod attributes;
pub mod error;
pub mod templater;

pub use attributes::{html_escape, Attributes, ClassList};
pub use error::{Result, TemplatingError};
pub use templater::{StringTemplater, TemplateSet, TemplateVars};
