//! Error types for the form composition engine

use thiserror::Error;

/// Result type for form rendering operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while composing form markup.
///
/// Option transforms are total; the only failure points are form
/// configuration (alignment) and external template files.
#[derive(Debug, Error)]
pub enum FormError {
    /// Alignment value is not one of the recognized modes
    #[error("invalid value `{given}` for the `align` option. Valid values are: default, horizontal, inline")]
    InvalidAlignment { given: String },

    /// A control was rendered outside an open form
    #[error("no form is open: call `create()` before rendering controls")]
    FormNotOpen,

    /// External template file could not be loaded
    #[error(transparent)]
    Templating(#[from] bootform_templating::TemplatingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_alignment_lists_valid_values() {
        let err = FormError::InvalidAlignment {
            given: "diagonal".into(),
        };
        let message = err.to_string();
        assert!(message.contains("diagonal"));
        assert!(message.contains("default, horizontal, inline"));
    }
}
