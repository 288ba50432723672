//! Error types for the templating store

use std::path::PathBuf;
use thiserror::Error;

/// Result type for templating operations
pub type Result<T> = std::result::Result<T, TemplatingError>;

/// Errors that can occur when loading external template definitions.
///
/// Lookups and formatting never error: an unknown template name renders as
/// the empty string and `get` signals absence with `None`.
#[derive(Debug, Error)]
pub enum TemplatingError {
    /// Template file could not be read
    #[error("failed to read template file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Template file is not a valid TOML table of name → pattern
    #[error("failed to parse template file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_read_error_names_the_path() {
        let err = TemplatingError::FileRead {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.toml"));
    }
}
