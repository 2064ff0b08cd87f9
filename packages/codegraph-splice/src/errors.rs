//! Error types for codegraph-splice
//!
//! Marker violations are fatal and surface as their own variant; aggregated
//! validation findings travel inside [`SpliceError::ValidationFailure`].

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::validation::ValidationReport;

/// Main error type for splice operations
#[derive(Debug, Error)]
pub enum SpliceError {
    /// Missing or misconfigured common-root pointer
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The common source root does not exist
    #[error("Common source root {} does not exist", path.display())]
    MissingCommonRoot { path: PathBuf },

    /// A type or member marker has no structural counterpart in the common tree
    #[error("No overwrite target found in the common tree for {subject}")]
    NoOverwriteTarget { subject: String },

    /// An `@Inherit` member has no structural counterpart in the common tree
    #[error("No inherit target found in the common tree for {member}")]
    NoInheritTarget { member: String },

    /// Inheriting a member the common tree requires platforms to overwrite
    #[error("{member} is marked @PlatformMustOverwrite in the common tree and cannot be inherited")]
    IllegalOverwrite { member: String },

    /// Overriding a member the common tree requires platforms to inherit
    #[error("{member} is marked @PlatformMustInherit in the common tree but the platform declares its own implementation")]
    MissingInherit { member: String },

    /// Required overwrite targets without a platform counterpart
    #[error("Missing platform overwrite for required target(s): {}", targets.join(", "))]
    MissingOverwrite { targets: Vec<String> },

    /// Aggregated cross-tree validation findings
    #[error("Validation failed: {0}")]
    ValidationFailure(ValidationReport),

    /// Source could not be parsed at all
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// IO error
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpliceError {
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        SpliceError::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpliceError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error is an aggregated validation report rather than a fatal stop
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, SpliceError::ValidationFailure(_))
    }
}

/// Result type alias for splice operations
pub type Result<T> = std::result::Result<T, SpliceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_overwrite_lists_targets() {
        let err = SpliceError::MissingOverwrite {
            targets: vec!["a.Foo".to_string(), "a.Bar".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing platform overwrite for required target(s): a.Foo, a.Bar"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: SpliceError = ConfigError::MissingCommonRoot.into();
        assert!(matches!(err, SpliceError::Configuration(_)));
        assert!(!err.is_validation_failure());
    }
}
