//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No common root was configured
    #[error("Missing 'common_root'. Point it at the platform-neutral source tree.")]
    MissingCommonRoot,

    /// No platform root was configured
    #[error("Missing 'platform_root'. Point it at the platform-specific source tree.")]
    MissingPlatformRoot,

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Output directory would overwrite one of the input trees
    #[error("'output_dir' must differ from '{field}' ({path})")]
    OutputOverlapsInput { field: &'static str, path: String },

    /// Empty source extension
    #[error("'extension' must not be empty")]
    EmptyExtension,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
