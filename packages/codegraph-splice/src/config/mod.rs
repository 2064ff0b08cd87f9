//! Splice configuration
//!
//! Two ways in:
//!
//! ```rust,ignore
//! use codegraph_splice::config::SpliceConfig;
//!
//! // Programmatic (build-unit glue)
//! let config = SpliceConfig::new("common/src", "fabric/src", "build/spliced/fabric")
//!     .emit_common(false);
//!
//! // YAML
//! let config = SpliceConfig::from_yaml("splice.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod splice_config;

pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use splice_config::{ColorChoice, SpliceConfig, DEFAULT_PROVENANCE_TAG};
