//! Configuration file schema (YAML v1)
//!
//! Only the on-disk shape lives here; conversion into [`SpliceConfig`] is in
//! `splice_config.rs`.
//!
//! [`SpliceConfig`]: super::SpliceConfig

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::splice_config::ColorChoice;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    pub common_root: Option<PathBuf>,

    pub platform_root: Option<PathBuf>,

    pub output_dir: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emit_common: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance_tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorChoice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}
