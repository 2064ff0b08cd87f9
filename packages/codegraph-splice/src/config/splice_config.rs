//! Runtime configuration for one splice build

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;

pub const DEFAULT_PROVENANCE_TAG: &str = "codegraph-splice";
const DEFAULT_EXTENSION: &str = "java";
const SUPPORTED_VERSIONS: &[u32] = &[1];

/// When diagnostics are rendered with ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve `Auto` against the terminal and `NO_COLOR`
    pub fn enabled(self) -> bool {
        use std::io::IsTerminal;

        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
            }
        }
    }
}

/// Splice build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceConfig {
    /// Platform-neutral source root
    pub common_root: PathBuf,
    /// Platform-specific source root
    pub platform_root: PathBuf,
    /// Where the spliced platform tree is written
    pub output_dir: PathBuf,
    /// Also emit common files the platform does not replace
    pub emit_common: bool,
    /// Text used in provenance comments on generated members
    pub provenance_tag: String,
    pub color: ColorChoice,
    /// Source file extension (without dot)
    pub extension: String,
}

impl SpliceConfig {
    pub fn new(
        common_root: impl Into<PathBuf>,
        platform_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            common_root: common_root.into(),
            platform_root: platform_root.into(),
            output_dir: output_dir.into(),
            emit_common: true,
            provenance_tag: DEFAULT_PROVENANCE_TAG.to_string(),
            color: ColorChoice::Auto,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn emit_common(mut self, emit: bool) -> Self {
        self.emit_common = emit;
        self
    }

    pub fn provenance_tag(mut self, tag: impl Into<String>) -> Self {
        self.provenance_tag = tag.into();
        self
    }

    pub fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Check the configuration before any tree is touched
    pub fn validate(&self) -> ConfigResult<()> {
        if self.common_root.as_os_str().is_empty() {
            return Err(ConfigError::MissingCommonRoot);
        }
        if self.platform_root.as_os_str().is_empty() {
            return Err(ConfigError::MissingPlatformRoot);
        }
        if self.extension.trim().is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        if same_path(&self.output_dir, &self.common_root) {
            return Err(ConfigError::OutputOverlapsInput {
                field: "common_root",
                path: self.common_root.display().to_string(),
            });
        }
        if same_path(&self.output_dir, &self.platform_root) {
            return Err(ConfigError::OutputOverlapsInput {
                field: "platform_root",
                path: self.platform_root.display().to_string(),
            });
        }
        Ok(())
    }

    /// Load and validate a YAML configuration file
    ///
    /// Relative roots are resolved against the directory holding the file.
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_yaml_str(&content, base)
    }

    pub fn from_yaml_str(content: &str, base: &Path) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let common_root = file.common_root.ok_or(ConfigError::MissingCommonRoot)?;
        let platform_root = file
            .platform_root
            .ok_or(ConfigError::MissingPlatformRoot)?;

        let mut config = Self::new(
            base.join(common_root),
            base.join(platform_root),
            base.join(file.output_dir),
        );
        if let Some(emit) = file.emit_common {
            config.emit_common = emit;
        }
        if let Some(tag) = file.provenance_tag {
            config.provenance_tag = tag;
        }
        if let Some(color) = file.color {
            config.color = color;
        }
        if let Some(extension) = file.extension {
            config.extension = extension;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            common_root: Some(self.common_root.clone()),
            platform_root: Some(self.platform_root.clone()),
            output_dir: self.output_dir.clone(),
            emit_common: Some(self.emit_common),
            provenance_tag: Some(self.provenance_tag.clone()),
            color: Some(self.color),
            extension: Some(self.extension.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
