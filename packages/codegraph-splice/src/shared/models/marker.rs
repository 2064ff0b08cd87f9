//! Marker vocabulary
//!
//! Markers are the only thing that drives the splice pipeline. They arrive as
//! Java annotations on types and members and are stripped before output; the
//! one exception is [`MarkerKind::Provenance`], which the pipeline stamps
//! itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::span::TextRange;

/// Pipeline stage that produced a generated or rewritten member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    InheritMissingMembers,
    Inherit,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::InheritMissingMembers => "inherit-missing-members",
            Stage::Inherit => "inherit",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Platform type replaces the common type of the same qualified name
    OverwriteClass,
    /// Common type every platform must replace (when `required`)
    OverwriteTarget { required: bool },
    /// Platform member replaces a common member
    Overwrite,
    /// Platform member takes the common member's body
    Inherit,
    /// Platform type pulls in every common member it does not declare
    InheritMissingMembers,
    /// Common member that every platform must overwrite
    PlatformMustOverwrite,
    /// Common member that every platform must inherit
    PlatformMustInherit,
    /// Stamped by the pipeline on generated or rewritten members
    Provenance { stage: Stage },
}

impl MarkerKind {
    /// Map an annotation name to a marker kind
    ///
    /// Matches on the simple name, so `@a.b.Overwrite` and `@Overwrite` are the
    /// same marker. `required` defaults to `true` when absent.
    pub fn from_annotation(name: &str, args: &[(String, String)]) -> Option<Self> {
        let simple = name.rsplit('.').next().unwrap_or(name).trim();
        let kind = match simple {
            "OverwriteClass" => MarkerKind::OverwriteClass,
            "OverwriteTarget" => {
                let required = args
                    .iter()
                    .find(|(key, _)| key == "required" || key == "value")
                    .map(|(_, value)| value.trim() != "false")
                    .unwrap_or(true);
                MarkerKind::OverwriteTarget { required }
            }
            "Overwrite" => MarkerKind::Overwrite,
            "Inherit" => MarkerKind::Inherit,
            "InheritMissingMembers" => MarkerKind::InheritMissingMembers,
            "PlatformMustOverwrite" => MarkerKind::PlatformMustOverwrite,
            "PlatformMustInherit" => MarkerKind::PlatformMustInherit,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkerKind::OverwriteClass => "OverwriteClass",
            MarkerKind::OverwriteTarget { .. } => "OverwriteTarget",
            MarkerKind::Overwrite => "Overwrite",
            MarkerKind::Inherit => "Inherit",
            MarkerKind::InheritMissingMembers => "InheritMissingMembers",
            MarkerKind::PlatformMustOverwrite => "PlatformMustOverwrite",
            MarkerKind::PlatformMustInherit => "PlatformMustInherit",
            MarkerKind::Provenance { .. } => "Provenance",
        }
    }

    /// Same marker ignoring arguments
    pub fn same_kind(&self, other: &MarkerKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A marker attached to a type or member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Annotation arguments as written (`key = value`; a bare value uses key `value`)
    pub args: Vec<(String, String)>,
    /// Annotation location in the owning file, `None` for pipeline-stamped markers
    pub range: Option<TextRange>,
}

impl Marker {
    pub fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
            range: None,
        }
    }

    pub fn provenance(stage: Stage) -> Self {
        Self::new(MarkerKind::Provenance { stage })
    }

    pub fn with_args(mut self, args: Vec<(String, String)>) -> Self {
        self.args = args;
        self
    }

    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Marker-set helpers shared by type and member nodes
pub trait MarkerSet {
    fn markers(&self) -> &[Marker];
    fn markers_mut(&mut self) -> &mut Vec<Marker>;

    fn has_marker(&self, kind: &MarkerKind) -> bool {
        self.markers().iter().any(|m| m.kind.same_kind(kind))
    }

    fn find_marker(&self, kind: &MarkerKind) -> Option<&Marker> {
        self.markers().iter().find(|m| m.kind.same_kind(kind))
    }

    /// Remove every marker of this kind; returns how many were removed
    fn strip_marker(&mut self, kind: &MarkerKind) -> usize {
        let markers = self.markers_mut();
        let before = markers.len();
        markers.retain(|m| !m.kind.same_kind(kind));
        before - markers.len()
    }

    fn stamp_provenance(&mut self, stage: Stage) {
        let marker = Marker::provenance(stage);
        let markers = self.markers_mut();
        if !markers.contains(&marker) {
            markers.push(marker);
        }
    }

    fn provenance(&self) -> Option<Stage> {
        self.markers().iter().find_map(|m| match m.kind {
            MarkerKind::Provenance { stage } => Some(stage),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_annotation_simple_and_qualified() {
        assert_eq!(
            MarkerKind::from_annotation("Overwrite", &[]),
            Some(MarkerKind::Overwrite)
        );
        assert_eq!(
            MarkerKind::from_annotation("dev.splice.annotations.Inherit", &[]),
            Some(MarkerKind::Inherit)
        );
        assert_eq!(MarkerKind::from_annotation("Override", &[]), None);
    }

    #[test]
    fn test_overwrite_target_required_argument() {
        let required = MarkerKind::from_annotation("OverwriteTarget", &[]);
        assert_eq!(required, Some(MarkerKind::OverwriteTarget { required: true }));

        let optional = MarkerKind::from_annotation(
            "OverwriteTarget",
            &[("required".to_string(), "false".to_string())],
        );
        assert_eq!(optional, Some(MarkerKind::OverwriteTarget { required: false }));
    }

    #[test]
    fn test_same_kind_ignores_arguments() {
        let a = MarkerKind::OverwriteTarget { required: true };
        let b = MarkerKind::OverwriteTarget { required: false };
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&MarkerKind::Overwrite));
    }
}
