/*
 * Codegraph Splice - common/platform source tree merge engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (markers, declarations, ranges) and text utilities
 * - features/    : Vertical slices (parsing → source tree → comparator → markers → validation → serialization)
 * - pipeline/    : Orchestration
 * - config/      : YAML configuration
 *
 * A common Java tree holds the platform-neutral implementation; each
 * platform tree holds only what differs. Markers on the platform side drive
 * how the two are merged, validated and written back out.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ColorChoice, ConfigError, SpliceConfig};
pub use errors::{Result, SpliceError};
pub use features::common_cache::{BuildContext, CommonIndex, CommonTreeCache};
pub use features::comparator::MemberComparator;
pub use features::markers::{default_processors, run_processors, MarkerProcessor, ProcessStats};
pub use features::parsing::{JavaSourceParser, SourceParser};
pub use features::serialization::{repair, repair_file, EmittedFile, TreeEmitter};
pub use features::source_tree::{parse_tree, MemberId, MemberNode, SourceTree, TypeId, TypeNode};
pub use features::type_resolution::TypeFacts;
pub use features::validation::{
    Diagnostic, DiagnosticCategory, DiagnosticRenderer, ValidationReport, Validator,
};
pub use pipeline::{PipelineOutcome, PipelineStats, SplicePipeline, SpliceOutput};
pub use shared::models::{Marker, MarkerKind, MarkerSet, MemberKind, Stage};
