//! Marker processors
//!
//! Per platform type, in this order:
//!
//! 1. `@InheritMissingMembers`: clone every common member not yet overridden
//! 2. `@Inherit`: take the common body; enforce the `PlatformMust*` contracts
//! 3. `@OverwriteClass`: the common counterpart must exist
//! 4. `@Overwrite`: a structurally compatible common member must exist
//!
//! and once all types are done, every required `@OverwriteTarget` must have a
//! platform type of the same qualified name.

pub mod application;
pub mod ports;
pub mod processors;

pub use application::{default_processors, run_processors};
pub use ports::{MarkerProcessor, ProcessStats};
pub use processors::{
    inherit_missing_members, InheritMissingMembersProcessor, InheritProcessor,
    OverwriteClassProcessor, OverwriteProcessor, OverwriteTargetProcessor,
};
