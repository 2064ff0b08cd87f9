//! The five marker stages, in execution order

mod clone;
mod inherit;
mod inherit_missing;
mod overwrite;
mod overwrite_class;
mod overwrite_target;

pub use inherit::InheritProcessor;
pub use inherit_missing::{inherit_missing_members, InheritMissingMembersProcessor};
pub use overwrite::OverwriteProcessor;
pub use overwrite_class::OverwriteClassProcessor;
pub use overwrite_target::OverwriteTargetProcessor;
