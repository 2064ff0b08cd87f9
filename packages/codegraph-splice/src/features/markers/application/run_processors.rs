use tracing::{debug, info};

use crate::errors::Result;
use crate::features::common_cache::BuildContext;
use crate::features::markers::ports::{MarkerProcessor, ProcessStats};
use crate::features::markers::processors::{
    InheritMissingMembersProcessor, InheritProcessor, OverwriteClassProcessor,
    OverwriteProcessor, OverwriteTargetProcessor,
};
use crate::features::source_tree::SourceTree;

/// Stages in their fixed order
pub fn default_processors() -> Vec<Box<dyn MarkerProcessor>> {
    vec![
        Box::new(InheritMissingMembersProcessor),
        Box::new(InheritProcessor),
        Box::new(OverwriteClassProcessor),
        Box::new(OverwriteProcessor),
        Box::new(OverwriteTargetProcessor),
    ]
}

/// Run every stage over every platform type, then every `finish` hook
///
/// The first fatal marker violation stops processing.
pub fn run_processors(
    ctx: &BuildContext,
    tree: &mut SourceTree,
    processors: &[Box<dyn MarkerProcessor>],
) -> Result<ProcessStats> {
    let mut stats = ProcessStats::default();

    for ty in tree.all_types() {
        for processor in processors {
            if let Err(e) = processor.process_type(ctx, tree, ty, &mut stats) {
                debug!("{} stopped at {}", processor.name(), tree.ty(ty).qualified_name);
                return Err(e);
            }
        }
        stats.types_processed += 1;
    }
    for processor in processors {
        debug!("Finishing {}", processor.name());
        processor.finish(ctx, tree)?;
    }

    info!(
        "Processed {} types: {} members and {} types cloned, {} bodies inherited, {} markers stripped",
        stats.types_processed,
        stats.members_cloned,
        stats.types_cloned,
        stats.bodies_inherited,
        stats.markers_stripped
    );
    Ok(stats)
}
