//! Pipeline orchestrator
//!
//! Common cache → platform parse → marker stages → validation → emission →
//! import repair → write. Any fatal error stops the build before anything is
//! written.

use tracing::{info, warn};

use super::result::{PipelineOutcome, PipelineStats, SpliceOutput};
use crate::config::SpliceConfig;
use crate::errors::Result;
use crate::features::common_cache::{BuildContext, CommonTreeCache};
use crate::features::markers::{default_processors, run_processors};
use crate::features::parsing::{collect_sources, parse_sources, JavaSourceParser, SourceParser};
use crate::features::serialization::{repair, write_emitted, EmitOrigin, TreeEmitter};
use crate::features::source_tree::SourceTree;
use crate::features::validation::Validator;

/// One platform build
pub struct SplicePipeline<'c, P: SourceParser = JavaSourceParser> {
    config: SpliceConfig,
    parser: P,
    cache: &'c CommonTreeCache,
}

impl SplicePipeline<'static, JavaSourceParser> {
    /// Pipeline using the process-wide common-tree cache
    pub fn new(config: SpliceConfig) -> Self {
        Self {
            config,
            parser: JavaSourceParser::new(),
            cache: CommonTreeCache::global(),
        }
    }
}

impl<'c, P: SourceParser> SplicePipeline<'c, P> {
    pub fn with_parser(config: SpliceConfig, parser: P, cache: &'c CommonTreeCache) -> Self {
        Self {
            config,
            parser,
            cache,
        }
    }

    /// Use a specific cache instead of the process-wide one
    pub fn with_cache<'d>(self, cache: &'d CommonTreeCache) -> SplicePipeline<'d, P> {
        SplicePipeline {
            config: self.config,
            parser: self.parser,
            cache,
        }
    }

    pub fn config(&self) -> &SpliceConfig {
        &self.config
    }

    /// Full build: splice, validate and write the output directory
    pub fn run(&self) -> Result<PipelineOutcome> {
        let Some(mut output) = self.splice()? else {
            return Ok(PipelineOutcome::Skipped);
        };
        output.stats.files_written = write_emitted(&self.config.output_dir, &output.files)?;
        info!(
            "Wrote {} files to {}",
            output.stats.files_written,
            self.config.output_dir.display()
        );
        Ok(PipelineOutcome::Completed(output.stats))
    }

    /// Everything `run` does except writing
    pub fn check(&self) -> Result<PipelineOutcome> {
        Ok(match self.splice()? {
            Some(output) => PipelineOutcome::Completed(output.stats),
            None => PipelineOutcome::Skipped,
        })
    }

    /// Process, validate and emit in memory; `None` when there is nothing to do
    pub fn splice(&self) -> Result<Option<SpliceOutput>> {
        self.config.validate()?;
        let extension = self.config.extension.as_str();
        let platform_root = self.config.platform_root.as_path();
        if !self.parser.supports_extension(extension) {
            warn!(
                "{} parser does not handle .{} files, parsing them anyway",
                self.parser.language_name(),
                extension
            );
        }

        if !platform_root.is_dir() {
            info!("Platform root {} does not exist, skipping", platform_root.display());
            return Ok(None);
        }
        let sources = collect_sources(platform_root, extension)?;
        if sources.is_empty() {
            info!("No sources under {}, skipping", platform_root.display());
            return Ok(None);
        }

        let common = self
            .cache
            .init_with(&self.config.common_root, extension, &self.parser)?;

        let units = parse_sources(platform_root, &sources, &self.parser)?;
        let mut platform = SourceTree::from_units(platform_root, units);
        info!(
            "Platform tree: {} files, {} types",
            platform.file_count(),
            platform.type_count()
        );

        let ctx = BuildContext::new(common, &platform);
        let process = run_processors(&ctx, &mut platform, &default_processors())?;
        Validator::new(&ctx).validate(&platform).into_result()?;

        let emitter = TreeEmitter::new(&self.config.provenance_tag);
        let common_tree = ctx.common_tree();
        let mut files = emitter.emit_platform(&platform);
        let mut files_repaired = 0;
        for file in &mut files {
            if let Some(original) = common_tree.file_by_path(&file.rel_path) {
                let repaired = repair(&file.text, &common_tree.file(original).text);
                if repaired != file.text {
                    files_repaired += 1;
                    file.text = repaired;
                }
            }
        }
        if self.config.emit_common {
            files.extend(emitter.emit_common(common_tree, &platform));
        }

        let stats = PipelineStats {
            platform_files: platform.file_count(),
            process,
            files_emitted: files.len(),
            files_repaired,
            files_written: 0,
        };
        info!(
            "Emitted {} files ({} from common, {} repaired)",
            stats.files_emitted,
            files.iter().filter(|f| f.origin == EmitOrigin::Common).count(),
            files_repaired
        );
        Ok(Some(SpliceOutput { files, stats }))
    }
}
