use anyhow::Result;
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use refcheck_core::{CollectorConfig, ExtractMode, Resolver, collect_sources, imports_for};
use std::path::Path;

use crate::{
    config::Config,
    types::{AuditReport, FileOutcome, FileStatus},
};

pub fn run_missing_imports_check(mut cfg: Config) -> Result<AuditReport> {
    info!("Starting missing imports check");

    cfg.initialize()?;
    let root = cfg.root()?.clone();

    let mut collector_cfg = CollectorConfig::new(cfg.source_roots()?);
    collector_cfg.excluded_dirs.extend(cfg.exclude_dirs.iter().cloned());
    debug!("Collecting source files from {:?}", cfg.source_dirs);

    let files = collect_sources(&collector_cfg);
    if files.is_empty() {
        warn!("No source files found under {}", root.display());
    }
    info!("Found {} source files", files.len());

    let resolver = Resolver::new(root.clone(), cfg.alias_rules.clone());

    // Collected in input order, so the report does not depend on scheduling
    let outcomes: Vec<FileOutcome> =
        files.par_iter().map(|file| audit_file(&resolver, &root, file, cfg.parser)).collect();

    let report = AuditReport::from_outcomes(outcomes);
    info!(
        "Missing imports check complete. Found {} missing, {} distinct unverified",
        report.missing_total, report.unverified_total
    );
    Ok(report)
}

fn audit_file(resolver: &Resolver, root: &Path, file: &Path, mode: ExtractMode) -> FileOutcome {
    let rel_file = file.strip_prefix(root).unwrap_or(file).to_string_lossy().to_string();

    let specs = match imports_for(file, mode) {
        Ok(specs) => specs,
        Err(e) => {
            warn!("Skipping unreadable file {}: {:#}", file.display(), e);
            return FileOutcome { file: rel_file, status: FileStatus::Unreadable };
        }
    };

    let resolutions = specs
        .into_iter()
        .map(|spec| {
            let resolution = resolver.resolve(file, &spec.request);
            trace!("{} -> '{}': {:?}", rel_file, spec.request, resolution);
            (spec.request, resolution)
        })
        .collect();

    FileOutcome { file: rel_file, status: FileStatus::Scanned(resolutions) }
}
