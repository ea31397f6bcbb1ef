use log::debug;
use refcheck_core::Resolution;
use std::collections::HashMap;

use crate::{
    constants::{MISSING_EXIT_CODE, UNVERIFIED_SAMPLE_LIMIT},
    types::{AuditReport, FileOutcome, FileStatus, MissingImport, UnverifiedSpecifier},
};

impl AuditReport {
    /// Folds per-file outcomes into a report.
    ///
    /// Missing entries keep the order they arrive in, so callers must feed
    /// files in a deterministic order. Bare specifiers are counted by exact
    /// text across the whole run; equal counts keep first-seen order.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = FileOutcome>,
    {
        let mut report = AuditReport::default();
        let mut unverified: Vec<UnverifiedSpecifier> = Vec::new();
        let mut unverified_index: HashMap<String, usize> = HashMap::new();

        for outcome in outcomes {
            let FileStatus::Scanned(resolutions) = outcome.status else {
                report.unreadable_files += 1;
                continue;
            };
            report.files_scanned += 1;

            for (specifier, resolution) in resolutions {
                match resolution {
                    Resolution::Resolved(_) => {}
                    Resolution::Missing => report
                        .missing
                        .push(MissingImport { file: outcome.file.clone(), specifier }),
                    Resolution::Unverified => match unverified_index.get(&specifier) {
                        Some(&idx) => unverified[idx].count += 1,
                        None => {
                            unverified_index.insert(specifier.clone(), unverified.len());
                            unverified.push(UnverifiedSpecifier { specifier, count: 1 });
                        }
                    },
                }
            }
        }

        // Stable sort: ties stay in first-seen order
        unverified.sort_by(|a, b| b.count.cmp(&a.count));
        report.unverified_total = unverified.len();
        unverified.truncate(UNVERIFIED_SAMPLE_LIMIT);
        report.unverified = unverified;
        report.missing_total = report.missing.len();

        debug!(
            "Aggregated {} files: {} missing, {} distinct unverified, {} unreadable",
            report.files_scanned,
            report.missing_total,
            report.unverified_total,
            report.unreadable_files
        );
        report
    }

    /// A run passes if and only if no import is missing.
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { MISSING_EXIT_CODE }
    }
}
