use colored::Colorize;
use log::debug;
use std::io::{self, Write};

use crate::types::AuditReport;

/// Writes the line-oriented report.
///
/// The `KEY=value` and prefixed lines are a stable interface for CI scripts;
/// nothing else is written here.
pub fn print_report<W: Write>(writer: &mut W, report: &AuditReport) -> io::Result<()> {
    debug!("Printing text report for {} missing imports", report.missing_total);
    writeln!(writer, "MISSING_IMPORTS_TOTAL={}", report.missing_total)?;
    for m in &report.missing {
        writeln!(writer, "MISSING_IMPORT {} -> {}", m.file, m.specifier)?;
    }

    writeln!(writer, "UNVERIFIED_BARE_SPECIFIERS_TOTAL={}", report.unverified_total)?;
    for u in &report.unverified {
        writeln!(writer, "UNVERIFIED_BARE {} (count={})", u.specifier, u.count)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn print_json<W: Write>(writer: &mut W, report: &AuditReport) -> anyhow::Result<()> {
    debug!("Printing JSON report");
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// One human-oriented status line, meant for stderr.
pub fn print_summary<W: Write>(
    writer: &mut W,
    report: &AuditReport,
    elapsed_ms: u128,
    num_threads: usize,
) -> io::Result<()> {
    if report.passed() {
        write!(writer, "{} No missing imports", "✓".green().bold())?;
    } else {
        write!(
            writer,
            "{} {} missing imports",
            "✗".red().bold(),
            report.missing_total.to_string().red().bold()
        )?;
    }

    if report.unreadable_files > 0 {
        write!(
            writer,
            " ({} unreadable files skipped)",
            report.unreadable_files.to_string().yellow()
        )?;
    }

    writeln!(
        writer,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        report.files_scanned.to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MissingImport, UnverifiedSpecifier};

    fn sample_report() -> AuditReport {
        AuditReport {
            files_scanned: 3,
            unreadable_files: 1,
            missing_total: 2,
            missing: vec![
                MissingImport { file: "app/page.tsx".into(), specifier: "@/lib/missing".into() },
                MissingImport { file: "lib/api.ts".into(), specifier: "./gone".into() },
            ],
            unverified_total: 2,
            unverified: vec![
                UnverifiedSpecifier { specifier: "react".into(), count: 7 },
                UnverifiedSpecifier { specifier: "@scope/pkg".into(), count: 1 },
            ],
        }
    }

    #[test]
    fn test_print_report_lines() {
        let mut out = Vec::new();
        print_report(&mut out, &sample_report()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "MISSING_IMPORTS_TOTAL=2\n\
             MISSING_IMPORT app/page.tsx -> @/lib/missing\n\
             MISSING_IMPORT lib/api.ts -> ./gone\n\
             UNVERIFIED_BARE_SPECIFIERS_TOTAL=2\n\
             UNVERIFIED_BARE react (count=7)\n\
             UNVERIFIED_BARE @scope/pkg (count=1)\n"
        );
    }

    #[test]
    fn test_print_json_fields() {
        let mut out = Vec::new();
        print_json(&mut out, &sample_report()).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["missing_total"], 2);
        assert_eq!(v["unreadable_files"], 1);
        assert_eq!(v["missing"][0]["file"], "app/page.tsx");
        assert_eq!(v["missing"][0]["specifier"], "@/lib/missing");
        assert_eq!(v["unverified"][0]["specifier"], "react");
        assert_eq!(v["unverified"][0]["count"], 7);
    }

    #[test]
    fn test_print_summary_mentions_counts() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_summary(&mut out, &sample_report(), 12, 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("✗ 2 missing imports (1 unreadable files skipped)\n"));
        assert!(text.contains("Finished in 12ms on 3 files (using 4 threads)."));

        let mut out = Vec::new();
        print_summary(&mut out, &AuditReport::default(), 1, 1).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("✓ No missing imports\n"));
    }
}
