//! Missing-import detection for JavaScript/TypeScript projects.
//!
//! Every relative (`./x`, `../x`) and aliased (`@/x`) specifier found under the
//! configured source directories must resolve to an existing file. Bare
//! specifiers (`react`, `@scope/pkg`) are not resolved; they are counted and
//! listed as unverified. A run fails if and only if something is missing.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use refcheck_missing_imports::{Config, print_report, run_missing_imports_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::parse_from(["missing-imports", "--root", "/path/to/project"]);
//! let report = run_missing_imports_check(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! print_report(&mut stdout, &report)?;
//! stdout.flush()?;
//!
//! std::process::exit(report.exit_code());
//! # }
//! ```

mod checker;
mod config;
mod constants;
mod report;
mod reporter;
mod types;

// Re-export public API
pub use checker::run_missing_imports_check;
pub use config::{Config, OutputFormat};
pub use constants::{MISSING_EXIT_CODE, UNVERIFIED_SAMPLE_LIMIT};
pub use reporter::{print_json, print_report, print_summary};
pub use types::{AuditReport, FileOutcome, FileStatus, MissingImport, UnverifiedSpecifier};
