use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info};
use refcheck_missing_imports::{Config, OutputFormat};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "refcheck")]
#[command(about = "Audit module references in a source tree before it is built", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report relative and aliased imports that do not resolve to a file
    MissingImports(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::MissingImports(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!(
                "Running missing imports check with {} parser (using {} threads)",
                cfg.parser, num_threads
            );
            debug!("Config: root={:?}, source_dirs={:?}", cfg.root, cfg.source_dirs);

            let format = cfg.format;
            let quiet = cfg.quiet;
            let report = refcheck_missing_imports::run_missing_imports_check(cfg)?;

            match format {
                OutputFormat::Text => {
                    refcheck_missing_imports::print_report(&mut stdout, &report)?
                }
                OutputFormat::Json => refcheck_missing_imports::print_json(&mut stdout, &report)?,
            }
            stdout.flush()?;

            if !quiet {
                let elapsed_ms = start.elapsed().as_millis();
                refcheck_missing_imports::print_summary(
                    &mut std::io::stderr(),
                    &report,
                    elapsed_ms,
                    num_threads,
                )?;
            }

            if !report.passed() {
                // Non-zero exit to fail CI
                std::process::exit(report.exit_code());
            }

            Ok(())
        }
    }
}
