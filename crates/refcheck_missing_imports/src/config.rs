use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use refcheck_core::{
    AliasRule, DEFAULT_SOURCE_DIRS, ExtractMode, aliases_from_args, merge_alias,
    read_tsconfig_aliases,
};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `MISSING_IMPORT ...` / `UNVERIFIED_BARE ...` lines
    Text,
    /// The full report as JSON
    Json,
}

fn default_source_dirs() -> Vec<String> {
    DEFAULT_SOURCE_DIRS.iter().map(|d| d.to_string()).collect()
}

#[derive(Debug, Clone, Parser)]
#[command(name = "missing-imports")]
#[command(about = "Check that every relative and aliased import resolves to a file")]
pub struct Config {
    /// Root directory of the project (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Top-level source directory to scan, relative to the root
    #[arg(long = "source-dir", value_name = "DIR", default_values_t = default_source_dirs())]
    pub source_dirs: Vec<String>,

    /// Alias rule such as `@/=.`; repeat for more (defaults to `@/=.`)
    #[arg(long = "alias", value_name = "PREFIX=DIR")]
    pub aliases: Vec<String>,

    /// Also load aliases from `compilerOptions.paths` in <root>/tsconfig.json
    #[arg(long)]
    pub tsconfig: bool,

    /// Extra directory name to skip, in addition to node_modules, .next and .git
    #[arg(long = "exclude-dir", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,

    /// Specifier extraction back end: `lexical` or `ast`
    #[arg(long, default_value = "lexical")]
    pub parser: ExtractMode,

    /// Output format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Do not print the summary line on stderr
    #[arg(long, short)]
    pub quiet: bool,

    #[clap(skip)]
    pub alias_rules: Vec<AliasRule>,
}

impl Config {
    /// Initialize the config by resolving the root directory and building alias rules
    pub fn initialize(&mut self) -> Result<()> {
        let root = match self.root.take() {
            Some(r) => {
                debug!("Using provided root directory: {:?}", r);
                r.canonicalize().unwrap_or(r)
            }
            None => {
                debug!("No root provided, using current directory");
                env::current_dir().context("Failed to read current directory")?
            }
        };
        info!("Using root directory: {}", root.display());

        self.alias_rules = aliases_from_args(&self.aliases);
        if self.tsconfig {
            debug!("Reading tsconfig paths");
            for rule in read_tsconfig_aliases(&root) {
                merge_alias(&mut self.alias_rules, rule);
            }
        }
        debug!("Using {} alias rules: {:?}", self.alias_rules.len(), self.alias_rules);

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    /// Absolute paths of the configured source directories (existing or not)
    pub fn source_roots(&self) -> Result<Vec<PathBuf>> {
        let root = self.root()?;
        Ok(self.source_dirs.iter().map(|d| root.join(d)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cfg = Config::parse_from(["missing-imports"]);
        assert_eq!(cfg.source_dirs, vec!["app", "components", "lib"]);
        assert!(cfg.aliases.is_empty());
        assert_eq!(cfg.parser, ExtractMode::Lexical);
        assert_eq!(cfg.format, OutputFormat::Text);
        assert!(!cfg.tsconfig);
        assert!(!cfg.quiet);
    }

    #[test]
    fn test_repeated_flags() {
        let cfg = Config::parse_from([
            "missing-imports",
            "--source-dir",
            "src",
            "--source-dir",
            "pages",
            "--alias",
            "~/=src",
            "--exclude-dir",
            "dist",
            "--parser",
            "ast",
            "--format",
            "json",
        ]);
        assert_eq!(cfg.source_dirs, vec!["src", "pages"]);
        assert_eq!(cfg.aliases, vec!["~/=src"]);
        assert_eq!(cfg.exclude_dirs, vec!["dist"]);
        assert_eq!(cfg.parser, ExtractMode::Ast);
        assert_eq!(cfg.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_parser_is_rejected() {
        assert!(Config::try_parse_from(["missing-imports", "--parser", "swc"]).is_err());
    }

    #[test]
    fn test_root_requires_initialize() {
        let cfg = Config::parse_from(["missing-imports"]);
        assert!(cfg.root().is_err());
    }

    #[test]
    fn test_initialize_builds_aliases() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("tsconfig.json"),
            r#"{ "compilerOptions": { "paths": { "~/*": ["./src/*"] } } }"#,
        )
        .unwrap();

        let mut cfg = Config::parse_from([
            "missing-imports",
            "--root",
            root.to_str().unwrap(),
            "--tsconfig",
        ]);
        cfg.initialize().unwrap();

        assert_eq!(cfg.root().unwrap(), &root.canonicalize().unwrap());
        let prefixes: Vec<&str> = cfg.alias_rules.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["@/", "~/"]);
        let canonical = cfg.root().unwrap().clone();
        assert_eq!(
            cfg.source_roots().unwrap(),
            vec![canonical.join("app"), canonical.join("components"), canonical.join("lib")]
        );
    }
}
