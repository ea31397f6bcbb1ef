//! Core utilities for refcheck tools.
//!
//! This crate provides the building blocks for auditing module references in
//! JavaScript/TypeScript source trees:
//! - Walking source roots while pruning cache/build/VCS directories
//! - Extracting import/require specifiers, lexically or with a full parse
//! - Resolving specifiers through alias and relative-path rules with an
//!   ordered extension/index candidate search
//! - Alias configuration (CLI-style `PREFIX=DIR`, tsconfig `paths`)

mod collector;
mod config;
mod constants;
mod lexical;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use collector::{CollectorConfig, collect_sources};
pub use config::{
    aliases_from_args, default_aliases, merge_alias, parse_alias, read_tsconfig_aliases,
};
pub use constants::{
    CANDIDATE_EXTENSIONS, DEFAULT_ALIAS, DEFAULT_SOURCE_DIRS, EXCLUDED_DIRS, INDEX_STEM,
    SOURCE_EXTENSIONS,
};
pub use lexical::scan_imports;
pub use parser::{ExtractMode, imports_for, parse_imports};
pub use resolver::{Resolver, is_relative, probe_candidates};
pub use types::{AliasRule, Resolution, SpecKind, Specifier};
