//! Constants for file extensions, pruned directories and resolution order.
//!
//! ## Scanned Extensions
//!
//! - **TypeScript**: `.ts`, `.tsx`
//! - **JavaScript**: `.js`, `.jsx`
//!
//! ## Candidate Order
//!
//! When a relative or aliased specifier is resolved, suffixes are probed in
//! [`CANDIDATE_EXTENSIONS`] order: the bare path first, then the source
//! dialects, then style sheets, then JSON. The first regular file wins, so
//! reordering this list changes which file a specifier refers to.

/// File extensions of source files that are scanned for module references
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "js",  // JavaScript
    "jsx", // JavaScript with JSX
];

/// Suffixes appended to a resolved base path (in priority order)
pub const CANDIDATE_EXTENSIONS: &[&str] =
    &["", ".ts", ".tsx", ".js", ".jsx", ".css", ".scss", ".sass", ".json"];

/// File stem probed inside a directory when no direct file matches
pub const INDEX_STEM: &str = "index";

/// Directory names that are never descended into, at any depth
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".next", ".git"];

/// Top-level directories scanned when none are configured
pub const DEFAULT_SOURCE_DIRS: &[&str] = &["app", "components", "lib"];

/// Alias applied when none are configured: `@/` maps to the project root
pub const DEFAULT_ALIAS: (&str, &str) = ("@/", ".");
