use refcheck_core::Resolution;
use serde::Serialize;

/// A relative or aliased specifier with no file behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingImport {
    /// Origin file, relative to the project root
    pub file: String,
    pub specifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnverifiedSpecifier {
    pub specifier: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub files_scanned: usize,
    /// Files that were discovered but could not be read; excluded from every count
    pub unreadable_files: usize,
    pub missing_total: usize,
    pub missing: Vec<MissingImport>,
    /// Number of distinct bare specifier texts
    pub unverified_total: usize,
    /// Most frequent bare specifiers, descending by count
    pub unverified: Vec<UnverifiedSpecifier>,
}

/// Everything observed for one discovered file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Path relative to the project root
    pub file: String,
    pub status: FileStatus,
}

#[derive(Debug, Clone)]
pub enum FileStatus {
    Unreadable,
    /// `(specifier, outcome)` in source order
    Scanned(Vec<(String, Resolution)>),
}
