use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub request: String,
    pub kind: SpecKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    /// `import ... from '...'`, `import '...'`, `export ... from '...'`
    Static,
    /// `require('...')`, `import('...')`
    Dynamic,
}

/// Outcome of resolving one specifier from one origin file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The specifier maps to this existing file.
    Resolved(PathBuf),
    /// Relative or aliased specifier with no candidate file on disk.
    Missing,
    /// Bare specifier; never probed.
    Unverified,
}

/// A specifier prefix that stands in for one or more root-relative directories.
///
/// Targets are tried in order; relative targets are joined onto the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    pub prefix: String,
    pub targets: Vec<PathBuf>,
}

impl AliasRule {
    pub fn new(prefix: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self { prefix: prefix.into(), targets: vec![target.into()] }
    }

    /// `@/` matches `@/lib/api`; `@utils` matches `@utils` and `@utils/x` but not `@utilsx`.
    pub fn matches(&self, request: &str) -> bool {
        request.strip_prefix(self.prefix.as_str()).is_some_and(|rest| {
            rest.is_empty() || self.prefix.ends_with('/') || rest.starts_with('/')
        })
    }

    /// The part of `request` after the prefix, without a leading slash.
    pub fn remainder<'r>(&self, request: &'r str) -> &'r str {
        request.strip_prefix(self.prefix.as_str()).unwrap_or(request).trim_start_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_matches_slash_prefix() {
        let rule = AliasRule::new("@/", ".");
        assert!(rule.matches("@/lib/api"));
        assert!(!rule.matches("@scope/pkg"));
        assert!(!rule.matches("@"));
        assert_eq!(rule.remainder("@/lib/api"), "lib/api");
    }

    #[test]
    fn test_alias_matches_on_segment_boundary() {
        let rule = AliasRule::new("@utils", "src/utils");
        assert!(rule.matches("@utils"));
        assert!(rule.matches("@utils/date"));
        assert!(!rule.matches("@utilsx/date"));
        assert_eq!(rule.remainder("@utils/date"), "date");
        assert_eq!(rule.remainder("@utils"), "");
    }
}
