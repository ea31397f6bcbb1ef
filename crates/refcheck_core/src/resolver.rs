use dashmap::DashMap;
use log::trace;
use path_clean::clean;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::constants::{CANDIDATE_EXTENSIONS, INDEX_STEM};
use crate::types::{AliasRule, Resolution};

/// Maps `(origin file, specifier)` pairs to a [`Resolution`].
///
/// Classification is purely syntactic: aliased first, then relative, and
/// everything else is bare and never touches the file system. Candidate
/// searches are memoized per base path, so one resolver may be shared across
/// worker threads for a whole run.
pub struct Resolver {
    root: PathBuf,
    aliases: Vec<AliasRule>,
    extensions: Vec<String>,
    cache: DashMap<PathBuf, Option<PathBuf>>,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>, mut aliases: Vec<AliasRule>) -> Self {
        // Longest prefix wins when several aliases match
        aliases.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self {
            root: root.into(),
            aliases,
            extensions: CANDIDATE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            cache: DashMap::new(),
        }
    }

    #[cfg(test)]
    fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn resolve(&self, from_file: &Path, request: &str) -> Resolution {
        trace!("Resolving: '{}' from {}", request, from_file.display());

        let Some(bases) = self.base_paths(from_file, request) else {
            trace!("Bare specifier left unverified: '{}'", request);
            return Resolution::Unverified;
        };

        for base in &bases {
            if let Some(found) = self.find_candidate(base) {
                trace!("Resolved '{}' to {}", request, found.display());
                return Resolution::Resolved(found);
            }
        }

        trace!("No candidate file for '{}' from {}", request, from_file.display());
        Resolution::Missing
    }

    /// Extension-less base paths for an aliased or relative specifier, `None` if bare.
    pub fn base_paths(&self, from_file: &Path, request: &str) -> Option<Vec<PathBuf>> {
        if let Some(rule) = self.aliases.iter().find(|rule| rule.matches(request)) {
            trace!("Matched alias '{}' for request '{}'", rule.prefix, request);
            let remainder = rule.remainder(request);
            let bases = rule
                .targets
                .iter()
                .map(|target| {
                    let dir = self.root.join(target);
                    if remainder.is_empty() { clean(dir) } else { clean(dir.join(remainder)) }
                })
                .collect();
            return Some(bases);
        }

        if is_relative(request) {
            let dir = from_file.parent().unwrap_or(&self.root);
            return Some(vec![clean(dir.join(request))]);
        }

        None
    }

    fn find_candidate(&self, base: &Path) -> Option<PathBuf> {
        if let Some(hit) = self.cache.get(base) {
            trace!("Cache hit for candidate search: {}", base.display());
            return hit.clone();
        }
        let found = probe_candidates(base, &self.extensions);
        self.cache.insert(base.to_path_buf(), found.clone());
        found
    }
}

/// `./x`, `../x`, `.` and `..` are resolved against the origin file's directory.
pub fn is_relative(request: &str) -> bool {
    request.starts_with("./") || request.starts_with("../") || request == "." || request == ".."
}

/// Ordered candidate search for an extension-less `base`.
///
/// Direct files (`base + ext`) are tried for every suffix before any
/// directory index (`base/index + ext`) is considered.
pub fn probe_candidates(base: &Path, extensions: &[String]) -> Option<PathBuf> {
    for ext in extensions {
        let candidate = with_suffix(base, ext);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    if base.is_dir() {
        for ext in extensions {
            let candidate = base.join(format!("{}{}", INDEX_STEM, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    None
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
