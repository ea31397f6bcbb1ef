use ignore::WalkBuilder;
use log::{debug, trace, warn};
use std::path::PathBuf;

use crate::constants::{EXCLUDED_DIRS, SOURCE_EXTENSIONS};

pub struct CollectorConfig {
    pub roots: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
}

impl CollectorConfig {
    /// Walk `roots` with the default source extensions and pruned directories.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            extensions: SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Collects every scannable source file under the configured roots.
///
/// Roots that do not exist are skipped. Directories whose name is in
/// `excluded_dirs` are pruned at any depth. The result is sorted and
/// deduplicated so that a run is reproducible across file systems.
pub fn collect_sources(cfg: &CollectorConfig) -> Vec<PathBuf> {
    debug!("Collecting source files from {} roots", cfg.roots.len());
    let mut files: Vec<PathBuf> = Vec::new();

    for root in &cfg.roots {
        if !root.is_dir() {
            debug!("Skipping missing source root: {}", root.display());
            continue;
        }
        debug!("Walking directory tree from root: {}", root.display());

        let excluded = cfg.excluded_dirs.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |dent| {
                let is_dir = dent.file_type().is_some_and(|ft| ft.is_dir());
                let pruned = is_dir
                    && dent.depth() > 0
                    && dent.file_name().to_str().is_some_and(|n| excluded.iter().any(|e| e == n));
                if pruned {
                    trace!("Pruning excluded directory: {}", dent.path().display());
                }
                !pruned
            })
            .build();

        for res in walker {
            let dent = match res {
                Ok(dent) => dent,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            let p = dent.path();
            if !p.is_file() {
                continue;
            }

            if let Some(ext) = p.extension().and_then(|e| e.to_str())
                && cfg.extensions.iter().any(|e| e == ext)
            {
                trace!("Found source file: {}", p.display());
                files.push(p.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    debug!("Collected {} source files", files.len());
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_collects_only_source_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "app/page.tsx", "");
        create_test_file(root, "app/util.ts", "");
        create_test_file(root, "app/legacy.js", "");
        create_test_file(root, "app/widget.jsx", "");
        create_test_file(root, "app/styles.css", "");
        create_test_file(root, "app/data.json", "{}");

        let files = collect_sources(&CollectorConfig::new(vec![root.join("app")]));
        assert_eq!(
            names(root, &files),
            vec!["app/legacy.js", "app/page.tsx", "app/util.ts", "app/widget.jsx"]
        );
    }

    #[test]
    fn test_prunes_excluded_dirs_at_any_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "app/page.ts", "");
        create_test_file(root, "app/node_modules/pkg/index.js", "");
        create_test_file(root, "app/deep/nested/.next/server/chunk.js", "");
        create_test_file(root, "app/deep/nested/.git/hooks/hook.js", "");
        create_test_file(root, "app/deep/nested/keep.ts", "");

        let files = collect_sources(&CollectorConfig::new(vec![root.join("app")]));
        assert_eq!(names(root, &files), vec!["app/deep/nested/keep.ts", "app/page.ts"]);
    }

    #[test]
    fn test_excluded_name_only_prunes_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "lib/node_modules.ts", "");

        let files = collect_sources(&CollectorConfig::new(vec![root.join("lib")]));
        assert_eq!(names(root, &files), vec!["lib/node_modules.ts"]);
    }

    #[test]
    fn test_custom_excluded_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "app/page.ts", "");
        create_test_file(root, "app/dist/bundle.js", "");

        let mut cfg = CollectorConfig::new(vec![root.join("app")]);
        cfg.excluded_dirs.push("dist".to_string());
        let files = collect_sources(&cfg);
        assert_eq!(names(root, &files), vec!["app/page.ts"]);
    }

    #[test]
    fn test_missing_roots_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "lib/api.ts", "");

        let cfg = CollectorConfig::new(vec![
            root.join("app"),
            root.join("components"),
            root.join("lib"),
        ]);
        let files = collect_sources(&cfg);
        assert_eq!(names(root, &files), vec!["lib/api.ts"]);
    }

    #[test]
    fn test_empty_root_list() {
        let files = collect_sources(&CollectorConfig::new(vec![]));
        assert!(files.is_empty());
    }

    #[test]
    fn test_output_is_sorted_and_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "lib/b.ts", "");
        create_test_file(root, "lib/a.ts", "");
        create_test_file(root, "lib/sub/c.ts", "");

        // The same root twice must not duplicate files
        let cfg = CollectorConfig::new(vec![root.join("lib"), root.join("lib")]);
        let files = collect_sources(&cfg);
        assert_eq!(names(root, &files), vec!["lib/a.ts", "lib/b.ts", "lib/sub/c.ts"]);
    }
}
