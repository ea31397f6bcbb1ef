//! Regex-based specifier scan.
//!
//! This is a lexical pass, not a parse: specifier-shaped text inside comments
//! or string literals is reported too, and specifiers built at runtime
//! (template literals, concatenation, variables) are not seen at all.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{SpecKind, Specifier};

// `import x from '...'`, `import { a, type B } from '...'`, `import '...'`.
// Bindings may span lines; besides identifier chars and `{ } , *` they may
// hold `// ...` and `/* ... */` comments.
static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bimport\s+(?:(?:[\w$\s{},*]|//[^\n]*|/\*(?:[^*]|\*+[^*/])*\*+/)+?\s*from\s*)?['"]([^'"\n]+)['"]"#,
    )
    .unwrap()
});

static EXPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bexport\s+(?:type\s+)?(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s*from\s*['"]([^'"\n]+)['"]"#,
    )
    .unwrap()
});

// `require('...')` and `import('...')`; only the first argument matters.
static LOAD_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:require|import)\s*\(\s*['"]([^'"\n]+)['"]"#).unwrap()
});

/// Returns every specifier in `src`, in source-text order.
pub fn scan_imports(src: &str) -> Vec<Specifier> {
    let mut found: Vec<(usize, Specifier)> = Vec::new();

    let patterns: [(&Regex, SpecKind); 3] = [
        (&*IMPORT, SpecKind::Static),
        (&*EXPORT_FROM, SpecKind::Static),
        (&*LOAD_CALL, SpecKind::Dynamic),
    ];

    for (re, kind) in patterns {
        for caps in re.captures_iter(src) {
            if let Some(m) = caps.get(1) {
                found.push((m.start(), Specifier { request: m.as_str().to_string(), kind }));
            }
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, spec)| spec).collect()
}
