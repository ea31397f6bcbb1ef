use log::{debug, trace, warn};
use std::{fs, path::Path};

use crate::constants::DEFAULT_ALIAS;
use crate::types::AliasRule;

/// The alias set used when nothing is configured: `@/` maps to the project root.
pub fn default_aliases() -> Vec<AliasRule> {
    vec![AliasRule::new(DEFAULT_ALIAS.0, DEFAULT_ALIAS.1)]
}

/// Parses a `PREFIX=DIR` alias argument. Returns `None` for malformed input.
pub fn parse_alias(arg: &str) -> Option<AliasRule> {
    let (prefix, target) = arg.split_once('=')?;
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return None;
    }
    let target = target.trim();
    Some(AliasRule::new(prefix, if target.is_empty() { "." } else { target }))
}

/// Adds `rule` to `rules`, appending its targets when the prefix already exists.
pub fn merge_alias(rules: &mut Vec<AliasRule>, rule: AliasRule) {
    if let Some(existing) = rules.iter_mut().find(|r| r.prefix == rule.prefix) {
        for target in rule.targets {
            if !existing.targets.contains(&target) {
                existing.targets.push(target);
            }
        }
    } else {
        rules.push(rule);
    }
}

/// Builds alias rules from `--alias` style arguments, falling back to the default set.
pub fn aliases_from_args(args: &[String]) -> Vec<AliasRule> {
    let mut rules = Vec::new();
    for arg in args {
        match parse_alias(arg) {
            Some(rule) => merge_alias(&mut rules, rule),
            None => warn!("Ignoring malformed alias '{}' (expected PREFIX=DIR)", arg),
        }
    }
    if rules.is_empty() { default_aliases() } else { rules }
}

/// Reads `compilerOptions.paths` from `<root>/tsconfig.json`.
///
/// `"@/*": ["./*"]` becomes prefix `@/` with target `<baseUrl>/.`; patterns
/// without a wildcard become segment-bounded prefixes. A missing or
/// unparsable tsconfig yields no aliases.
pub fn read_tsconfig_aliases(root: &Path) -> Vec<AliasRule> {
    let tsconfig_path = root.join("tsconfig.json");
    debug!("Reading tsconfig paths from: {:?}", tsconfig_path);
    let mut rules = Vec::new();

    let Ok(content) = fs::read_to_string(&tsconfig_path) else {
        debug!("No readable tsconfig at {:?}", tsconfig_path);
        return rules;
    };

    let json = match serde_json::from_str::<serde_json::Value>(&strip_line_comments(&content)) {
        Ok(json) => json,
        Err(e) => {
            warn!("Could not parse {:?}: {}", tsconfig_path, e);
            return rules;
        }
    };

    if let Some(compiler_options) = json.get("compilerOptions")
        && let Some(paths_obj) = compiler_options.get("paths").and_then(|p| p.as_object())
    {
        let base_url = compiler_options.get("baseUrl").and_then(|b| b.as_str()).unwrap_or(".");

        for (alias, targets) in paths_obj {
            let Some(target_arr) = targets.as_array() else {
                continue;
            };
            let wildcard = alias.ends_with("/*");
            let prefix = if wildcard { alias.trim_end_matches('*') } else { alias.as_str() };

            for target in target_arr.iter().filter_map(|t| t.as_str()) {
                let target = if wildcard { target.trim_end_matches('*') } else { target };
                let rel = Path::new(base_url).join(target);
                trace!("Found tsconfig path alias: '{}' -> {:?}", prefix, rel);
                merge_alias(&mut rules, AliasRule::new(prefix, rel));
            }
        }
    }

    debug!("Loaded {} tsconfig path aliases", rules.len());
    rules
}

/// Removes `//` comments that are not inside a string literal.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut in_string = false;
            let mut escaped = false;
            let bytes = line.as_bytes();
            for i in 0..bytes.len() {
                match bytes[i] {
                    _ if escaped => escaped = false,
                    b'\\' if in_string => escaped = true,
                    b'"' => in_string = !in_string,
                    b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
                    _ => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
