//! Import-path rewriting and destination mapping.
//!
//! Registry sources are authored against a fixed internal layout (`@/ui/...`)
//! so the component library stays self-consistent in isolation. This module is
//! the single seam that re-homes that layout into whatever directory structure
//! the consuming project configured: a text-level rewrite of the five known
//! import prefixes, and a mapping from registry-relative paths to on-disk
//! destinations.

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Alias categories a registry file can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasCategory {
    Components,
    Ui,
    Lib,
    Hooks,
    Providers,
}

impl AliasCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AliasCategory::Components => "components",
            AliasCategory::Ui => "ui",
            AliasCategory::Lib => "lib",
            AliasCategory::Hooks => "hooks",
            AliasCategory::Providers => "providers",
        }
    }
}

/// Import prefixes recognized in registry source text, most specific first.
/// `@/ui/components/ui/` extends `@/ui/components/`, so it must be rewritten
/// first or the shorter prefix shadows it.
const IMPORT_REWRITES: [(&str, AliasCategory); 5] = [
    ("@/ui/components/ui/", AliasCategory::Ui),
    ("@/ui/components/", AliasCategory::Components),
    ("@/ui/providers/", AliasCategory::Providers),
    ("@/ui/lib/", AliasCategory::Lib),
    ("@/ui/hooks/", AliasCategory::Hooks),
];

/// Directory prefixes recognized in registry-relative file paths, most
/// specific first (`components/ui/` before `components/`).
const PATH_PREFIXES: [(&str, AliasCategory); 5] = [
    ("components/ui/", AliasCategory::Ui),
    ("components/", AliasCategory::Components),
    ("providers/", AliasCategory::Providers),
    ("lib/", AliasCategory::Lib),
    ("hooks/", AliasCategory::Hooks),
];

/// Rewrite every occurrence of the registry-internal import prefixes into the
/// project's configured aliases. A pure text substitution over the whole
/// source; anything outside the five known prefixes is left untouched.
pub fn transform_imports(source: &str, config: &Config) -> String {
    let mut text = source.to_string();
    for (prefix, category) in IMPORT_REWRITES {
        let alias = config.aliases.alias_for(category);
        text = text.replace(prefix, &format!("{alias}/"));
    }
    text
}

/// Destination of a registry file inside the consuming project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Which alias governs this file.
    pub category: AliasCategory,
    /// Path relative to that alias directory.
    pub dest_path: String,
}

/// Map a registry-relative path to its alias category and in-alias path.
/// Unrecognized prefixes fall back to the components alias with the path
/// unmodified.
pub fn destination_for(registry_path: &str) -> Destination {
    for (prefix, category) in PATH_PREFIXES {
        if let Some(rest) = registry_path.strip_prefix(prefix) {
            return Destination {
                category,
                dest_path: rest.to_string(),
            };
        }
    }
    Destination {
        category: AliasCategory::Components,
        dest_path: registry_path.to_string(),
    }
}

/// Absolute on-disk destination for a registry file. A leading `@/` on the
/// configured alias means "relative to the project's source root", so the
/// result is `<project_root>/src/<alias>/<dest_path>`.
pub fn full_destination_path(registry_path: &str, config: &Config, project_root: &Path) -> PathBuf {
    let destination = destination_for(registry_path);
    let alias = config.aliases.alias_for(destination.category);
    let alias_dir = alias.strip_prefix("@/").unwrap_or(alias);
    project_root
        .join("src")
        .join(alias_dir)
        .join(destination.dest_path)
}
