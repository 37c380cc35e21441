//! Typed registry document and dependency-reference normalization.
//!
//! The registry serves a single `registry.json` describing everything it can
//! distribute: components (grouped into categories), shared providers, and
//! utility modules. Entries reference each other by key; cross-kind references
//! in the raw document are stringly-typed (`"providers/sdk-provider"` or a bare
//! name that happens to be a provider). [`Manifest::normalize`] resolves every
//! such reference into a tagged [`DependencyRef`] exactly once, so the resolver
//! never has to re-derive kinds from string prefixes.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Key prefix marking a provider reference inside a dependency list.
pub const PROVIDER_PREFIX: &str = "providers/";

/// Key prefix marking a util reference inside a dependency list.
pub const UTIL_PREFIX: &str = "utils/";

/// The kind of a registry entity. Used in resolver visited-keys and error
/// messages, so the `Display` strings are user-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Component,
    Provider,
    Util,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Component => write!(f, "Component"),
            EntityKind::Provider => write!(f, "Provider"),
            EntityKind::Util => write!(f, "Utility"),
        }
    }
}

/// A dependency reference with its kind resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    pub kind: EntityKind,
    pub key: String,
}

impl DependencyRef {
    pub fn provider(key: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Provider,
            key: key.into(),
        }
    }

    pub fn util(key: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Util,
            key: key.into(),
        }
    }
}

/// Root registry document, fetched from `{base}/registry.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "baseUrl")]
    pub base_url: String,
    #[serde(default)]
    pub categories: HashMap<String, CategoryEntry>,
    #[serde(default)]
    pub utils: HashMap<String, UtilEntry>,
    #[serde(default)]
    pub providers: HashMap<String, ProviderEntry>,
    #[serde(default)]
    pub components: HashMap<String, ComponentEntry>,
}

/// Descriptive grouping for listings; carries no dependency edges.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentEntry {
    /// Display name, e.g. "Create Invoice Form".
    pub name: String,
    /// Category key for grouping in listings.
    #[serde(default)]
    pub category: String,
    /// Relative source paths rooted at the registry's `src/` tree.
    #[serde(default)]
    pub files: Vec<String>,
    /// Other component keys this component needs.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Provider keys (an optional `providers/` prefix is tolerated).
    #[serde(default)]
    pub providers: Vec<String>,
    /// Util keys (an optional `utils/` prefix is tolerated).
    #[serde(default)]
    pub utils: Vec<String>,
    /// Validation schema names; carried in the document but unused here.
    #[serde(default)]
    pub schemas: Vec<String>,
    #[serde(default, rename = "npmDependencies")]
    pub npm_dependencies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    #[serde(default)]
    pub files: Vec<String>,
    /// Providers depend only on other providers.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, rename = "npmDependencies")]
    pub npm_dependencies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UtilEntry {
    pub name: String,
    #[serde(default)]
    pub files: Vec<String>,
    /// May reference another util or a provider; disambiguated at
    /// normalization time into `resolved_dependencies`.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, rename = "npmDependencies")]
    pub npm_dependencies: Vec<String>,
    /// Tagged form of `dependencies`, filled in by [`Manifest::normalize`].
    #[serde(skip)]
    pub resolved_dependencies: Vec<DependencyRef>,
}

/// Strip an optional kind prefix from a dependency key.
pub fn strip_prefix<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}

impl Manifest {
    /// Parse a manifest from JSON and normalize all cross-kind references.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut manifest: Manifest = serde_json::from_str(text)?;
        manifest.normalize();
        Ok(manifest)
    }

    /// Resolve every util dependency string into a tagged [`DependencyRef`].
    ///
    /// A reference is a provider when it carries the `providers/` prefix or
    /// when the bare name exists in the provider map; otherwise it is treated
    /// as a util. Names that exist in neither map still normalize (to `Util`)
    /// so the resolver reports them as a missing utility instead of this pass
    /// having to fail.
    pub fn normalize(&mut self) {
        let provider_keys: Vec<String> = self.providers.keys().cloned().collect();
        for util in self.utils.values_mut() {
            util.resolved_dependencies = util
                .dependencies
                .iter()
                .map(|dep| {
                    if let Some(bare) = dep.strip_prefix(PROVIDER_PREFIX) {
                        DependencyRef::provider(bare)
                    } else if provider_keys.iter().any(|k| k == dep) {
                        DependencyRef::provider(dep.clone())
                    } else {
                        DependencyRef::util(strip_prefix(dep, UTIL_PREFIX))
                    }
                })
                .collect();
        }
    }

    pub fn component(&self, key: &str) -> Option<&ComponentEntry> {
        self.components.get(key)
    }

    pub fn provider(&self, key: &str) -> Option<&ProviderEntry> {
        self.providers.get(strip_prefix(key, PROVIDER_PREFIX))
    }

    pub fn util(&self, key: &str) -> Option<&UtilEntry> {
        self.utils.get(strip_prefix(key, UTIL_PREFIX))
    }

    /// Component keys sorted for stable listings.
    pub fn component_keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.components.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
