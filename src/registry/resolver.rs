//! Dependency resolution: expand requested component keys into an ordered
//! installation plan.
//!
//! The dependency relation spans three entity kinds (components, providers,
//! utils) with cross-kind edges and shared diamonds. The resolver walks it
//! depth-first, emitting every reachable entity exactly once in dependency
//! order: by the time an entity lands in `items`, everything it needs is
//! already there, so a caller materializing files in list order never writes
//! a dependent before its dependency.
//!
//! Resolution is a pure function of the manifest and the requested keys; all
//! shared mutable state (visited set, accumulators) lives in an explicit
//! [`Resolver`] context that exists only for the duration of one call.

use std::collections::HashSet;

use crate::registry::manifest::{
    EntityKind, Manifest, PROVIDER_PREFIX, UTIL_PREFIX, strip_prefix,
};

/// Error raised while walking the dependency graph.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("{kind} \"{key}\" not found in registry")]
    NotFound { kind: EntityKind, key: String },

    #[error("Circular dependency: {}", chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },
}

/// One entity in the installation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    pub kind: EntityKind,
    pub key: String,
    pub name: String,
    pub files: Vec<String>,
    pub npm_dependencies: Vec<String>,
}

/// Complete installation plan for one resolution call.
#[derive(Debug, Clone, Default)]
pub struct ResolvedDependencies {
    /// Every reachable entity, exactly once, in topological order.
    pub items: Vec<ResolvedItem>,
    /// Union of every item's files, first-occurrence order.
    pub all_files: Vec<String>,
    /// Union of every item's npm packages, first-occurrence order.
    pub all_npm_dependencies: Vec<String>,
}

/// Expand `requested` component keys into the full set of components,
/// providers, and utils to materialize, plus the npm packages they require.
///
/// Fails on the first key (requested or reachable) that is absent from its
/// manifest mapping, and on dependency cycles.
pub fn resolve_dependencies(
    manifest: &Manifest,
    requested: &[String],
) -> Result<ResolvedDependencies, ResolveError> {
    let mut resolver = Resolver::new(manifest);
    for key in requested {
        resolver.resolve_component(key)?;
    }
    Ok(resolver.finish())
}

/// Walk state for a single resolution call.
struct Resolver<'a> {
    manifest: &'a Manifest,
    /// Entities fully resolved and appended to `output.items`.
    done: HashSet<(EntityKind, String)>,
    /// Entities currently on the recursion stack; re-entering one is a cycle.
    in_progress: Vec<(EntityKind, String)>,
    output: ResolvedDependencies,
    seen_files: HashSet<String>,
    seen_packages: HashSet<String>,
}

/// Outcome of the visited-guard check for one entity.
enum Visit {
    /// Not seen before; caller must recurse and then call `leave`.
    Enter,
    /// Already emitted (diamond); skip silently.
    Done,
}

impl<'a> Resolver<'a> {
    fn new(manifest: &'a Manifest) -> Self {
        Self {
            manifest,
            done: HashSet::new(),
            in_progress: Vec::new(),
            output: ResolvedDependencies::default(),
            seen_files: HashSet::new(),
            seen_packages: HashSet::new(),
        }
    }

    fn enter(&mut self, kind: EntityKind, key: &str) -> Result<Visit, ResolveError> {
        let node = (kind, key.to_string());
        if self.done.contains(&node) {
            return Ok(Visit::Done);
        }
        if let Some(start) = self.in_progress.iter().position(|n| *n == node) {
            let mut chain: Vec<String> = self.in_progress[start..]
                .iter()
                .map(|(k, name)| format!("{k} \"{name}\""))
                .collect();
            chain.push(format!("{kind} \"{key}\""));
            return Err(ResolveError::CircularDependency { chain });
        }
        self.in_progress.push(node);
        Ok(Visit::Enter)
    }

    fn leave(&mut self, item: ResolvedItem) {
        let node = self
            .in_progress
            .pop()
            .unwrap_or_else(|| (item.kind, item.key.clone()));
        self.done.insert(node);

        for file in &item.files {
            if self.seen_files.insert(file.clone()) {
                self.output.all_files.push(file.clone());
            }
        }
        for package in &item.npm_dependencies {
            if self.seen_packages.insert(package.clone()) {
                self.output.all_npm_dependencies.push(package.clone());
            }
        }
        self.output.items.push(item);
    }

    fn resolve_component(&mut self, key: &str) -> Result<(), ResolveError> {
        let entry = self
            .manifest
            .component(key)
            .ok_or_else(|| ResolveError::NotFound {
                kind: EntityKind::Component,
                key: key.to_string(),
            })?;

        match self.enter(EntityKind::Component, key)? {
            Visit::Done => return Ok(()),
            Visit::Enter => {}
        }

        // Fixed order: sibling components, then providers, then utils.
        for dep in &entry.dependencies {
            self.resolve_component(dep)?;
        }
        for provider in &entry.providers {
            self.resolve_provider(provider)?;
        }
        for util in &entry.utils {
            self.resolve_util(util)?;
        }

        self.leave(ResolvedItem {
            kind: EntityKind::Component,
            key: key.to_string(),
            name: entry.name.clone(),
            files: entry.files.clone(),
            npm_dependencies: entry.npm_dependencies.clone(),
        });
        Ok(())
    }

    fn resolve_provider(&mut self, key: &str) -> Result<(), ResolveError> {
        let key = strip_prefix(key, PROVIDER_PREFIX);
        let entry = self
            .manifest
            .provider(key)
            .ok_or_else(|| ResolveError::NotFound {
                kind: EntityKind::Provider,
                key: key.to_string(),
            })?;

        match self.enter(EntityKind::Provider, key)? {
            Visit::Done => return Ok(()),
            Visit::Enter => {}
        }

        // Providers depend only on providers.
        for dep in &entry.dependencies {
            self.resolve_provider(dep)?;
        }

        self.leave(ResolvedItem {
            kind: EntityKind::Provider,
            key: key.to_string(),
            name: entry.name.clone(),
            files: entry.files.clone(),
            npm_dependencies: entry.npm_dependencies.clone(),
        });
        Ok(())
    }

    fn resolve_util(&mut self, key: &str) -> Result<(), ResolveError> {
        let key = strip_prefix(key, UTIL_PREFIX);
        let entry = self
            .manifest
            .util(key)
            .ok_or_else(|| ResolveError::NotFound {
                kind: EntityKind::Util,
                key: key.to_string(),
            })?;

        match self.enter(EntityKind::Util, key)? {
            Visit::Done => return Ok(()),
            Visit::Enter => {}
        }

        // Normalized at manifest load: each ref already knows its kind.
        for dep in &entry.resolved_dependencies {
            match dep.kind {
                EntityKind::Provider => self.resolve_provider(&dep.key)?,
                _ => self.resolve_util(&dep.key)?,
            }
        }

        self.leave(ResolvedItem {
            kind: EntityKind::Util,
            key: key.to_string(),
            name: entry.name.clone(),
            files: entry.files.clone(),
            npm_dependencies: entry.npm_dependencies.clone(),
        });
        Ok(())
    }

    fn finish(self) -> ResolvedDependencies {
        self.output
    }
}
