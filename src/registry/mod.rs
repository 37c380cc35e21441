//! Component registry: data model, access, resolution, and import rewriting.
//!
//! The registry is a JSON manifest plus a tree of distributable source files,
//! served over HTTP(S) or read from a local checkout:
//!
//! ```text
//! registry-root/
//! ├── registry.json   <- categories, utils, providers, components
//! └── src/
//!     ├── components/     <- component sources (components/ui/ for primitives)
//!     ├── providers/      <- shared context providers
//!     ├── lib/            <- utility modules
//!     └── hooks/          <- shared hooks
//! ```
//!
//! `add` expands the requested component keys into a full installation plan
//! ([`resolver`]), fetches each planned file ([`source`]), and rewrites its
//! registry-internal imports for the consuming project ([`transform`]).

pub mod manifest;
pub mod resolver;
pub mod source;
pub mod transform;

pub use manifest::{ComponentEntry, DependencyRef, EntityKind, Manifest, ProviderEntry, UtilEntry};
pub use resolver::{ResolveError, ResolvedDependencies, ResolvedItem, resolve_dependencies};
pub use source::{DEFAULT_REGISTRY_URL, RegistryClient, RegistryError};
pub use transform::{
    AliasCategory, Destination, destination_for, full_destination_path, transform_imports,
};
