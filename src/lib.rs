//! spaceui: distribute Space Invoices UI components into React projects.
//!
//! The pipeline behind `spaceui add`:
//!
//! 1. [`registry::source`] fetches the registry manifest (remote or `--local`).
//! 2. [`registry::resolver`] expands the requested component keys into a
//!    deduplicated, dependency-ordered installation plan across components,
//!    providers, and utils.
//! 3. [`registry::transform`] rewrites registry-internal import paths to the
//!    project's configured aliases and computes on-disk destinations.
//! 4. [`install`] writes the files and hands package names to the project's
//!    package manager.
//!
//! The resolver and transformer are pure functions; all I/O lives at the
//! edges, which is what makes the core testable against a tempdir registry.

pub mod cli;
pub mod config;
pub mod install;
pub mod prompts;
pub mod registry;
