//! JavaScript package-manager detection and invocation.
//!
//! The consuming project's package manager is inferred from its lockfile;
//! installs run as a child process with inherited stdio so the user sees the
//! manager's own progress output.

use std::path::Path;

use tokio::process::Command;

use crate::install::InstallError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.command())
    }
}

impl PackageManager {
    /// Infer the package manager from the project's lockfile. Defaults to npm
    /// when no lockfile is present.
    pub fn detect(project_root: &Path) -> Self {
        if project_root.join("pnpm-lock.yaml").is_file() {
            PackageManager::Pnpm
        } else if project_root.join("yarn.lock").is_file() {
            PackageManager::Yarn
        } else if project_root.join("bun.lockb").is_file()
            || project_root.join("bun.lock").is_file()
        {
            PackageManager::Bun
        } else {
            PackageManager::Npm
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Subcommand that adds packages to `dependencies`.
    fn add_subcommand(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            PackageManager::Pnpm | PackageManager::Yarn | PackageManager::Bun => "add",
        }
    }
}

/// Install `packages` into the project at `project_root`.
///
/// Runs `<pm> <add-subcommand> <packages...>` with inherited stdio so install
/// progress streams to the terminal. A non-zero exit is an error; files
/// already written to the project are left as they are.
pub async fn install_packages(
    manager: PackageManager,
    packages: &[String],
    project_root: &Path,
) -> Result<(), InstallError> {
    if packages.is_empty() {
        return Ok(());
    }

    tracing::info!(%manager, count = packages.len(), "installing npm packages");

    let status = Command::new(manager.command())
        .current_dir(project_root)
        .arg(manager.add_subcommand())
        .args(packages)
        .status()
        .await
        .map_err(|e| InstallError::PackageManagerUnavailable {
            manager,
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(InstallError::PackageInstallFailed { manager, status });
    }
    Ok(())
}
