//! Materialize an installation plan into the consuming project.
//!
//! The installer drives the pipeline end to end: resolve the requested
//! components against the manifest, fetch each planned file, rewrite its
//! imports, and write it at the aliased destination. Package installation is
//! a separate step ([`package_manager`]) invoked by the command layer, so a
//! failed install never touches files already written — there is no rollback
//! across an `add`.

pub mod package_manager;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::registry::resolver::{ResolveError, ResolvedDependencies, resolve_dependencies};
use crate::registry::source::{RegistryClient, RegistryError};
use crate::registry::transform::{full_destination_path, transform_imports};

pub use package_manager::{PackageManager, install_packages};

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Package manager '{manager}' could not be run: {reason}")]
    PackageManagerUnavailable {
        manager: PackageManager,
        reason: String,
    },

    #[error("'{manager}' exited with {status}")]
    PackageInstallFailed {
        manager: PackageManager,
        status: std::process::ExitStatus,
    },
}

/// How `materialize` treats destinations that already exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Overwrite existing files instead of skipping them.
    pub overwrite: bool,
}

/// What happened to one planned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Written,
    SkippedExisting,
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub registry_path: String,
    pub destination: PathBuf,
    pub status: FileStatus,
}

/// Report of one `materialize` call, for the command layer to print.
#[derive(Debug, Clone, Default)]
pub struct InstallOutcome {
    pub files: Vec<FileOutcome>,
}

impl InstallOutcome {
    pub fn written(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Written)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.files.len() - self.written()
    }
}

/// Installs registry components into one project.
pub struct Installer<'a> {
    client: &'a RegistryClient,
    config: &'a Config,
    project_root: &'a Path,
}

impl<'a> Installer<'a> {
    pub fn new(client: &'a RegistryClient, config: &'a Config, project_root: &'a Path) -> Self {
        Self {
            client,
            config,
            project_root,
        }
    }

    /// Resolve the requested component keys into a full installation plan.
    /// Pure lookup work; nothing is written. A single bad key fails the whole
    /// batch here, before any file lands on disk.
    pub async fn plan(&self, keys: &[String]) -> Result<ResolvedDependencies, InstallError> {
        let manifest = self.client.manifest().await?;
        Ok(resolve_dependencies(manifest, keys)?)
    }

    /// Planned destinations that already exist in the project. The command
    /// layer uses this to confirm overwrites before materializing.
    pub fn existing_destinations(&self, plan: &ResolvedDependencies) -> Vec<PathBuf> {
        plan.all_files
            .iter()
            .map(|f| full_destination_path(f, self.config, self.project_root))
            .filter(|dest| dest.exists())
            .collect()
    }

    /// Fetch, transform, and write every file in the plan.
    ///
    /// Files are processed in plan order (dependencies first). Existing
    /// destinations are skipped unless `options.overwrite`. A transport or
    /// write error aborts immediately; files already written stay on disk.
    pub async fn materialize(
        &self,
        plan: &ResolvedDependencies,
        options: InstallOptions,
    ) -> Result<InstallOutcome, InstallError> {
        let mut outcome = InstallOutcome::default();

        for registry_path in &plan.all_files {
            let destination = full_destination_path(registry_path, self.config, self.project_root);

            if destination.exists() && !options.overwrite {
                tracing::debug!(path = %destination.display(), "skipping existing file");
                outcome.files.push(FileOutcome {
                    registry_path: registry_path.clone(),
                    destination,
                    status: FileStatus::SkippedExisting,
                });
                continue;
            }

            let source = self.client.fetch_file(registry_path).await?;
            let rewritten = transform_imports(&source, self.config);

            if let Some(parent) = destination.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| InstallError::Write {
                        path: parent.to_path_buf(),
                        reason: e.to_string(),
                    })?;
            }
            tokio::fs::write(&destination, rewritten)
                .await
                .map_err(|e| InstallError::Write {
                    path: destination.clone(),
                    reason: e.to_string(),
                })?;

            tracing::debug!(from = registry_path, to = %destination.display(), "wrote file");
            outcome.files.push(FileOutcome {
                registry_path: registry_path.clone(),
                destination,
                status: FileStatus::Written,
            });
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_test_registry(root: &Path) {
        fs::create_dir_all(root.join("src/components/ui")).unwrap();
        fs::create_dir_all(root.join("src/providers")).unwrap();
        fs::create_dir_all(root.join("src/lib")).unwrap();

        fs::write(
            root.join("registry.json"),
            r#"{
                "name": "spaceui",
                "description": "test registry",
                "baseUrl": "https://ui.spaceinvoices.com",
                "categories": { "primitives": { "name": "Primitives" } },
                "utils": {
                    "cn": { "name": "Class Names", "files": ["lib/utils.ts"],
                            "npmDependencies": ["clsx"] }
                },
                "providers": {
                    "sdk-provider": { "name": "SDK Provider",
                                      "files": ["providers/sdk-provider.tsx"],
                                      "npmDependencies": ["@spaceinvoices/space-js"] }
                },
                "components": {
                    "button": {
                        "name": "Button",
                        "category": "primitives",
                        "files": ["components/ui/button.tsx"],
                        "providers": ["sdk-provider"],
                        "utils": ["cn"]
                    }
                }
            }"#,
        )
        .unwrap();

        fs::write(
            root.join("src/components/ui/button.tsx"),
            "import { cn } from '@/ui/lib/utils';\nexport const Button = () => null;\n",
        )
        .unwrap();
        fs::write(
            root.join("src/providers/sdk-provider.tsx"),
            "export const SdkProvider = () => null;\n",
        )
        .unwrap();
        fs::write(root.join("src/lib/utils.ts"), "export const cn = () => '';\n").unwrap();
    }

    #[tokio::test]
    async fn materialize_writes_transformed_files_at_aliases() {
        let registry = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_test_registry(registry.path());

        let client = RegistryClient::local(registry.path().to_path_buf());
        let config = Config::with_defaults();
        let installer = Installer::new(&client, &config, project.path());

        let plan = installer.plan(&["button".to_string()]).await.unwrap();
        let outcome = installer
            .materialize(&plan, InstallOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome.written(), 3);
        assert_eq!(outcome.skipped(), 0);

        let button = project.path().join("src/components/ui/button.tsx");
        let content = fs::read_to_string(&button).unwrap();
        // Import was rewritten to the configured lib alias.
        assert!(content.contains("from '@/lib/utils'"), "{content}");
        assert!(project.path().join("src/providers/sdk-provider.tsx").exists());
        assert!(project.path().join("src/lib/utils.ts").exists());
    }

    #[tokio::test]
    async fn existing_files_are_skipped_without_overwrite() {
        let registry = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_test_registry(registry.path());

        let client = RegistryClient::local(registry.path().to_path_buf());
        let config = Config::with_defaults();
        let installer = Installer::new(&client, &config, project.path());

        let lib = project.path().join("src/lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("utils.ts"), "// locally modified\n").unwrap();

        let plan = installer.plan(&["button".to_string()]).await.unwrap();
        assert_eq!(installer.existing_destinations(&plan).len(), 1);

        let outcome = installer
            .materialize(&plan, InstallOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.skipped(), 1);
        assert_eq!(
            fs::read_to_string(lib.join("utils.ts")).unwrap(),
            "// locally modified\n"
        );

        // With overwrite, the registry copy replaces it.
        let outcome = installer
            .materialize(&plan, InstallOptions { overwrite: true })
            .await
            .unwrap();
        assert_eq!(outcome.written(), 3);
        assert!(fs::read_to_string(lib.join("utils.ts"))
            .unwrap()
            .contains("export const cn"));
    }

    #[tokio::test]
    async fn plan_failure_writes_nothing() {
        let registry = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_test_registry(registry.path());

        let client = RegistryClient::local(registry.path().to_path_buf());
        let config = Config::with_defaults();
        let installer = Installer::new(&client, &config, project.path());

        let err = installer
            .plan(&["button".to_string(), "ghost".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("\"ghost\" not found"));
        assert!(!project.path().join("src").exists());
    }

    #[tokio::test]
    async fn missing_registry_file_aborts_but_keeps_earlier_writes() {
        let registry = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_test_registry(registry.path());
        // Break the last planned file (the component's own source comes after
        // its dependencies in the plan).
        fs::remove_file(registry.path().join("src/components/ui/button.tsx")).unwrap();

        let client = RegistryClient::local(registry.path().to_path_buf());
        let config = Config::with_defaults();
        let installer = Installer::new(&client, &config, project.path());

        let plan = installer.plan(&["button".to_string()]).await.unwrap();
        let err = installer
            .materialize(&plan, InstallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, InstallError::Registry(_)));
        // Dependencies written before the failure remain on disk.
        assert!(project.path().join("src/providers/sdk-provider.tsx").exists());
    }
}
