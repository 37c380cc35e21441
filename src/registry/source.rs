//! Registry access: fetch the manifest and raw source files from a remote
//! endpoint or a local directory tree.
//!
//! A [`RegistryClient`] is constructed once per invocation and passed by
//! reference everywhere. It holds the active source (the `--local` override
//! redirects all access to a filesystem root) and memoizes the manifest for
//! the lifetime of the process invocation; nothing here is module-global.

use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::registry::manifest::Manifest;

/// Default remote registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://ui.spaceinvoices.com";

/// File name of the manifest document at the registry root.
const MANIFEST_FILE: &str = "registry.json";

/// Directory under the registry root holding distributable sources.
const SRC_DIR: &str = "src";

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Failed to fetch registry manifest from {url}: {reason}")]
    ManifestFetch { url: String, reason: String },

    #[error("Failed to parse registry manifest from {url}: {reason}")]
    ManifestParse { url: String, reason: String },

    #[error("Failed to fetch {path} from registry: {reason}")]
    FileFetch { path: String, reason: String },
}

/// Where registry data comes from.
enum Source {
    Remote {
        base_url: String,
        client: reqwest::Client,
    },
    Local {
        root: PathBuf,
    },
}

/// Handle to one registry, remote or local, with a per-invocation manifest
/// cache.
pub struct RegistryClient {
    source: Source,
    manifest: OnceCell<Manifest>,
}

impl RegistryClient {
    /// Client for a remote HTTP(S) registry. Trailing slashes on the base URL
    /// are tolerated.
    pub fn remote(base_url: &str) -> Self {
        Self {
            source: Source::Remote {
                base_url: base_url.trim_end_matches('/').to_string(),
                client: reqwest::Client::new(),
            },
            manifest: OnceCell::new(),
        }
    }

    /// Client reading a registry checkout from disk (the `--local` override).
    pub fn local(root: PathBuf) -> Self {
        Self {
            source: Source::Local { root },
            manifest: OnceCell::new(),
        }
    }

    /// Human-readable source location, for logs and error output.
    pub fn location(&self) -> String {
        match &self.source {
            Source::Remote { base_url, .. } => base_url.clone(),
            Source::Local { root } => root.display().to_string(),
        }
    }

    /// The registry manifest, fetched on first use and cached for the rest of
    /// the invocation. Already normalized (cross-kind references tagged).
    pub async fn manifest(&self) -> Result<&Manifest, RegistryError> {
        self.manifest
            .get_or_try_init(|| self.fetch_manifest())
            .await
    }

    async fn fetch_manifest(&self) -> Result<Manifest, RegistryError> {
        let (location, text) = match &self.source {
            Source::Remote { base_url, client } => {
                let url = format!("{base_url}/{MANIFEST_FILE}");
                let text = fetch_text(client, &url)
                    .await
                    .map_err(|reason| RegistryError::ManifestFetch {
                        url: url.clone(),
                        reason,
                    })?;
                (url, text)
            }
            Source::Local { root } => {
                let path = root.join(MANIFEST_FILE);
                let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
                    RegistryError::ManifestFetch {
                        url: path.display().to_string(),
                        reason: e.to_string(),
                    }
                })?;
                (path.display().to_string(), text)
            }
        };

        let manifest =
            Manifest::from_json(&text).map_err(|e| RegistryError::ManifestParse {
                url: location,
                reason: e.to_string(),
            })?;
        tracing::debug!(
            components = manifest.components.len(),
            providers = manifest.providers.len(),
            utils = manifest.utils.len(),
            "loaded registry manifest"
        );
        Ok(manifest)
    }

    /// Raw text of one registry source file, addressed by its registry-relative
    /// path (e.g. `components/ui/button.tsx`).
    pub async fn fetch_file(&self, relative: &str) -> Result<String, RegistryError> {
        match &self.source {
            Source::Remote { base_url, client } => {
                let url = format!("{base_url}/{SRC_DIR}/{relative}");
                fetch_text(client, &url)
                    .await
                    .map_err(|reason| RegistryError::FileFetch {
                        path: relative.to_string(),
                        reason,
                    })
            }
            Source::Local { root } => {
                let path = root.join(SRC_DIR).join(relative);
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| RegistryError::FileFetch {
                        path: relative.to_string(),
                        reason: format!("{}: {}", path.display(), e),
                    })
            }
        }
    }
}

/// GET a URL, failing on transport errors and non-success statuses alike.
async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    let response = response.error_for_status().map_err(|e| e.to_string())?;

    response
        .text()
        .await
        .map_err(|e| format!("failed to read body: {e}"))
}
