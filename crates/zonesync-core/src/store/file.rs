// # File Domain Store
//
// File-based implementation of DomainStore with crash recovery.
//
// ## Purpose
//
// Persists the domain catalog across process restarts for deployments that
// embed the engine without a database.
//
// ## Crash Recovery
//
// - Atomic writes: uses write-then-rename for atomicity
// - Corruption detection: validates JSON on load
// - Automatic backup: keeps .backup of the last known good catalog
// - Recovery: falls back to the backup if corruption is detected
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "domains": {
//     "foo.example.org": {
//       "name": "foo.example.org",
//       "address_v4": "1.2.3.4",
//       "address_v6": "",
//       "owner_id": "owner-1",
//       "created": "2025-01-09T12:00:00Z",
//       "updated": null
//     }
//   },
//   "owners": {
//     "owner-1": { "id": "owner-1", "email": "user@example.org", "suspended": false, "created": "..." }
//   }
// }
// ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::Error;
use crate::domain::{Domain, Owner};
use crate::traits::DomainStore;

/// Catalog file format version, for future migration if the format changes
const CATALOG_FILE_VERSION: &str = "1.0";

/// File-based domain store with crash recovery
#[derive(Debug)]
pub struct FileDomainStore {
    path: PathBuf,
    state: Arc<RwLock<FileState>>,
}

/// Internal state for the file-based store
#[derive(Debug)]
struct FileState {
    domains: HashMap<String, Domain>,
    owners: HashMap<String, Owner>,
    dirty: bool,
}

/// Serializable catalog file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct CatalogFileFormat {
    version: String,
    domains: HashMap<String, Domain>,
    owners: HashMap<String, Owner>,
}

impl FileDomainStore {
    /// Create or load a file domain store
    ///
    /// This will:
    /// 1. Try to load the existing catalog file
    /// 2. If corruption is detected, try to load from backup
    /// 3. If both fail, start with an empty catalog
    /// 4. Create parent directories if needed
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::config(format!(
                        "failed to create catalog directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let (domains, owners) = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(FileState {
                domains,
                owners,
                dirty: false,
            })),
        })
    }

    /// Load the catalog with automatic recovery
    ///
    /// Recovery strategy:
    /// 1. Try to load the main catalog file
    /// 2. On a JSON parse error, try the backup
    /// 3. If the backup also fails, start empty
    async fn load_with_recovery(
        path: &Path,
    ) -> Result<(HashMap<String, Domain>, HashMap<String, Owner>), Error> {
        match Self::load(path).await {
            Ok(tables) => Ok(tables),
            Err(Error::Json(e)) => {
                tracing::warn!(
                    "catalog file appears corrupted: {}. attempting recovery from backup",
                    e
                );

                let backup_path = Self::backup_path(path);
                if backup_path.exists() {
                    match Self::load(&backup_path).await {
                        Ok(tables) => {
                            tracing::info!(
                                "recovered catalog from backup: {} domain(s)",
                                tables.0.len()
                            );
                            if let Err(restore_err) = fs::copy(&backup_path, path).await {
                                tracing::error!(
                                    "failed to restore catalog file from backup: {}",
                                    restore_err
                                );
                            }
                            Ok(tables)
                        }
                        Err(backup_err) => {
                            tracing::error!(
                                "backup also corrupted: {}. starting with empty catalog",
                                backup_err
                            );
                            Ok((HashMap::new(), HashMap::new()))
                        }
                    }
                } else {
                    tracing::warn!("no backup file found, starting with empty catalog");
                    Ok((HashMap::new(), HashMap::new()))
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Load the catalog from one file
    async fn load(path: &Path) -> Result<(HashMap<String, Domain>, HashMap<String, Owner>), Error> {
        if !path.exists() {
            tracing::debug!("catalog file does not exist: {}", path.display());
            return Ok((HashMap::new(), HashMap::new()));
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::store(format!(
                "failed to read catalog file {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog: CatalogFileFormat = serde_json::from_str(&content)?;

        if catalog.version != CATALOG_FILE_VERSION {
            tracing::warn!(
                "catalog file version mismatch: expected {}, got {}. attempting to load anyway",
                CATALOG_FILE_VERSION,
                catalog.version
            );
        }

        Ok((catalog.domains, catalog.owners))
    }

    /// Write the catalog to disk atomically
    async fn write_catalog(&self) -> Result<(), Error> {
        let json = {
            let guard = self.state.read().await;
            let catalog = CatalogFileFormat {
                version: CATALOG_FILE_VERSION.to_string(),
                domains: guard.domains.clone(),
                owners: guard.owners.clone(),
            };
            serde_json::to_string_pretty(&catalog)?
        };

        // Write to a temporary file first
        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::store(format!(
                    "failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::store(format!(
                    "failed to write temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::store(format!(
                    "failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        // Keep a backup of the current catalog (if it exists)
        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("failed to create catalog backup: {}", e);
            }
        }

        // Atomic rename (temp -> actual)
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::store(format!(
                "failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        let mut guard = self.state.write().await;
        guard.dirty = false;

        tracing::trace!("catalog written to {}", self.path.display());
        Ok(())
    }

    /// Path of the temporary file used for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    /// Path of the backup file
    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl DomainStore for FileDomainStore {
    async fn get_domain(&self, name: &str) -> Result<Option<Domain>, Error> {
        let guard = self.state.read().await;
        Ok(guard.domains.get(name).cloned())
    }

    async fn save_domain(&self, domain: &Domain) -> Result<(), Error> {
        {
            let mut guard = self.state.write().await;
            guard.domains.insert(domain.name.clone(), domain.clone());
            guard.dirty = true;
        }

        // Immediate write for durability
        self.write_catalog().await
    }

    async fn delete_domain(&self, name: &str) -> Result<(), Error> {
        {
            let mut guard = self.state.write().await;
            guard.domains.remove(name);
            guard.dirty = true;
        }

        self.write_catalog().await
    }

    async fn domains_for_owner(&self, owner_id: &str) -> Result<Vec<Domain>, Error> {
        let guard = self.state.read().await;
        let mut domains: Vec<Domain> = guard
            .domains
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        domains.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(domains)
    }

    async fn get_owner(&self, owner_id: &str) -> Result<Option<Owner>, Error> {
        let guard = self.state.read().await;
        Ok(guard.owners.get(owner_id).cloned())
    }

    async fn save_owner(&self, owner: &Owner) -> Result<(), Error> {
        {
            let mut guard = self.state.write().await;
            guard.owners.insert(owner.id.clone(), owner.clone());
            guard.dirty = true;
        }

        self.write_catalog().await
    }

    async fn flush(&self) -> Result<(), Error> {
        let guard = self.state.read().await;
        if guard.dirty {
            drop(guard);
            self.write_catalog().await
        } else {
            Ok(())
        }
    }
}
