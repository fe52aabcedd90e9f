//! Project persistence backends.
//!
//! The editor itself never touches storage; hosts write the floor back
//! through the change callback. These backends cover the surrounding
//! CRUD plumbing: keeping whole projects by a caller-chosen id.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::model::Project;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("project not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A place projects are kept: in memory, on disk, or wherever a host
/// binds it.
pub trait ProjectStore {
    fn save(&self, id: &str, project: &Project) -> StorageResult<()>;
    fn load(&self, id: &str) -> StorageResult<Project>;
    fn delete(&self, id: &str) -> StorageResult<()>;
    fn list(&self) -> StorageResult<Vec<String>>;
    fn exists(&self, id: &str) -> StorageResult<bool>;
}

/// In-memory store for tests and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    projects: RwLock<HashMap<String, Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn save(&self, id: &str, project: &Project) -> StorageResult<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        projects.insert(id.to_string(), project.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<Project> {
        let projects = self
            .projects
            .read()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        projects
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        projects.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let projects = self
            .projects
            .read()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        Ok(projects.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let projects = self
            .projects
            .read()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        Ok(projects.contains_key(id))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use super::{ProjectStore, StorageError, StorageResult};
    use crate::model::Project;
    use std::fs;
    use std::path::PathBuf;

    /// Stores projects as JSON files in a directory.
    pub struct FileStore {
        base_path: PathBuf,
    }

    impl FileStore {
        /// Create a file store rooted at `base_path`, creating the
        /// directory if needed.
        pub fn new(base_path: PathBuf) -> StorageResult<Self> {
            if !base_path.exists() {
                fs::create_dir_all(&base_path).map_err(|e| {
                    StorageError::Io(format!("failed to create storage directory: {e}"))
                })?;
            }
            Ok(Self { base_path })
        }

        /// File store in the platform's local-data directory
        /// (`pudorys/projects`).
        pub fn default_location() -> StorageResult<Self> {
            let base = dirs::data_local_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| StorageError::Io("could not determine home directory".into()))?;
            Self::new(base.join("pudorys").join("projects"))
        }

        pub fn base_path(&self) -> &PathBuf {
            &self.base_path
        }

        fn project_path(&self, id: &str) -> PathBuf {
            // Ids become filenames; keep them filesystem-safe.
            let safe_id: String = id
                .chars()
                .map(|c| {
                    if c.is_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            self.base_path.join(format!("{safe_id}.json"))
        }
    }

    impl ProjectStore for FileStore {
        fn save(&self, id: &str, project: &Project) -> StorageResult<()> {
            let json = project
                .to_json()
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            let path = self.project_path(id);
            fs::write(&path, json)
                .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", path.display())))
        }

        fn load(&self, id: &str) -> StorageResult<Project> {
            let path = self.project_path(id);
            if !path.exists() {
                return Err(StorageError::NotFound(id.to_string()));
            }
            let json = fs::read_to_string(&path)
                .map_err(|e| StorageError::Io(format!("failed to read {}: {e}", path.display())))?;
            Project::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("failed to parse {}: {e}", path.display()))
            })
        }

        fn delete(&self, id: &str) -> StorageResult<()> {
            let path = self.project_path(id);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("failed to delete {}: {e}", path.display()))
                })?;
            }
            Ok(())
        }

        fn list(&self) -> StorageResult<Vec<String>> {
            if !self.base_path.exists() {
                return Ok(Vec::new());
            }
            let entries = fs::read_dir(&self.base_path)
                .map_err(|e| StorageError::Io(format!("failed to read directory: {e}")))?;

            let mut ids = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        ids.push(stem.to_string());
                    }
                }
            }
            Ok(ids)
        }

        fn exists(&self, id: &str) -> StorageResult<bool> {
            Ok(self.project_path(id).exists())
        }
    }
}
