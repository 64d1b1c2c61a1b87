//! File-backed sources and artifacts under the configuration folder.

use crate::config::MsmConfig;
use crate::definition::{CollectionDefinition, LedgerEntry};
use crate::enumerators::EnumeratorCatalog;
use crate::error::{CoreError, CoreResult};
use crate::source::{ArtifactStore, SchemaCatalog, TypeProvider};
use crate::version_number::VersionNumber;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File name of the version index written for the API document viewer.
pub const VERSION_INDEX_FILE: &str = "versions.json";

/// Filesystem layout of one configuration folder.
#[derive(Debug, Clone)]
pub struct ConfigFiles {
    msm_root: PathBuf,
    collections: PathBuf,
    custom_types: PathBuf,
    msm_types: PathBuf,
    enumerators_folder: PathBuf,
    enumerators_file: PathBuf,
    schemas: PathBuf,
    test_data: PathBuf,
    open_api: PathBuf,
    app_index: PathBuf,
    enumerators: EnumeratorCatalog,
}

impl ConfigFiles {
    fn layout(config: &MsmConfig) -> Self {
        Self {
            msm_root: config.msm_root.clone(),
            collections: config.collections_folder(),
            custom_types: config.custom_types_folder(),
            msm_types: config.msm_types_folder.clone(),
            enumerators_folder: config.enumerators_folder(),
            enumerators_file: config.enumerators_file(),
            schemas: config.schemas_folder(),
            test_data: config.test_data_folder(),
            open_api: config.open_api_folder(),
            app_index: config.app_index_file(),
            enumerators: EnumeratorCatalog::default(),
        }
    }

    /// Check the configuration folder and load the enumerator catalog.
    ///
    /// Required folders must already exist; output folders are created.
    pub fn attach(config: &MsmConfig) -> CoreResult<Self> {
        let mut files = Self::layout(config);

        for required in [
            &files.msm_root,
            &files.collections,
            &files.enumerators_folder,
            &files.schemas,
        ] {
            if !required.is_dir() {
                return Err(CoreError::FolderMissing {
                    path: required.display().to_string(),
                });
            }
        }

        for created in [&files.msm_types, &files.open_api, &files.test_data] {
            if !created.is_dir() {
                std::fs::create_dir_all(created).map_err(|e| io_error(created, e))?;
                log::info!("Created folder {}", created.display());
            }
        }

        if !files.enumerators_file.is_file() {
            return Err(CoreError::EnumeratorsFileMissing {
                path: files.enumerators_file.display().to_string(),
            });
        }

        let content = read_file(&files.enumerators_file)?;
        files.enumerators = serde_json::from_str(&content)
            .map_err(|e| json_error(&files.enumerators_file, e))?;
        log::info!(
            "Loaded {} enumerator revisions from {}",
            files.enumerators.len(),
            files.enumerators_file.display()
        );
        Ok(files)
    }

    /// Parse every `*.json` file in the collections folder, ordered by file name.
    pub fn collection_definitions(&self) -> CoreResult<Vec<CollectionDefinition>> {
        let entries =
            std::fs::read_dir(&self.collections).map_err(|e| io_error(&self.collections, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error(&self.collections, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| {
                log::debug!("Reading collection file {}", path.display());
                CollectionDefinition::load(path)
            })
            .collect()
    }

    /// The enumerator catalog loaded by [`attach`](Self::attach).
    pub fn enumerators(&self) -> &EnumeratorCatalog {
        &self.enumerators
    }
}

impl TypeProvider for ConfigFiles {
    /// Project types in `customTypes` shadow the shared `MSM_TYPES` library.
    fn type_definition(&self, name: &str) -> CoreResult<Value> {
        let file_name = format!("{name}.json");
        let path = [&self.custom_types, &self.msm_types]
            .into_iter()
            .map(|folder| folder.join(&file_name))
            .find(|path| path.is_file())
            .ok_or_else(|| CoreError::TypeNotFound {
                name: name.to_string(),
            })?;
        read_json(&path)
    }
}

impl SchemaCatalog for ConfigFiles {
    fn schema_source(&self, collection: &str, version: &VersionNumber) -> CoreResult<Value> {
        let path = self
            .schemas
            .join(format!("{collection}-{}.json", version.short_string()));
        read_json(&path)
    }
}

impl ArtifactStore for ConfigFiles {
    fn test_data(&self, name: &str) -> CoreResult<Vec<Value>> {
        let path = self.test_data.join(format!("{name}.json"));
        match read_json(&path)? {
            Value::Array(documents) => Ok(documents),
            _ => Err(CoreError::InvalidSchema {
                context: format!("test data '{name}'"),
                reason: "expected a JSON array of documents".to_string(),
            }),
        }
    }

    fn save_api_document(
        &self,
        collection: &str,
        version: &VersionNumber,
        document: &Value,
    ) -> CoreResult<()> {
        let path = self
            .open_api
            .join(format!("{collection}-{version}.openapi.yaml"));
        let yaml = serde_yaml::to_string(document)?;
        std::fs::write(&path, yaml).map_err(|e| io_error(&path, e))?;
        log::debug!("Wrote API document {}", path.display());
        Ok(())
    }

    fn publish_version_index(&self, versions: &[LedgerEntry]) -> CoreResult<()> {
        if self.app_index.is_file() {
            let target = self.open_api.join("index.html");
            std::fs::copy(&self.app_index, &target).map_err(|e| io_error(&target, e))?;
        } else {
            log::warn!(
                "API viewer page {} not found, skipping copy",
                self.app_index.display()
            );
        }

        let path = self.open_api.join(VERSION_INDEX_FILE);
        let json = serde_json::to_string_pretty(versions)?;
        std::fs::write(&path, json).map_err(|e| io_error(&path, e))?;
        log::info!("Published version index {}", path.display());
        Ok(())
    }
}

fn read_file(path: &Path) -> CoreResult<String> {
    std::fs::read_to_string(path).map_err(|e| io_error(path, e))
}

fn read_json(path: &Path) -> CoreResult<Value> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| json_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> CoreError {
    CoreError::IoWithPath {
        path: path.display().to_string(),
        source,
    }
}

fn json_error(path: &Path, source: serde_json::Error) -> CoreError {
    CoreError::JsonWithPath {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
