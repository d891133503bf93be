// Filesystem dataset repository - Reads data.json from a local directory
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::experiment::Dataset;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileDatasetRepository {
    path: PathBuf,
}

impl FileDatasetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetRepository for FileDatasetRepository {
    async fn load_dataset(&self) -> Result<Dataset> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}
