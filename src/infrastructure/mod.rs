// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_dataset_repository;
pub mod http_dataset_repository;

use crate::application::dataset_repository::DatasetRepository;
use crate::infrastructure::config::DatasetSettings;
use crate::infrastructure::file_dataset_repository::FileDatasetRepository;
use crate::infrastructure::http_dataset_repository::HttpDatasetRepository;
use std::sync::Arc;

/// Picks the HTTP or filesystem repository from the configured base path.
pub fn dataset_repository(settings: &DatasetSettings) -> Arc<dyn DatasetRepository> {
    if settings.is_remote() {
        Arc::new(HttpDatasetRepository::new(settings.location()))
    } else {
        Arc::new(FileDatasetRepository::new(settings.location()))
    }
}
