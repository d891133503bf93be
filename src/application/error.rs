// Errors surfaced by the dashboard use cases
use crate::domain::experiment::DatasetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dataset has not been loaded")]
    NotLoaded,
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),
    #[error("no row for date `{0}`")]
    UnknownDate(String),
    #[error("invalid dataset: {0}")]
    InvalidDataset(#[from] DatasetError),
    #[error(transparent)]
    Load(#[from] anyhow::Error),
}
