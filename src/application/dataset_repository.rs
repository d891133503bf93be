// Repository trait for the experiment dataset
use crate::domain::experiment::Dataset;
use async_trait::async_trait;

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Fetch the raw dataset. Called once at startup.
    async fn load_dataset(&self) -> anyhow::Result<Dataset>;

    /// Human-readable origin, used in logs.
    fn source(&self) -> String;
}
