// HTTP dataset repository - Fetches data.json from the deployment base URL
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::experiment::Dataset;
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpDatasetRepository {
    url: String,
    client: reqwest::Client,
}

impl HttpDatasetRepository {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DatasetRepository for HttpDatasetRepository {
    async fn load_dataset(&self) -> Result<Dataset> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to request dataset")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Dataset request failed with status {}: {}", status, body);
        }

        response
            .json::<Dataset>()
            .await
            .context("Failed to parse dataset")
    }

    fn source(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn dataset_router() -> Router {
        Router::new()
            .route(
                "/data.json",
                get(|| async {
                    (
                        [("content-type", "application/json")],
                        r#"{"variations":[{"id":7,"name":"B"}],"data":[{"date":"2024-01-01","visits":{"7":40},"conversions":{"7":4}}]}"#,
                    )
                }),
            )
            .route("/broken.json", get(|| async { "{not json" }))
            .route(
                "/forbidden.json",
                get(|| async { (StatusCode::FORBIDDEN, "no access") }),
            )
    }

    #[tokio::test]
    async fn test_load_dataset_over_http() {
        let base = serve(dataset_router()).await;
        let repo = HttpDatasetRepository::new(format!("{}/data.json", base));

        let dataset = repo.load_dataset().await.unwrap();
        assert_eq!(dataset.variations[0].name, "B");
        assert_eq!(dataset.data[0].visits["7"], 40);
        assert_eq!(repo.source(), format!("{}/data.json", base));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let base = serve(dataset_router()).await;

        let err = HttpDatasetRepository::new(format!("{}/forbidden.json", base))
            .load_dataset()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("no access"));

        let err = HttpDatasetRepository::new(format!("{}/missing.json", base))
            .load_dataset()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let base = serve(dataset_router()).await;
        let err = HttpDatasetRepository::new(format!("{}/broken.json", base))
            .load_dataset()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse dataset"));
    }
}
