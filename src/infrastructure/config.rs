use serde::Deserialize;

/// Environment override for the deployment base path.
pub const BASE_PATH_ENV: &str = "DASHBOARD_DATASET__BASE_PATH";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub dataset: DatasetSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetSettings {
    /// Directory or HTTP(S) URL prefix the dataset file is resolved against.
    pub base_path: String,
    pub file_name: String,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatasetSettings {
    pub fn is_remote(&self) -> bool {
        self.base_path.starts_with("http://") || self.base_path.starts_with("https://")
    }

    /// `base_path` joined with `file_name`, inserting a `/` only when missing.
    pub fn location(&self) -> String {
        if self.base_path.is_empty() || self.base_path.ends_with('/') {
            format!("{}{}", self.base_path, self.file_name)
        } else {
            format!("{}/{}", self.base_path, self.file_name)
        }
    }
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_with_env("config/dashboard", |key| std::env::var(key).ok())
}

fn load_with_env<F>(file: &str, env: F) -> anyhow::Result<DashboardConfig>
where
    F: Fn(&str) -> Option<String>,
{
    build_config(file, env(BASE_PATH_ENV))
}

fn build_config(file: &str, base_path: Option<String>) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("dataset.base_path", "./public/")?
        .set_default("dataset.file_name", "data.json")?
        .add_source(config::File::with_name(file).required(false))
        .set_override_option("dataset.base_path", base_path)?
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_file() {
        let config = build_config("config/does-not-exist", None).unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.dataset.location(), "./public/data.json");
        assert!(!config.dataset.is_remote());
    }

    #[test]
    fn test_base_path_from_environment() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DASHBOARD_DATASET__BASE_PATH", "https://cdn.example.com/"),
            ("DASHBOARD_SERVER__PORT", "1234"),
        ]);
        let config = load_with_env("config/does-not-exist", |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.dataset.base_path, "https://cdn.example.com/");
        assert_eq!(config.dataset.location(), "https://cdn.example.com/data.json");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_file_and_base_path_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dashboard.toml"),
            "[server]\nport = 9000\n\n[dataset]\nbase_path = \"/srv/dash\"\nfile_name = \"ab.json\"\n",
        )
        .unwrap();
        let file = dir.path().join("dashboard");
        let file = file.to_str().unwrap();

        let config = build_config(file, None).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dataset.location(), "/srv/dash/ab.json");

        let config = build_config(file, Some("https://cdn.example.com/ab/".to_string())).unwrap();
        assert!(config.dataset.is_remote());
        assert_eq!(config.dataset.location(), "https://cdn.example.com/ab/ab.json");
    }
}
