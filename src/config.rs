// ⚙️ Migration Configuration - where the export lives, where the target is

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MigrationError, Result};
use crate::orchestrator::DEFAULT_QUERY_LIMIT;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8033";
pub const DEFAULT_API_KEY: &str = "automation-dev-key";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Leaf site export (JSON)
    pub source_path: PathBuf,

    /// Target API root, without the `/api` suffix
    pub base_url: String,

    pub api_key: String,

    /// Result-set limit for every lookup query
    pub query_limit: usize,

    /// Run against an in-memory target instead of the API
    pub dry_run: bool,

    /// Also write the report as JSON here
    pub report_json: Option<PathBuf>,
}

impl MigrationConfig {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        MigrationConfig {
            source_path: source_path.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            query_limit: DEFAULT_QUERY_LIMIT,
            dry_run: false,
            report_json: None,
        }
    }

    pub fn with_target(mut self, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.api_key = api_key.into();
        self
    }

    pub fn with_query_limit(mut self, limit: usize) -> Self {
        self.query_limit = limit;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_report_json(mut self, path: Option<PathBuf>) -> Self {
        self.report_json = path;
        self
    }

    /// Reject arguments the run could never succeed with
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(MigrationError::Config("source path is required".into()));
        }
        if !self.source_path.is_file() {
            return Err(MigrationError::Config(format!(
                "source export not found: {}",
                self.source_path.display()
            )));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(MigrationError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(MigrationError::Config("API key is required".into()));
        }

        if self.query_limit == 0 {
            return Err(MigrationError::Config("query limit must be at least 1".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn valid() -> (NamedTempFile, MigrationConfig) {
        let file = NamedTempFile::new().unwrap();
        let config = MigrationConfig::new(file.path());
        (file, config)
    }

    #[test]
    fn test_defaults_are_valid() {
        let (_file, config) = valid();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.query_limit, DEFAULT_QUERY_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_source_rejected() {
        let config = MigrationConfig::new("/definitely/not/here/export.json");
        assert!(matches!(config.validate(), Err(MigrationError::Config(_))));

        let empty = MigrationConfig::new("");
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_bad_url_and_key_rejected() {
        let (_file, config) = valid();

        let no_scheme = config.clone().with_target("127.0.0.1:8033", "key");
        assert!(no_scheme.validate().is_err());

        let no_key = config.clone().with_target("https://pos.example.com", "  ");
        assert!(no_key.validate().is_err());

        let https = config.with_target("https://pos.example.com", "key");
        assert!(https.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let (_file, config) = valid();
        let err = config.with_query_limit(0).validate().unwrap_err();

        assert!(err.to_string().contains("query limit"));
    }
}
