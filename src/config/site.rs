//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    /// IANA timezone used when formatting publication dates
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Content backend
    #[serde(default)]
    pub cms: CmsConfig,

    // Home page
    pub posts_per_page: usize,

    // Images
    pub body_image_width: u32,
    pub main_image_width: u32,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            cms: CmsConfig::default(),

            posts_per_page: 12,

            body_image_width: 800,
            main_image_width: 1200,

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, apply environment overrides and
    /// validate the result.
    pub fn resolve<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            Self::load(path)?
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;

        tracing::info!(
            project_id = %config.cms.project_id,
            dataset = %config.cms.dataset,
            api_version = %config.cms.api_version,
            use_cdn = config.cms.use_cdn,
            revalidate_secs = config.cms.revalidate_secs,
            "site configuration loaded"
        );

        Ok(config)
    }

    /// Override backend settings from the environment.
    ///
    /// Recognised variables: `CMS_PROJECT_ID`, `CMS_DATASET`,
    /// `CMS_API_VERSION`, `CMS_TOKEN`, `CMS_API_HOST`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("CMS_PROJECT_ID") {
            self.cms.project_id = v;
        }
        if let Some(v) = non_empty("CMS_DATASET") {
            self.cms.dataset = v;
        }
        if let Some(v) = non_empty("CMS_API_VERSION") {
            self.cms.api_version = v;
        }
        if let Some(v) = non_empty("CMS_TOKEN") {
            self.cms.token = Some(v);
        }
        if let Some(v) = non_empty("CMS_API_HOST") {
            self.cms.api_host = Some(v);
        }
    }

    /// Check that the backend identity is present and well formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let project_id = self.cms.project_id.trim();
        if project_id.is_empty() {
            return Err(ConfigError::MissingProjectId);
        }
        if !project_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ConfigError::InvalidProjectId(project_id.to_string()));
        }

        let dataset = self.cms.dataset.trim();
        if dataset.is_empty() {
            return Err(ConfigError::MissingDataset);
        }
        let valid_dataset = dataset.len() <= 64
            && dataset
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !valid_dataset {
            return Err(ConfigError::InvalidDataset(dataset.to_string()));
        }

        for (field, value) in [
            ("posts_per_page", self.posts_per_page as u64),
            ("body_image_width", u64::from(self.body_image_width)),
            ("main_image_width", u64::from(self.main_image_width)),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroSetting(field));
            }
        }

        Ok(())
    }

    /// Parsed display timezone, falling back to UTC
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
            chrono_tz::UTC
        })
    }
}

/// Content backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    /// Dated API version, e.g. `2024-01-01`
    pub api_version: String,
    /// Query the edge-cached API host instead of the live one
    pub use_cdn: bool,
    /// Read token for private datasets
    pub token: Option<String>,
    /// Overrides the computed API base URL
    pub api_host: Option<String>,
    /// Image CDN base URL
    pub image_host: String,
    /// Maximum age of a cached query result, in seconds
    pub revalidate_secs: u64,
    /// HTTP timeout for a single query, in seconds
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: String::new(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            token: None,
            api_host: None,
            image_host: "https://cdn.sanity.io".to_string(),
            revalidate_secs: 60,
            timeout_secs: 10,
        }
    }
}

impl CmsConfig {
    /// Base URL for query requests, without a trailing slash
    pub fn api_base(&self) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let domain = if self.use_cdn {
                    "apicdn.sanity.io"
                } else {
                    "api.sanity.io"
                };
                format!("https://{}.{}", self.project_id.trim(), domain)
            }
        }
    }

    /// Staleness window applied to every query
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn configured() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.cms.project_id = "abc123".to_string();
        config.cms.dataset = "production".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Blog");
        assert_eq!(config.posts_per_page, 12);
        assert_eq!(config.body_image_width, 800);
        assert_eq!(config.cms.revalidate_secs, 60);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
timezone: Europe/Paris
cms:
  project_id: abc123
  dataset: production
  use_cdn: false
posts_per_page: 6
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.cms.project_id, "abc123");
        assert!(!config.cms.use_cdn);
        assert_eq!(config.cms.api_version, "2024-01-01");
        assert_eq!(config.posts_per_page, 6);
        assert_eq!(config.tz(), chrono_tz::Europe::Paris);
    }

    #[test]
    fn test_validate_requires_backend_identity() {
        let config = SiteConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingProjectId)
        ));

        let mut config = configured();
        config.cms.dataset = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::MissingDataset)));

        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_identity() {
        let mut config = configured();
        config.cms.project_id = "Abc 123".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProjectId(_))
        ));

        let mut config = configured();
        config.cms.dataset = "Prod/Set".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CMS_PROJECT_ID", "envproj"),
            ("CMS_DATASET", "staging"),
            ("CMS_TOKEN", "secret"),
            ("CMS_API_VERSION", ""),
        ]
        .into_iter()
        .collect();

        let mut config = configured();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.cms.project_id, "envproj");
        assert_eq!(config.cms.dataset, "staging");
        assert_eq!(config.cms.token.as_deref(), Some("secret"));
        assert_eq!(config.cms.api_version, "2024-01-01");
    }

    #[test]
    fn test_api_base() {
        let mut config = configured();
        assert_eq!(config.cms.api_base(), "https://abc123.apicdn.sanity.io");
        config.cms.use_cdn = false;
        assert_eq!(config.cms.api_base(), "https://abc123.api.sanity.io");
        config.cms.api_host = Some("http://127.0.0.1:9999/".to_string());
        assert_eq!(config.cms.api_base(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_api_base_trims_project_id() {
        let mut config = configured();
        config.cms.project_id = " abc123 ".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.cms.api_base(), "https://abc123.apicdn.sanity.io");
    }

    #[test]
    fn test_validate_rejects_zero_settings() {
        let mut config = configured();
        config.posts_per_page = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroSetting("posts_per_page"))
        ));

        let mut config = configured();
        config.body_image_width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroSetting("body_image_width"))
        ));

        let mut config = configured();
        config.main_image_width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroSetting("main_image_width"))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From File\ncms:\n  project_id: p1\n  dataset: d1\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From File");
        assert_eq!(config.cms.project_id, "p1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let mut config = configured();
        config.timezone = "Mars/Olympus".to_string();
        assert_eq!(config.tz(), chrono_tz::UTC);
    }
}
