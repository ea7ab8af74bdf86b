// Feed configuration read from YAML, with environment overrides.
//
// Recognised keys
// - namespace: feed key namespace (default "feed")
// - per_page:  default page size for paginate (default 50)
// - seed:      feeds to preload, as a list of { user_id, events, last_read }
// Any other key is kept as-is in `options`.
//
// Environment
// - FEED_NAMESPACE and FEED_PER_PAGE replace the file values when set.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::application::errors::ApplicationError;
use crate::core::feed::key::validate_namespace;
use crate::core::feed::store::SeedFeed;

pub const DEFAULT_NAMESPACE: &str = "feed";
pub const DEFAULT_PER_PAGE: usize = 50;

const NAMESPACE_VAR: &str = "FEED_NAMESPACE";
const PER_PAGE_VAR: &str = "FEED_PER_PAGE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default)]
    pub seed: Vec<SeedFeed>,
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_yaml::Value>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            per_page: default_per_page(),
            seed: Vec::new(),
            options: BTreeMap::new(),
        }
    }
}

impl FeedConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ApplicationError> {
        // An empty document is a valid, all-defaults config.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ApplicationError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// `lookup` resolves a variable name to its value, if set.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ApplicationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(namespace) = lookup(NAMESPACE_VAR) {
            self.namespace = namespace;
        }
        if let Some(per_page) = lookup(PER_PAGE_VAR) {
            self.per_page = per_page
                .trim()
                .parse()
                .map_err(|error| ApplicationError::InvalidSetting {
                    field: "per_page",
                    reason: format!("{per_page:?}: {error}"),
                })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_env_overrides(self) -> Result<Self, ApplicationError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn validate(&self) -> Result<(), ApplicationError> {
        validate_namespace(&self.namespace).map_err(|error| ApplicationError::InvalidSetting {
            field: "namespace",
            reason: error.to_string(),
        })?;
        if self.per_page == 0 {
            return Err(ApplicationError::InvalidSetting {
                field: "per_page",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn option(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.options.get(name)
    }
}
