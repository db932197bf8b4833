//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use urbno_commerce::variant::AvailabilityPolicy;

/// Environment variable overriding `site.base_url`.
pub const SITE_URL_ENV: &str = "URBNO_SITE_URL";

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["urbno.toml", ".urbno.toml", "urbno.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Local storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Public site settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Catalog behaviour.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(SITE_URL_ENV) {
            if !url.trim().is_empty() {
                self.site.base_url = url;
            }
        }
        self
    }
}

/// Where the cart and accounts are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory for the file store; relative paths resolve against the
    /// directory holding the config file.
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".urbno")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// Public site settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL used for canonical links and structured data.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://urbno.com".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Catalog behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// How dimensions without a selection affect availability.
    #[serde(default)]
    pub availability: AvailabilityPolicy,
}

/// Generate a default urbno.toml config file.
pub fn generate_default_config() -> String {
    r#"# URBNO storefront configuration

[store]
# Cart and mock accounts live here
dir = ".urbno"

[site]
base_url = "https://urbno.com"

[catalog]
# "permissive": a dimension with no selection does not block purchase
# "strict": every dimension needs a selected option
availability = "permissive"
"#
    .to_string()
}
