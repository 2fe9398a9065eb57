//! Deployment configuration read from `site.toml`.
//!
//! Every section and field is optional; missing values take the defaults
//! below, so an empty file describes the standard two-language deployment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FORM_ENDPOINT: &str = "../submit.php";
pub const DEFAULT_IMAGE_DELAY_MS: u32 = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read site config {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid site config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("default language '{default}' is not in the supported list {supported:?}")]
    UnsupportedDefault { default: String, supported: Vec<String> },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub form: FormConfig,
    pub images: ImagesConfig,
    pub languages: LanguagesConfig,
    pub generator: GeneratorConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    /// Relative to the localized page, hence the `../` default.
    pub endpoint: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImagesConfig {
    pub preload_delay_ms: u32,
    pub lazy_load_delay_ms: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LanguagesConfig {
    pub supported: Vec<String>,
    pub default: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub source_dir: String,
    pub output_dir: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_FORM_ENDPOINT.to_string() }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            preload_delay_ms: DEFAULT_IMAGE_DELAY_MS,
            lazy_load_delay_ms: DEFAULT_IMAGE_DELAY_MS,
        }
    }
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            supported: vec!["de".to_string(), "en".to_string()],
            default: "en".to_string(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_dir: "generator".to_string(),
            output_dir: "public".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let languages = &self.languages;
        if !languages.supported.contains(&languages.default) {
            return Err(ConfigError::UnsupportedDefault {
                default: languages.default.clone(),
                supported: languages.supported.clone(),
            });
        }
        Ok(())
    }
}
