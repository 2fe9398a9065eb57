use shared::{ConfigError, SiteConfig};
use std::path::{Path, PathBuf};

pub mod site_generator;

/// Environment variable overriding the location of `site.toml`.
pub const SITE_CONFIG_ENV: &str = "SITE_CONFIG";
pub const DEFAULT_SITE_CONFIG_PATH: &str = "site.toml";

/// Loads the deployment config. A missing file means defaults, a broken one
/// is an error.
pub fn load_site_config() -> Result<SiteConfig, ConfigError> {
    let path = std::env::var(SITE_CONFIG_ENV).unwrap_or_else(|_| DEFAULT_SITE_CONFIG_PATH.to_string());
    load_site_config_from(Path::new(&path))
}

pub fn load_site_config_from(path: &Path) -> Result<SiteConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => SiteConfig::from_toml_str(&content),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            println!("⚙️ No {} found, using default site config", path.display());
            Ok(SiteConfig::default())
        }
        Err(source) => Err(ConfigError::Read { path: path.display().to_string(), source }),
    }
}

/// Generated page for `lang`, `None` for languages the site doesn't serve.
pub fn localized_page_path(config: &SiteConfig, lang: &str) -> Option<PathBuf> {
    if !config.languages.supported.iter().any(|supported| supported == lang) {
        return None;
    }
    Some(Path::new(&config.generator.output_dir).join(lang).join("index.html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("portfolio-site-missing-config.toml");
        let _ = std::fs::remove_file(&path);
        assert_eq!(load_site_config_from(&path).unwrap(), SiteConfig::default());
    }

    #[test]
    fn config_file_is_parsed() {
        let path = std::env::temp_dir().join(format!("portfolio-site-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[generator]\noutput_dir = \"dist\"\n").unwrap();
        let config = load_site_config_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.generator.output_dir, "dist");
    }

    #[test]
    fn pages_exist_only_for_supported_languages() {
        let config = SiteConfig::default();
        assert_eq!(
            localized_page_path(&config, "de"),
            Some(PathBuf::from("public").join("de").join("index.html"))
        );
        assert_eq!(localized_page_path(&config, "fr"), None);
        assert_eq!(localized_page_path(&config, "../secrets"), None);
    }
}
