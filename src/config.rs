use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    /// Path to a JSON theme file with light/dark variants. Empty means the
    /// embedded default palette.
    pub theme_file: String,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Identity of the site the articles belong to; also the origin used when
/// building shareable article links.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub tagline: String,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Character budget for summaries derived from full content.
    pub excerpt_length: usize,
    pub padding: PaddingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PaddingConfig {
    pub horizontal: u16,
    pub vertical: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level (trace/debug/info/warn/error).
    pub level: String,
    /// Per-module overrides appended to the filter, e.g. [("tui_article_app::internal", "debug")].
    pub module_levels: Vec<(String, String)>,
    /// Directory for rolling log files. Defaults to "logs".
    pub log_directory: Option<String>,
    pub enable_performance_metrics: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "bitsofcode".to_string(),
            tagline: "Articles on Frontend Development".to_string(),
            base_url: "https://bitsofco.de".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            excerpt_length: 150,
            padding: PaddingConfig::default(),
        }
    }
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            horizontal: 1,
            vertical: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            module_levels: Vec::new(),
            log_directory: None,
            enable_performance_metrics: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            theme_file: String::new(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        // Look for config.ron in current directory or next to executable
        let mut candidates = Vec::new();

        // 1. Current working directory
        candidates.push(PathBuf::from("config.ron"));

        // 2. Next to executable
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    /// The tracing filter string built from the logging section: base level
    /// first, then per-module overrides.
    pub fn log_filter(&self) -> String {
        let mut filter = self.logging.level.clone();
        for (module, level) in &self.logging.module_levels {
            filter.push_str(&format!(",{}={}", module, level));
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_site() {
        let config = AppConfig::default();
        assert_eq!(config.site.name, "bitsofcode");
        assert_eq!(config.ui.excerpt_length, 150);
        assert!(config.theme_file.is_empty());
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let config: AppConfig = ron::from_str(r#"(site: (name: "my blog"))"#).unwrap();
        assert_eq!(config.site.name, "my blog");
        // Everything not mentioned keeps its default.
        assert_eq!(config.site.base_url, "https://bitsofco.de");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn log_filter_appends_module_overrides() {
        let mut config = AppConfig::default();
        config.logging.module_levels =
            vec![("tui_article_app::internal".to_string(), "debug".to_string())];
        assert_eq!(config.log_filter(), "info,tui_article_app::internal=debug");
    }

    #[test]
    fn garbage_config_is_an_error_not_a_panic() {
        assert!(ron::from_str::<AppConfig>("not ron at all (((").is_err());
    }
}
