use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Base name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "datasource-workflow";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "DATASOURCE_WORKFLOW";

/// Main configuration structure for the datasource workflow notifier
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Host options that shape the produced notifications
    pub notifications: NotificationSettings,
    /// Logging settings
    pub observability: ObservabilityConfig,
    /// Links back into the content editor
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Produce a notification for an actionable datasource even when the
    /// user can neither write the item nor run any command on it
    pub show_workflow_no_access_message: bool,
    /// Emphasize labels with HTML on the inline notification surface
    pub use_html_in_messaging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON structured logs instead of human readable lines
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Scheme and host of the content editor, e.g. `https://cms.example.com`
    pub base_url: Option<String>,
}

impl NotifierConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (`datasource-workflow.toml`) or `explicit_file`
    /// 3. Environment variables (prefixed with DATASOURCE_WORKFLOW_)
    pub fn load(explicit_file: Option<&Path>) -> Result<Self> {
        Self::from_sources(explicit_file, None)
    }

    /// Same as `load`, reading environment overrides from `env` instead of
    /// the process environment when given.
    pub fn from_sources(
        explicit_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        match explicit_file {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                builder = builder.add_source(File::with_name(CONFIG_FILE_NAME).required(false));
            }
        }

        // Override with environment variables
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build()?;
        let notifier_config: NotifierConfig = config.try_deserialize()?;
        Ok(notifier_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_conservative() {
        let config = NotifierConfig::default();
        assert!(!config.notifications.show_workflow_no_access_message);
        assert!(!config.notifications.use_html_in_messaging);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.editor.base_url.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("override.toml");
        std::fs::write(
            &path,
            "[notifications]\nuse_html_in_messaging = true\n\n[editor]\nbase_url = \"https://cms.example.com\"\n",
        )
        .unwrap();

        let config = NotifierConfig::from_sources(Some(&path), Some(HashMap::new())).unwrap();

        assert!(config.notifications.use_html_in_messaging);
        assert!(!config.notifications.show_workflow_no_access_message);
        assert_eq!(config.editor.base_url.as_deref(), Some("https://cms.example.com"));
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.toml");
        std::fs::write(&path, "[notifications]\nshow_workflow_no_access_message = false\n").unwrap();

        let env = HashMap::from([
            (
                "DATASOURCE_WORKFLOW_NOTIFICATIONS__SHOW_WORKFLOW_NO_ACCESS_MESSAGE".to_string(),
                "true".to_string(),
            ),
            (
                "DATASOURCE_WORKFLOW_OBSERVABILITY__LOG_LEVEL".to_string(),
                "debug".to_string(),
            ),
        ]);
        let config = NotifierConfig::from_sources(Some(&path), Some(env)).unwrap();

        assert!(config.notifications.show_workflow_no_access_message);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = NotifierConfig::default();
        config.notifications.use_html_in_messaging = true;
        config.observability.json_logs = true;
        config.save_to_file(&path).unwrap();

        let loaded = NotifierConfig::from_sources(Some(&path), Some(HashMap::new())).unwrap();

        assert_eq!(loaded, config);
    }
}
