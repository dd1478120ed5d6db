use crate::config::constants::{model_helpers, paths, temperatures};
use crate::config::core::{PipelineConfig, ProviderConfig, ServerConfig};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for blogforge
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlogForgeConfig {
    /// Text-generation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Stage temperatures
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// HTTP surface settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl BlogForgeConfig {
    /// Reject values the provider would refuse at request time
    pub fn validate(&self) -> Result<()> {
        if model_helpers::supported_for(&self.provider.name).is_none() {
            bail!("Unsupported provider: {}", self.provider.name);
        }
        if self.provider.base_url.trim().is_empty() {
            bail!("provider.base_url cannot be empty");
        }
        if self.provider.default_model.trim().is_empty() {
            bail!("provider.default_model cannot be empty");
        }
        for (name, value) in self.pipeline.temperatures() {
            if !(temperatures::MIN..=temperatures::MAX).contains(&value) {
                bail!(
                    "pipeline.{} must be between {} and {}, got {}",
                    name,
                    temperatures::MIN,
                    temperatures::MAX,
                    value
                );
            }
        }
        Ok(())
    }
}

/// Configuration manager for loading and validating configurations
pub struct ConfigManager {
    config: BlogForgeConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Load configuration from a specific workspace
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        let config_path = workspace.join(paths::CONFIG_FILE_NAME);
        if config_path.exists() {
            return Self::load_from_file(&config_path);
        }

        let fallback_path = workspace
            .join(paths::CONFIG_DIR_NAME)
            .join(paths::CONFIG_FILE_NAME);
        if fallback_path.exists() {
            return Self::load_from_file(&fallback_path);
        }

        Ok(Self {
            config: BlogForgeConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: BlogForgeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &BlogForgeConfig {
        &self.config
    }

    /// Consume the manager, keeping only the configuration
    pub fn into_config(self) -> BlogForgeConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::load_from_workspace(temp_dir.path()).unwrap();

        assert!(manager.config_path().is_none());
        let config = manager.config();
        assert_eq!(config.provider.name, "deepseek");
        assert_eq!(config.provider.default_model, "deepseek-chat");
        assert_eq!(config.provider.api_key_env, "DEEPSEEK_API_KEY");
        assert_eq!(config.pipeline.outline_temperature, 0.7);
        assert_eq!(config.pipeline.draft_temperature, 0.8);
        assert_eq!(config.pipeline.enhancement_temperature, 0.6);
        assert_eq!(config.pipeline.summary_temperature, 0.5);
        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("blogforge.toml"),
            r#"
[provider]
request_timeout_seconds = 30

[pipeline]
draft_temperature = 1.1
"#,
        )
        .unwrap();

        let manager = ConfigManager::load_from_workspace(temp_dir.path()).unwrap();
        let config = manager.config();
        assert!(manager.config_path().is_some());
        assert_eq!(config.provider.request_timeout_seconds, 30);
        assert_eq!(config.pipeline.draft_temperature, 1.1);
        assert_eq!(config.pipeline.outline_temperature, 0.7);
        assert_eq!(config.provider.base_url, "https://api.deepseek.com/v1");
    }

    #[test]
    fn test_fallback_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(".blogforge");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("blogforge.toml"),
            "[server]\nbind_address = \"0.0.0.0:8080\"\n",
        )
        .unwrap();

        let config = ConfigManager::load_from_workspace(temp_dir.path())
            .unwrap()
            .into_config();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blogforge.toml");
        fs::write(&path, "[pipeline]\nsummary_temperature = 3.5\n").unwrap();

        let err = ConfigManager::load_from_file(&path).err().unwrap();
        assert!(format!("{err:#}").contains("summary_temperature"));
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let config = BlogForgeConfig {
            provider: ProviderConfig {
                name: "mystery".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let provider = ProviderConfig {
            request_timeout_seconds: 0,
            ..Default::default()
        };
        assert!(provider.request_timeout().is_none());
        assert_eq!(
            ProviderConfig::default().request_timeout(),
            Some(std::time::Duration::from_secs(120))
        );
    }
}
