use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::log;
use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, caches it, and writes changes back through the provider.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer)
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            log!("No stored config found, using defaults");
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config.validate().map_err(ConfigError::Validation)?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Validation)?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Difficulty, MarkChoice, MatchSettings, ModeSetting};

    type SettingsManager = ConfigManager<FileContentConfigProvider, MatchSettings>;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SettingsManager::from_yaml_file(dir.path().join("settings.yaml"));

        assert_eq!(manager.get_config().unwrap(), MatchSettings::default());
    }

    #[test]
    fn test_saved_settings_load_in_new_manager() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        let settings = MatchSettings {
            mode: ModeSetting::SinglePlayer,
            difficulty: Difficulty::Hard,
            human_mark: MarkChoice::Random,
            bot_delay_ms: 250,
        };

        SettingsManager::from_yaml_file(&path)
            .set_config(&settings)
            .unwrap();
        let loaded = SettingsManager::from_yaml_file(&path).get_config().unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_settings_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        let manager = SettingsManager::from_yaml_file(&path);
        let settings = MatchSettings {
            bot_delay_ms: 60_000,
            ..MatchSettings::default()
        };

        let result = manager.set_config(&settings);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_file_content_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "difficulty: impossible\n").unwrap();

        let result = SettingsManager::from_yaml_file(&path).get_config();

        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_out_of_range_file_content_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "bot_delay_ms: 9000\n").unwrap();

        let result = SettingsManager::from_yaml_file(&path).get_config();

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
