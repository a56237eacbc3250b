use super::{bank::BankConfig, search::SearchConfig, traits::validate_section};
use crate::error::BreedError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `BREEDTREE_SEARCH__ITERATIONS=500`
pub const ENV_PREFIX: &str = "BREEDTREE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub bank: BankConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), BreedError> {
        validate_section(&self.search)?;
        validate_section(&self.bank)?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BreedError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BreedError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| BreedError::Configuration(format!("Failed to parse config: {}", e)))?;

        self.replace(config)
    }

    /// Optional TOML file overlaid with `BREEDTREE_*` environment variables
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), BreedError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| BreedError::Configuration(format!("Failed to load config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| BreedError::Configuration(format!("Failed to parse config: {}", e)))?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BreedError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| BreedError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| BreedError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `f` to a copy and keeps it only if the result validates
    pub fn update<F>(&self, f: F) -> Result<(), BreedError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), BreedError> {
        config.validate()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that read or write BREEDTREE_* variables hold this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("breedtree_{}_{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.iterations, 100);
        assert_eq!(config.search.keep, 20);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("round_trip");
        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.search.iterations = 250;
                c.search.seed = Some(7);
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        assert_eq!(loaded.get(), manager.get());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let path = temp_path("partial");
        std::fs::write(&path, "[search]\nkeep = 5\n").unwrap();

        let manager = ConfigManager::new();
        manager.load_layered(Some(&path)).unwrap();
        let config = manager.get();
        assert_eq!(config.search.keep, 5);
        assert_eq!(config.search.iterations, 100);
        assert_eq!(config.bank, BankConfig::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_update_is_rejected() {
        let manager = ConfigManager::new();
        let err = manager.update(|c| c.search.keep = 0).unwrap_err();
        assert!(matches!(err, BreedError::Configuration(_)));
        assert_eq!(manager.get().search.keep, 20);
    }

    #[test]
    fn test_validation_error_names_section() {
        let mut config = AppConfig::default();
        config.search.iterations = 0;
        match config.validate() {
            Err(BreedError::Configuration(msg)) => assert!(msg.starts_with("[search]"), "{}", msg),
            other => panic!("expected configuration error, got {:?}", other),
        }

        let mut config = AppConfig::default();
        config.bank.path = std::path::PathBuf::new();
        match config.validate() {
            Err(BreedError::Configuration(msg)) => assert!(msg.starts_with("[bank]"), "{}", msg),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let path = temp_path("env_overlay");
        std::fs::write(&path, "[search]
keep = 5
iterations = 40
").unwrap();
        std::env::set_var("BREEDTREE_SEARCH__ITERATIONS", "250");
        std::env::set_var("BREEDTREE_SEARCH__PARALLEL", "true");

        let manager = ConfigManager::new();
        let result = manager.load_layered(Some(&path));

        std::env::remove_var("BREEDTREE_SEARCH__ITERATIONS");
        std::env::remove_var("BREEDTREE_SEARCH__PARALLEL");
        let _ = std::fs::remove_file(&path);

        result.unwrap();
        let config = manager.get();
        assert_eq!(config.search.iterations, 250);
        assert!(config.search.parallel);
        assert_eq!(config.search.keep, 5);
    }

    #[test]
    fn test_environment_only_without_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        std::env::set_var("BREEDTREE_SEARCH__SEED", "99");

        let manager = ConfigManager::new();
        let result = manager.load_layered::<&str>(None);
        std::env::remove_var("BREEDTREE_SEARCH__SEED");

        result.unwrap();
        let config = manager.get();
        assert_eq!(config.search.seed, Some(99));
        assert_eq!(config.search.iterations, 100);
    }
}
