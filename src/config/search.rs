use super::traits::ConfigSection;
use crate::error::BreedError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub iterations: usize,
    pub keep: usize,
    pub max_depth: usize,
    pub parallel: bool,
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            keep: 20,
            max_depth: 8,
            parallel: false,
            seed: None,
        }
    }
}

impl ConfigSection for SearchConfig {
    fn section_name() -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<(), BreedError> {
        if self.iterations == 0 {
            return Err(BreedError::Configuration(
                "Iterations must be at least 1".to_string()
            ));
        }
        if self.keep == 0 {
            return Err(BreedError::Configuration(
                "Number of retained trees must be at least 1".to_string()
            ));
        }
        if self.max_depth == 0 {
            return Err(BreedError::Configuration(
                "Max tree depth must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
