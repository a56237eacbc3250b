use super::traits::ConfigSection;
use crate::error::BreedError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the storage collaborator keeps the bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    pub path: PathBuf,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("poke_bank.json"),
        }
    }
}

impl ConfigSection for BankConfig {
    fn section_name() -> &'static str {
        "bank"
    }

    fn validate(&self) -> Result<(), BreedError> {
        if self.path.as_os_str().is_empty() {
            return Err(BreedError::Configuration("Bank path must not be empty".to_string()));
        }
        Ok(())
    }
}
