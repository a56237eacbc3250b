use crate::error::BreedError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), BreedError>;
}

/// Validates a section, prefixing configuration errors with its name
pub fn validate_section<S: ConfigSection>(section: &S) -> Result<(), BreedError> {
    section.validate().map_err(|e| match e {
        BreedError::Configuration(msg) => {
            BreedError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}
