use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreedError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Individual {0} already has parents")]
    AlreadyParented(String),

    #[error("Incompatible pair: {0}")]
    IncompatiblePair(String),

    #[error("Unknown node handle: {0}")]
    UnknownNode(usize),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BreedError>;
