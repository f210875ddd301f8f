use thiserror::Error;

#[derive(Error, Debug)]
pub enum StemError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Lab not found: {0}")]
    LabNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Coach error: {0}")]
    Coach(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl StemError {
    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        StemError::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StemError>;
