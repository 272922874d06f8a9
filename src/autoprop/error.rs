use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoPropError {
    #[error("Cannot set {name} to null")]
    InvalidAssignment { name: String },

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Attribute is not readable: {0}")]
    NotReadable(String),

    #[error("Attribute is not writable: {0}")]
    NotWritable(String),

    #[error("Attribute name cannot be empty")]
    EmptyAttributeName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AutoPropError>;
