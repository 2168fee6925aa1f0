use thiserror::Error;

#[derive(Error, Debug)]
pub enum KbError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Corrupt post {id}: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Corrupt post {file}: stored id is {stored}")]
    CorruptId { file: String, stored: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not generate an identifier: {0}")]
    IdGeneration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl KbError {
    /// True for both flavours of unreadable stored record.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, KbError::Corrupt { .. } | KbError::CorruptId { .. })
    }
}

pub type Result<T> = std::result::Result<T, KbError>;
