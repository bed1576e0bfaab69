use thiserror::Error;

#[derive(Error, Debug)]
pub enum RekapError {
    #[error("payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
