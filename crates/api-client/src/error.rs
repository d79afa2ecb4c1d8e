use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to execute the HTTP request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The provider returned an error: code {0}, {1}")]
    Provider(i64, String),

    #[error("Failed to deserialize the provider response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from provider: {0}")]
    InvalidData(String),
}
