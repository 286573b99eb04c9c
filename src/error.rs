use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("No pending checkout or cancellation to complete")]
    NothingPending,
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
