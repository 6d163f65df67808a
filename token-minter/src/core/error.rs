//! Centralized error types for the token minter

use thiserror::Error;

/// Main minter error type
#[derive(Error, Debug)]
pub enum MinterError {
    /// Rejected request input, reported back to the caller
    #[error("{0}")]
    Validation(String),

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Pinning gateway error: {0}")]
    Pinning(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Instruction error: {0}")]
    Instruction(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MinterError {
    /// Whether the error was caused by the request itself rather than a collaborator
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MinterError::Validation(_) | MinterError::UnsupportedImageType(_)
        )
    }
}

/// Result type alias for minter operations
pub type MinterResult<T> = Result<T, MinterError>;

impl From<solana_client::client_error::ClientError> for MinterError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        MinterError::Rpc(err.to_string())
    }
}

impl From<reqwest::Error> for MinterError {
    fn from(err: reqwest::Error) -> Self {
        MinterError::Pinning(err.to_string())
    }
}

impl From<solana_sdk::program_error::ProgramError> for MinterError {
    fn from(err: solana_sdk::program_error::ProgramError) -> Self {
        MinterError::Instruction(err.to_string())
    }
}

impl From<solana_sdk::signer::SignerError> for MinterError {
    fn from(err: solana_sdk::signer::SignerError) -> Self {
        MinterError::Signing(err.to_string())
    }
}

impl From<bincode::Error> for MinterError {
    fn from(err: bincode::Error) -> Self {
        MinterError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for MinterError {
    fn from(err: serde_json::Error) -> Self {
        MinterError::Serialization(err.to_string())
    }
}
