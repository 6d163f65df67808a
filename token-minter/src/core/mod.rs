//! Core domain abstractions and types
//!
//! Foundational types, port traits and error definitions. Nothing in here
//! talks to the network directly.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use error::{MinterError, MinterResult};
pub use traits::{ChainPort, PinningPort};
pub use types::{
    MintOutcome, MintParams, MintRequest, MintTransaction, TokenAccountHolding,
    TokenMetadataDocument, UploadedImage, ALLOWED_IMAGE_TYPES, MAX_NAME_LENGTH,
    MAX_SYMBOL_LENGTH,
};
