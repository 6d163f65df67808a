//! Token Minter
//!
//! Pins token artwork and metadata to IPFS and assembles partially-signed
//! SPL token mint transactions for a browser wallet to countersign.

pub mod api;
pub mod config;
pub mod core;
pub mod holdings;
pub mod metadata;
pub mod pinning;
pub mod rpc_client;
pub mod services;
pub mod transaction;

// Re-export commonly used types
pub use config::MinterConfig;
pub use core::{ChainPort, MinterError, MinterResult, PinningPort};
pub use services::MintService;
