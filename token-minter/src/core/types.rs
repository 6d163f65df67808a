//! Domain types shared across the minter

use base64::Engine;
use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, transaction::Transaction};
use std::path::PathBuf;

use super::error::MinterResult;

/// Maximum token name length in bytes accepted by the on-chain metadata program
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum token symbol length in bytes accepted by the on-chain metadata program
pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Mime types accepted for the token image
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Image received from the client and spooled to local disk
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Temporary location on disk
    pub path: PathBuf,
    /// Original filename supplied by the browser
    pub file_name: String,
    pub content_type: String,
}

/// A mint request as submitted by the web form
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub name: String,
    pub symbol: String,
    /// Raw amount field; parsed during validation
    pub amount: String,
    /// Wallet address of the end user
    pub user: String,
    pub image: UploadedImage,
}

/// Validated parameters handed to the transaction assembler
#[derive(Debug, Clone)]
pub struct MintParams {
    pub name: String,
    pub symbol: String,
    /// Whole-unit token count, mint uses zero decimals
    pub amount: u64,
    pub user: Pubkey,
}

/// Off-chain metadata document pinned next to the image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadataDocument {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
}

/// Partially-signed mint transaction
#[derive(Debug, Clone)]
pub struct MintTransaction {
    pub transaction: Transaction,
    /// Address of the newly generated mint
    pub mint: Pubkey,
    pub metadata_uri: String,
}

impl MintTransaction {
    /// Wire bytes, with absent signatures encoded as zeroes
    pub fn to_bytes(&self) -> MinterResult<Vec<u8>> {
        Ok(bincode::serialize(&self.transaction)?)
    }

    pub fn to_base64(&self) -> MinterResult<String> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_bytes()?))
    }
}

/// SPL token account owned by a wallet, as reported by the RPC node
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAccountHolding {
    pub address: String,
    pub mint: String,
    /// Display balance; `None` when the node could not compute it
    pub ui_amount: Option<f64>,
}

/// Result of a successful mint request
#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub mint: Pubkey,
    pub transaction_base64: String,
    pub metadata_uri: String,
}
