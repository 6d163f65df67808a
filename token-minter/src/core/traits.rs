//! Core trait abstractions (Ports in Hexagonal Architecture)

use async_trait::async_trait;
use solana_sdk::{hash::Hash, pubkey::Pubkey};
use std::path::Path;

use super::error::MinterResult;
use super::types::{TokenAccountHolding, TokenMetadataDocument};

/// Pinning port - content-addressed storage for images and metadata
#[async_trait]
pub trait PinningPort: Send + Sync {
    /// Pin a local file and return its public gateway URL.
    ///
    /// The local file is removed once the gateway has accepted it.
    async fn pin_file(&self, path: &Path, file_name: &str) -> MinterResult<String>;

    /// Pin a metadata document and return its public gateway URL
    async fn pin_json(&self, document: &TokenMetadataDocument) -> MinterResult<String>;
}

/// Chain port - the subset of Solana RPC the minter relies on
#[async_trait]
pub trait ChainPort: Send + Sync {
    /// Lamports needed for an account of `data_len` bytes to be rent exempt
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> MinterResult<u64>;

    async fn latest_blockhash(&self) -> MinterResult<Hash>;

    /// All SPL token accounts owned by `owner`
    async fn token_accounts_by_owner(&self, owner: &Pubkey) -> MinterResult<Vec<TokenAccountHolding>>;
}
