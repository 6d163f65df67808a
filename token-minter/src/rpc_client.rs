//! Solana RPC adapter
//!
//! Thin wrapper over the nonblocking `RpcClient` exposing only the calls the
//! minter needs: rent exemption, latest blockhash and parsed token accounts.

use async_trait::async_trait;
use serde_json::Value;
use solana_account_decoder::UiAccountData;
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_request::TokenAccountsFilter,
};
use solana_sdk::{commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::{ChainPort, MinterResult, TokenAccountHolding};

/// RPC-backed implementation of [`ChainPort`]
pub struct SolanaRpc {
    rpc: Arc<RpcClient>,
}

impl SolanaRpc {
    pub fn new(url: String, commitment: CommitmentConfig, timeout: Duration) -> Self {
        let rpc = RpcClient::new_with_timeout_and_commitment(url, timeout, commitment);
        Self { rpc: Arc::new(rpc) }
    }

    /// Get the RPC endpoint URL
    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

#[async_trait]
impl ChainPort for SolanaRpc {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> MinterResult<u64> {
        let lamports = self
            .rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?;
        debug!("Rent exemption for {} bytes: {} lamports", data_len, lamports);
        Ok(lamports)
    }

    async fn latest_blockhash(&self) -> MinterResult<Hash> {
        Ok(self.rpc.get_latest_blockhash().await?)
    }

    async fn token_accounts_by_owner(&self, owner: &Pubkey) -> MinterResult<Vec<TokenAccountHolding>> {
        let accounts = self
            .rpc
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::ProgramId(spl_token::id()))
            .await?;

        let mut holdings = Vec::with_capacity(accounts.len());
        for keyed in accounts {
            match &keyed.account.data {
                UiAccountData::Json(parsed) => {
                    if let Some(holding) = parse_token_account(&keyed.pubkey, &parsed.parsed) {
                        holdings.push(holding);
                    }
                }
                _ => warn!("Token account {} was not returned as jsonParsed", keyed.pubkey),
            }
        }

        Ok(holdings)
    }
}

/// Extract mint and display balance from a `jsonParsed` token account
pub fn parse_token_account(address: &str, parsed: &Value) -> Option<TokenAccountHolding> {
    let info = parsed.get("info")?;
    let mint = info.get("mint")?.as_str()?;
    let ui_amount = info
        .get("tokenAmount")
        .and_then(|amount| amount.get("uiAmount"))
        .and_then(Value::as_f64);

    Some(TokenAccountHolding {
        address: address.to_string(),
        mint: mint.to_string(),
        ui_amount,
    })
}
