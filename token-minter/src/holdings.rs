//! Token holdings lookup

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use tracing::info;

use crate::core::{ChainPort, MinterError, MinterResult, TokenAccountHolding};

/// Mints of every token account `owner` holds a positive balance in.
///
/// Order follows whatever the RPC node returns.
pub async fn list_owned_mints(chain: &dyn ChainPort, owner: &str) -> MinterResult<Vec<String>> {
    let owner_pubkey = Pubkey::from_str(owner).map_err(|e| MinterError::InvalidAddress {
        address: owner.to_string(),
        reason: e.to_string(),
    })?;

    let accounts = chain.token_accounts_by_owner(&owner_pubkey).await?;
    let total = accounts.len();
    let mints = positive_mints(accounts);

    info!(
        "Wallet {} holds {} of {} token accounts with a balance",
        owner,
        mints.len(),
        total
    );
    Ok(mints)
}

fn positive_mints(accounts: Vec<TokenAccountHolding>) -> Vec<String> {
    accounts
        .into_iter()
        .filter(|account| account.ui_amount.map_or(false, |amount| amount > 0.0))
        .map(|account| account.mint)
        .collect()
}
