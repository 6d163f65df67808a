//! Mint transaction assembly
//!
//! Builds the ordered instruction list for a new token and wraps it in a
//! transaction paid for by the user. Only the freshly generated mint keypair
//! signs here; the user's wallet adds its signature client-side.

use solana_sdk::{
    instruction::Instruction,
    message::Message,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::Transaction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};
use spl_token::{instruction as token_instruction, state::Mint};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::MinterConfig;
use crate::core::{ChainPort, MintParams, MintTransaction, MinterError, MinterResult};
use crate::metadata::{create_metadata_instruction, token_data};

/// Tokens are minted in whole units only
pub const MINT_DECIMALS: u8 = 0;

/// Fixed service fee charged to the user
#[derive(Debug, Clone, PartialEq)]
pub struct FeeCharge {
    pub wallet: Pubkey,
    pub lamports: u64,
}

/// Which optional instructions go into a mint transaction
#[derive(Debug, Clone, Default)]
pub struct AssemblerSettings {
    pub fee: Option<FeeCharge>,
    /// `Some(is_mutable)` attaches an on-chain metadata record
    pub metadata: Option<bool>,
}

impl AssemblerSettings {
    pub fn from_config(config: &MinterConfig) -> MinterResult<Self> {
        let fee = if config.fee.enabled {
            let wallet = config
                .fee_wallet()
                .map_err(|e| MinterError::Configuration(e.to_string()))?;
            Some(FeeCharge {
                wallet,
                lamports: config.fee.lamports,
            })
        } else {
            None
        };

        let metadata = config.metadata.enabled.then_some(config.metadata.is_mutable);

        Ok(Self { fee, metadata })
    }
}

/// Ordered instructions creating `mint` and minting `params.amount` to the user.
///
/// fee transfer, create account, initialize mint, create associated account,
/// mint to, then the metadata record. Later instructions reference accounts
/// created by earlier ones.
pub fn mint_instructions(
    mint: &Pubkey,
    params: &MintParams,
    rent_lamports: u64,
    metadata_uri: &str,
    settings: &AssemblerSettings,
) -> MinterResult<Vec<Instruction>> {
    let user = &params.user;
    let token_account = get_associated_token_address(user, mint);
    let mut instructions = Vec::with_capacity(6);

    if let Some(fee) = &settings.fee {
        instructions.push(system_instruction::transfer(user, &fee.wallet, fee.lamports));
    }

    instructions.push(system_instruction::create_account(
        user,
        mint,
        rent_lamports,
        Mint::LEN as u64,
        &spl_token::id(),
    ));

    instructions.push(token_instruction::initialize_mint(
        &spl_token::id(),
        mint,
        user,
        Some(user),
        MINT_DECIMALS,
    )?);

    instructions.push(create_associated_token_account(
        user,
        user,
        mint,
        &spl_token::id(),
    ));

    instructions.push(token_instruction::mint_to(
        &spl_token::id(),
        mint,
        &token_account,
        user,
        &[],
        params.amount,
    )?);

    if let Some(is_mutable) = settings.metadata {
        instructions.push(create_metadata_instruction(
            mint,
            user,
            token_data(&params.name, &params.symbol, metadata_uri),
            is_mutable,
        ));
    }

    Ok(instructions)
}

/// Assembles partially-signed mint transactions against a chain
pub struct TransactionAssembler {
    chain: Arc<dyn ChainPort>,
    settings: AssemblerSettings,
}

impl TransactionAssembler {
    pub fn new(chain: Arc<dyn ChainPort>, settings: AssemblerSettings) -> Self {
        Self { chain, settings }
    }

    /// Build a transaction creating a brand new mint owned by `params.user`
    pub async fn build_mint_transaction(
        &self,
        params: &MintParams,
        metadata_uri: &str,
    ) -> MinterResult<MintTransaction> {
        let mint = Keypair::new();
        let mint_pubkey = mint.pubkey();

        let rent_lamports = self
            .chain
            .minimum_balance_for_rent_exemption(Mint::LEN)
            .await?;

        let instructions =
            mint_instructions(&mint_pubkey, params, rent_lamports, metadata_uri, &self.settings)?;

        let recent_blockhash = self.chain.latest_blockhash().await?;
        let message = Message::new_with_blockhash(&instructions, Some(&params.user), &recent_blockhash);
        let mut transaction = Transaction::new_unsigned(message);

        // User signature slot stays empty until the wallet signs
        transaction.try_partial_sign(&[&mint], recent_blockhash)?;

        debug!(
            "Assembled {} instructions, blockhash {}",
            instructions.len(),
            recent_blockhash
        );
        info!("Built mint transaction for {} (mint {})", params.user, mint_pubkey);

        Ok(MintTransaction {
            transaction,
            mint: mint_pubkey,
            metadata_uri: metadata_uri.to_string(),
        })
    }
}
