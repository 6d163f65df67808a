//! Mint request orchestration: validate, pin, assemble

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::config::MinterConfig;
use crate::core::{
    ChainPort, MintOutcome, MintParams, MintRequest, MinterError, MinterResult, PinningPort,
    TokenMetadataDocument, ALLOWED_IMAGE_TYPES, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH,
};
use crate::pinning::remove_local_file;
use crate::transaction::{AssemblerSettings, TransactionAssembler};

pub struct MintService {
    pinning: Arc<dyn PinningPort>,
    assembler: TransactionAssembler,
    service_name: String,
}

impl MintService {
    pub fn new(
        config: &MinterConfig,
        pinning: Arc<dyn PinningPort>,
        chain: Arc<dyn ChainPort>,
    ) -> MinterResult<Self> {
        let settings = AssemblerSettings::from_config(config)?;
        Ok(Self {
            pinning,
            assembler: TransactionAssembler::new(chain, settings),
            service_name: config.metadata.service_name.clone(),
        })
    }

    /// Pin the artwork and metadata, then build the mint transaction.
    ///
    /// The spooled image is gone afterwards whether or not minting succeeded.
    pub async fn mint(&self, request: MintRequest) -> MinterResult<MintOutcome> {
        let image_path = request.image.path.clone();
        let result = self.pin_and_assemble(request).await;

        if result.is_err() && tokio::fs::try_exists(&image_path).await.unwrap_or(false) {
            remove_local_file(&image_path).await;
        }
        result
    }

    async fn pin_and_assemble(&self, request: MintRequest) -> MinterResult<MintOutcome> {
        let params = validate_request(&request)?;

        let image_url = self
            .pinning
            .pin_file(&request.image.path, &request.image.file_name)
            .await?;

        let document =
            TokenMetadataDocument::new(&params.name, &params.symbol, &image_url, &self.service_name);
        let metadata_uri = self.pinning.pin_json(&document).await?;

        let built = self
            .assembler
            .build_mint_transaction(&params, &metadata_uri)
            .await?;

        info!(
            "Prepared mint {} ({} x {}) for {}",
            built.mint, params.amount, params.symbol, params.user
        );

        Ok(MintOutcome {
            mint: built.mint,
            transaction_base64: built.to_base64()?,
            metadata_uri: built.metadata_uri,
        })
    }
}

/// Check request fields before any side effect happens
pub fn validate_request(request: &MintRequest) -> MinterResult<MintParams> {
    if request.name.is_empty()
        || request.symbol.is_empty()
        || request.amount.is_empty()
        || request.user.is_empty()
    {
        return Err(MinterError::Validation("All fields are required".to_string()));
    }

    // Metadata program limits are UTF-8 byte lengths
    if request.name.len() > MAX_NAME_LENGTH || request.symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(MinterError::Validation(format!(
            "Name must be at most {} bytes and symbol at most {}",
            MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH
        )));
    }

    let amount = match request.amount.trim().parse::<u64>() {
        Ok(amount) if amount > 0 => amount,
        _ => {
            return Err(MinterError::Validation(
                "Amount must be a positive whole number".to_string(),
            ))
        }
    };

    check_image_type(&request.image.content_type)?;

    let user = Pubkey::from_str(&request.user).map_err(|e| MinterError::InvalidAddress {
        address: request.user.clone(),
        reason: e.to_string(),
    })?;

    Ok(MintParams {
        name: request.name.clone(),
        symbol: request.symbol.clone(),
        amount,
        user,
    })
}

pub fn check_image_type(content_type: &str) -> MinterResult<()> {
    if ALLOWED_IMAGE_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(MinterError::UnsupportedImageType(content_type.to_string()))
    }
}
