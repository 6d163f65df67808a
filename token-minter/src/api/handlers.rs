//! API request handlers

use super::{responses::*, upload::read_mint_form, ApiState};
use crate::core::MinterError;
use crate::holdings::list_owned_mints;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    response::Json,
};
use serde::Deserialize;
use tracing::info;

/// Query parameters for the holdings lookup
#[derive(Deserialize)]
pub struct OwnedTokensQuery {
    pub wallet: Option<String>,
}

/// Pin the uploaded image and metadata, then return the mint transaction
pub async fn mint_token(
    State(state): State<ApiState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MintResponse>, MinterError> {
    let multipart = multipart.map_err(|e| MinterError::Validation(e.body_text()))?;
    let request = read_mint_form(multipart, &state.config.api.upload_dir).await?;

    info!("Mint request: name={}, symbol={}, user={}", request.name, request.symbol, request.user);
    let outcome = state.mint_service.mint(request).await?;

    Ok(Json(MintResponse {
        message: "Transaction created. Sign it with your wallet to finish minting.".to_string(),
        tx: outcome.transaction_base64,
        metadata_uri: outcome.metadata_uri,
    }))
}

/// List mints the wallet holds a positive balance of
pub async fn owned_tokens(
    State(state): State<ApiState>,
    Query(query): Query<OwnedTokensQuery>,
) -> Result<Json<Vec<String>>, MinterError> {
    let wallet = query
        .wallet
        .filter(|wallet| !wallet.trim().is_empty())
        .ok_or_else(|| MinterError::Validation("Wallet address is required".to_string()))?;

    let mints = list_owned_mints(state.chain.as_ref(), wallet.trim()).await?;
    Ok(Json(mints))
}
