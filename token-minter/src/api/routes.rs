//! API route definitions

use super::{handlers::*, ApiState};
use axum::{
    routing::{get, post},
    Router,
};

/// Create minting routes
pub fn create_mint_routes() -> Router<ApiState> {
    Router::new().route("/mint", post(mint_token))
}

/// Create wallet holdings routes
pub fn create_holdings_routes() -> Router<ApiState> {
    Router::new().route("/owned-tokens", get(owned_tokens))
}
