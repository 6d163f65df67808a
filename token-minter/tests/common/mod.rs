//! Shared fixtures for API tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use solana_sdk::{hash::Hash, pubkey::Pubkey};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use token_minter::api::{create_router, ApiState};
use token_minter::config::MinterConfig;
use token_minter::core::{
    ChainPort, MinterError, MinterResult, PinningPort, TokenAccountHolding, TokenMetadataDocument,
};
use token_minter::services::MintService;

pub const IMAGE_URL: &str = "https://gateway.test/ipfs/QmImage";
pub const METADATA_URL: &str = "https://gateway.test/ipfs/QmMetadata";
pub const BOUNDARY: &str = "----tokenminterboundary";

/// Pinning gateway returning fixed URLs
#[derive(Default)]
pub struct MockPinning {
    pub file_calls: AtomicUsize,
    pub json_calls: AtomicUsize,
    pub documents: Mutex<Vec<TokenMetadataDocument>>,
    pub fail: bool,
}

impl MockPinning {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.file_calls.load(Ordering::SeqCst) + self.json_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PinningPort for MockPinning {
    async fn pin_file(&self, path: &Path, _file_name: &str) -> MinterResult<String> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MinterError::Pinning("401 Unauthorized: invalid key".to_string()));
        }
        tokio::fs::remove_file(path).await?;
        Ok(IMAGE_URL.to_string())
    }

    async fn pin_json(&self, document: &TokenMetadataDocument) -> MinterResult<String> {
        self.json_calls.fetch_add(1, Ordering::SeqCst);
        self.documents.lock().unwrap().push(document.clone());
        Ok(METADATA_URL.to_string())
    }
}

/// Chain with canned holdings and a fixed blockhash
pub struct MockChain {
    pub calls: AtomicUsize,
    pub holdings: Vec<TokenAccountHolding>,
    pub blockhash: Hash,
    pub fail: bool,
}

impl MockChain {
    pub fn new(holdings: Vec<TokenAccountHolding>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            holdings,
            blockhash: Hash::new_unique(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> MinterResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MinterError::Rpc("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainPort for MockChain {
    async fn minimum_balance_for_rent_exemption(&self, _data_len: usize) -> MinterResult<u64> {
        self.record()?;
        Ok(1_461_600)
    }

    async fn latest_blockhash(&self) -> MinterResult<Hash> {
        self.record()?;
        Ok(self.blockhash)
    }

    async fn token_accounts_by_owner(&self, _owner: &Pubkey) -> MinterResult<Vec<TokenAccountHolding>> {
        self.record()?;
        Ok(self.holdings.clone())
    }
}

pub struct TestApp {
    pub router: Router,
    pub pinning: Arc<MockPinning>,
    pub chain: Arc<MockChain>,
    pub upload_dir: TempDir,
    pub static_dir: TempDir,
}

impl TestApp {
    pub fn new(pinning: MockPinning, chain: MockChain) -> anyhow::Result<Self> {
        let upload_dir = TempDir::new()?;
        let static_dir = TempDir::new()?;
        std::fs::write(
            static_dir.path().join("index.html"),
            "<!doctype html><title>Token Minter</title>",
        )?;

        let mut config = MinterConfig::default();
        config.pinning.api_key = "key".to_string();
        config.pinning.secret_api_key = "secret".to_string();
        config.api.upload_dir = upload_dir.path().to_path_buf();
        config.api.static_dir = static_dir.path().to_path_buf();
        config.validate()?;

        let pinning = Arc::new(pinning);
        let chain = Arc::new(chain);
        let config = Arc::new(config);
        let mint_service = Arc::new(MintService::new(&config, pinning.clone(), chain.clone())?);
        let router = create_router(ApiState::new(config, mint_service, chain.clone()));

        Ok(Self {
            router,
            pinning,
            chain,
            upload_dir,
            static_dir,
        })
    }

    /// Files still sitting in the upload directory
    pub fn spooled_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn holding(mint: &str, ui_amount: Option<f64>) -> TokenAccountHolding {
    TokenAccountHolding {
        address: Pubkey::new_unique().to_string(),
        mint: mint.to_string(),
        ui_amount,
    }
}

/// Encode a multipart/form-data body
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file_name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
