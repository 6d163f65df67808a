//! Pinata pinning gateway client

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::PinningConfig;
use crate::core::{MinterError, MinterResult, PinningPort, TokenMetadataDocument};

const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

/// Body returned by both pinning endpoints
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pin_size: u64,
}

/// HTTP client for the Pinata pinning API
pub struct PinataClient {
    http: reqwest::Client,
    api_url: String,
    gateway_url: String,
    api_key: String,
    secret_api_key: String,
}

impl PinataClient {
    pub fn new(config: &PinningConfig, timeout: Duration) -> MinterResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            gateway_url: config.gateway_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            secret_api_key: config.secret_api_key.clone(),
        })
    }

    /// Public URL for a content hash
    pub fn gateway_url_for(&self, ipfs_hash: &str) -> String {
        format!("{}/{}", self.gateway_url, ipfs_hash)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> MinterResult<PinResponse> {
        let response = request
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MinterError::Pinning(format!("{}: {}", status, body)));
        }

        let pinned: PinResponse = response.json().await?;
        debug!("Pinned {} ({} bytes)", pinned.ipfs_hash, pinned.pin_size);
        Ok(pinned)
    }
}

#[async_trait]
impl PinningPort for PinataClient {
    async fn pin_file(&self, path: &Path, file_name: &str) -> MinterResult<String> {
        let content = tokio::fs::read(path).await?;
        let form = Form::new().part("file", Part::bytes(content).file_name(file_name.to_string()));

        let request = self
            .http
            .post(format!("{}{}", self.api_url, PIN_FILE_PATH))
            .multipart(form);
        let pinned = self.send(request).await?;

        remove_local_file(path).await;

        let url = self.gateway_url_for(&pinned.ipfs_hash);
        info!("Pinned file {} at {}", file_name, url);
        Ok(url)
    }

    async fn pin_json(&self, document: &TokenMetadataDocument) -> MinterResult<String> {
        let request = self
            .http
            .post(format!("{}{}", self.api_url, PIN_JSON_PATH))
            .json(document);
        let pinned = self.send(request).await?;

        let url = self.gateway_url_for(&pinned.ipfs_hash);
        info!("Pinned metadata for {} at {}", document.name, url);
        Ok(url)
    }
}

/// Best-effort removal of a spooled upload
pub async fn remove_local_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed local upload {}", path.display()),
        Err(e) => warn!("Failed to remove local upload {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Multipart, State},
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// What the stub gateway saw for one request
    #[derive(Debug, Clone)]
    struct SeenRequest {
        api_key: Option<String>,
        secret_api_key: Option<String>,
        parts: Vec<(String, Option<String>)>,
        json: Option<Value>,
    }

    #[derive(Clone)]
    struct StubGateway {
        status: StatusCode,
        seen: Arc<Mutex<Vec<SeenRequest>>>,
    }

    impl StubGateway {
        fn record(&self, headers: &HeaderMap, parts: Vec<(String, Option<String>)>, json: Option<Value>) {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            self.seen.lock().unwrap().push(SeenRequest {
                api_key: header("pinata_api_key"),
                secret_api_key: header("pinata_secret_api_key"),
                parts,
                json,
            });
        }

        fn reply(&self, hash: &str) -> (StatusCode, Json<Value>) {
            if self.status.is_success() {
                (self.status, Json(json!({ "IpfsHash": hash, "PinSize": 3 })))
            } else {
                (self.status, Json(json!({ "error": "Invalid API key" })))
            }
        }
    }

    async fn stub_pin_file(
        State(stub): State<StubGateway>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> (StatusCode, Json<Value>) {
        let mut parts = Vec::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            parts.push((
                field.name().unwrap_or_default().to_string(),
                field.file_name().map(str::to_string),
            ));
        }
        stub.record(&headers, parts, None);
        stub.reply("QmFile")
    }

    async fn stub_pin_json(
        State(stub): State<StubGateway>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        stub.record(&headers, Vec::new(), Some(body));
        stub.reply("QmMetadata")
    }

    /// Serve a fake pinning API on an ephemeral port
    async fn spawn_gateway(status: StatusCode) -> (String, StubGateway) {
        let stub = StubGateway {
            status,
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route(PIN_FILE_PATH, post(stub_pin_file))
            .route(PIN_JSON_PATH, post(stub_pin_json))
            .with_state(stub.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), stub)
    }

    fn client() -> PinataClient {
        client_for("https://api.pinata.cloud/")
    }

    fn client_for(api_url: &str) -> PinataClient {
        let config = PinningConfig {
            api_url: api_url.to_string(),
            gateway_url: "https://gateway.pinata.cloud/ipfs/".to_string(),
            api_key: "key".to_string(),
            secret_api_key: "secret".to_string(),
        };
        PinataClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_gateway_url() {
        let client = client();
        assert_eq!(
            client.gateway_url_for("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"),
            "https://gateway.pinata.cloud/ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
    }

    #[test]
    fn test_pin_response_parsing() {
        let body = r#"{"IpfsHash":"QmHash","PinSize":1234,"Timestamp":"2024-01-01T00:00:00.000Z"}"#;
        let parsed: PinResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.ipfs_hash, "QmHash");
        assert_eq!(parsed.pin_size, 1234);
    }

    #[tokio::test]
    async fn test_remove_local_file_is_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.png");
        tokio::fs::write(&path, b"png").await.unwrap();

        remove_local_file(&path).await;
        assert!(!path.exists());

        // Second removal only logs
        remove_local_file(&path).await;
    }

    #[tokio::test]
    async fn test_pin_file_sends_credentials_and_removes_upload() {
        let (api_url, stub) = spawn_gateway(StatusCode::OK).await;
        let client = client_for(&api_url);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spooled");
        tokio::fs::write(&path, b"png").await.unwrap();

        let url = client.pin_file(&path, "bread.png").await.unwrap();
        assert_eq!(url, "https://gateway.pinata.cloud/ipfs/QmFile");
        assert!(!path.exists());

        let seen = stub.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].api_key.as_deref(), Some("key"));
        assert_eq!(seen[0].secret_api_key.as_deref(), Some("secret"));
        assert_eq!(
            seen[0].parts,
            vec![("file".to_string(), Some("bread.png".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_pin_file_rejected_keeps_upload() {
        let (api_url, _stub) = spawn_gateway(StatusCode::UNAUTHORIZED).await;
        let client = client_for(&api_url);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spooled");
        tokio::fs::write(&path, b"png").await.unwrap();

        let result = client.pin_file(&path, "bread.png").await;
        match result {
            Err(MinterError::Pinning(message)) => assert!(message.contains("401")),
            other => panic!("expected pinning error, got {:?}", other),
        }
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_pin_json_posts_document() {
        let (api_url, stub) = spawn_gateway(StatusCode::OK).await;
        let client = client_for(&api_url);

        let document = TokenMetadataDocument::new(
            "Bread",
            "BBANG",
            "https://gateway.pinata.cloud/ipfs/QmFile",
            "BBANG Token Minter",
        );
        let url = client.pin_json(&document).await.unwrap();
        assert_eq!(url, "https://gateway.pinata.cloud/ipfs/QmMetadata");

        let seen = stub.seen.lock().unwrap().clone();
        assert_eq!(seen[0].api_key.as_deref(), Some("key"));
        let body = seen[0].json.clone().unwrap();
        assert_eq!(body["name"], "Bread");
        assert_eq!(body["symbol"], "BBANG");
        assert_eq!(body["image"], "https://gateway.pinata.cloud/ipfs/QmFile");
    }
}
