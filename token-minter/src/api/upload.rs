//! Multipart mint form extraction
//!
//! Text fields are collected as strings and the image is spooled to the
//! upload directory under a random name, so concurrent requests never share
//! a file.

use axum::extract::{multipart::MultipartError, Multipart};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::core::{MintRequest, MinterError, MinterResult, UploadedImage};
use crate::pinning::remove_local_file;
use crate::services::check_image_type;

#[derive(Default)]
struct FormParts {
    name: Option<String>,
    symbol: Option<String>,
    amount: Option<String>,
    user: Option<String>,
    image: Option<UploadedImage>,
}

/// Read the `/mint` form, rejecting non-image uploads before they touch disk
pub async fn read_mint_form(mut multipart: Multipart, upload_dir: &Path) -> MinterResult<MintRequest> {
    let mut parts = FormParts::default();

    if let Err(e) = collect_fields(&mut multipart, upload_dir, &mut parts).await {
        if let Some(image) = &parts.image {
            remove_local_file(&image.path).await;
        }
        return Err(e);
    }

    let image = parts
        .image
        .ok_or_else(|| MinterError::Validation("All fields are required".to_string()))?;

    Ok(MintRequest {
        name: parts.name.unwrap_or_default(),
        symbol: parts.symbol.unwrap_or_default(),
        amount: parts.amount.unwrap_or_default(),
        user: parts.user.unwrap_or_default(),
        image,
    })
}

async fn collect_fields(
    multipart: &mut Multipart,
    upload_dir: &Path,
    parts: &mut FormParts,
) -> MinterResult<()> {
    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "image" => {
                if parts.image.is_some() {
                    return Err(MinterError::Validation("Only one image may be uploaded".to_string()));
                }

                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                check_image_type(&content_type)?;

                let file_name = field.file_name().unwrap_or("image").to_string();
                let bytes = field.bytes().await.map_err(form_error)?;

                let path = upload_dir.join(Uuid::new_v4().to_string());
                tokio::fs::write(&path, &bytes).await?;
                debug!("Spooled {} ({} bytes) to {}", file_name, bytes.len(), path.display());

                parts.image = Some(UploadedImage {
                    path,
                    file_name,
                    content_type,
                });
            }
            "name" => parts.name = Some(field.text().await.map_err(form_error)?),
            "symbol" => parts.symbol = Some(field.text().await.map_err(form_error)?),
            "amount" => parts.amount = Some(field.text().await.map_err(form_error)?),
            "user" => parts.user = Some(field.text().await.map_err(form_error)?),
            other => debug!("Ignoring unexpected form field {}", other),
        }
    }

    Ok(())
}

/// Malformed or oversized multipart bodies are the caller's fault
fn form_error(err: MultipartError) -> MinterError {
    MinterError::Validation(format!("Invalid form data: {}", err.body_text()))
}
