//! Video game request bodies, accepted as JSON or as a multipart form.
//!
//! Both adapters produce the same request type. Multipart text fields are
//! collected into a JSON object first so the same serde rules apply, and an
//! optional `coverFile` part carries the cover image.

use std::path::Path;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

const COVER_FILE_FIELD: &str = "coverFile";

/// An uploaded cover image.
pub struct CoverUpload {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// A parsed request plus the optional cover upload.
pub struct GameForm<T> {
    pub request: T,
    pub cover_file: Option<CoverUpload>,
}

impl<T> FromRequest<AppState> for GameForm<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if !is_multipart {
            let Json(request) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            return Ok(Self {
                request,
                cover_file: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let mut fields = Map::new();
        let mut categories = Vec::new();
        let mut cover_file = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                COVER_FILE_FIELD => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    if !bytes.is_empty() {
                        cover_file = Some(CoverUpload { file_name, bytes });
                    }
                }
                "categories" | "categories[]" => {
                    let text = field.text().await.map_err(multipart_error)?;
                    categories.extend(
                        text.split(',')
                            .map(str::trim)
                            .filter(|part| !part.is_empty())
                            .map(|part| Value::String(part.to_string())),
                    );
                }
                _ => {
                    let text = field.text().await.map_err(multipart_error)?;
                    fields.insert(name, Value::String(text));
                }
            }
        }
        if !categories.is_empty() {
            fields.insert("categories".to_string(), Value::Array(categories));
        }

        let request = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ApiError::BadRequest(format!("Invalid form data: {e}")))?;

        Ok(Self {
            request,
            cover_file,
        })
    }
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
}

/// Writes an upload under `dir` with a generated name and returns that name.
pub async fn store_cover(dir: &Path, upload: CoverUpload) -> Result<String, ApiError> {
    let name = format!("{}.{}", Uuid::new_v4(), cover_extension(upload.file_name.as_deref()));

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create cover directory: {e}")))?;
    tokio::fs::write(dir.join(&name), &upload.bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store cover image: {e}")))?;

    tracing::debug!(file = %name, size = upload.bytes.len(), "Cover image stored");
    Ok(name)
}

/// Lowercased alphanumeric extension of the client file name, `bin` otherwise.
fn cover_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_extension() {
        assert_eq!(cover_extension(Some("Cover.PNG")), "png");
        assert_eq!(cover_extension(Some("archive.tar.gz")), "gz");
        assert_eq!(cover_extension(Some("noext")), "bin");
        assert_eq!(cover_extension(Some("evil.p/hp")), "bin");
        assert_eq!(cover_extension(None), "bin");
    }

    #[tokio::test]
    async fn test_store_cover_writes_file() {
        let dir = std::env::temp_dir().join(format!("gamecatalog-cover-test-{}", Uuid::new_v4()));
        let upload = CoverUpload {
            file_name: Some("box.jpg".to_string()),
            bytes: Bytes::from_static(b"jpeg-bytes"),
        };

        let name = store_cover(&dir, upload).await.unwrap();

        assert!(name.ends_with(".jpg"));
        let written = tokio::fs::read(dir.join(&name)).await.unwrap();
        assert_eq!(written, b"jpeg-bytes");
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
