//! Handlers for `/uploads` (image upload and removal).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use flamingo_cloud::ObjectStorage;
use flamingo_core::error::CoreError;
use flamingo_core::storage::{
    build_object_key, image_content_type, is_allowed_image, UploadFolder, ALLOWED_IMAGE_EXTENSIONS,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `DELETE /uploads`.
#[derive(Debug, Deserialize)]
pub struct DeleteUpload {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteUploadResult {
    pub success: bool,
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {err}"))
}

/// POST /api/uploads
///
/// Multipart form with a `file` part and an optional `folder` (`menu` or
/// `gallery`, default `menu`).
pub async fn upload_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            "folder" => {
                folder = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let (filename, content_type, bytes) = file
        .filter(|(_, _, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("No file provided".into()))?;

    if !is_allowed_image(&filename) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Only image files are allowed ({}).",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        ))));
    }

    let folder = UploadFolder::parse(folder.as_deref()).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Folder must be 'menu' or 'gallery'.".into(),
        ))
    })?;

    let content_type = content_type
        .filter(|ct| ct.starts_with("image/"))
        .unwrap_or_else(|| image_content_type(&filename).to_string());
    let key = build_object_key(folder, &filename, Utc::now().date_naive(), Uuid::new_v4());

    let stored = state.storage.upload(&key, bytes, &content_type).await?;

    tracing::info!(key = %stored.key, folder = folder.as_str(), user_id = admin.user_id, "Image uploaded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

/// DELETE /api/uploads
pub async fn delete_upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<DeleteUpload>,
) -> AppResult<Json<DataResponse<DeleteUploadResult>>> {
    let key = input.key.trim();
    if key.is_empty() {
        return Err(AppError::Core(CoreError::Validation("Key is required.".into())));
    }

    state.storage.delete(key).await?;

    tracing::info!(key, user_id = admin.user_id, "Image deleted");

    Ok(Json(DataResponse {
        data: DeleteUploadResult { success: true },
    }))
}

/// Best-effort removal of a record's stored image after the row is gone.
///
/// URLs outside the bucket (such as bundled placeholders) are skipped.
/// Failures leave an orphaned object and are logged with its key.
pub(crate) async fn remove_stored_image(storage: &dyn ObjectStorage, image_url: Option<&str>) {
    let Some(key) = image_url.and_then(|url| storage.key_for_url(url)) else {
        return;
    };
    if let Err(e) = storage.delete(&key).await {
        tracing::warn!(key = %key, error = %e, "Failed to delete stored image; object orphaned");
    }
}
