//! Handlers for the `/contact` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use flamingo_core::error::CoreError;
use flamingo_core::types::DbId;
use flamingo_db::models::message::{CreateMessage, Message, UpdateMessage};
use flamingo_db::repositories::MessageRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Message",
        id,
    })
}

/// POST /api/contact
pub async fn create_message(
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;

    let message = MessageRepo::create(&state.pool, &input).await?;

    tracing::info!(message_id = message.id, "Contact message received");

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/contact
pub async fn list_messages(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    let messages = MessageRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/contact/{id}
pub async fn get_message(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Message>>> {
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: message }))
}

/// PATCH /api/contact/{id}
pub async fn update_message(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMessage>,
) -> AppResult<Json<DataResponse<Message>>> {
    let message = MessageRepo::set_read(&state.pool, id, input.read)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(message_id = id, read = input.read, user_id = admin.user_id, "Message updated");

    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/contact/{id}
pub async fn delete_message(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MessageRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(message_id = id, user_id = admin.user_id, "Message deleted");

    Ok(StatusCode::NO_CONTENT)
}
