//! Handlers for the `/auth` resource (Google sign-in and session lookup).

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use flamingo_core::error::CoreError;
use flamingo_core::types::DbId;
use flamingo_db::models::user::{normalize_email, CreateUser, User};
use flamingo_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::google::{IdentityProfile, IdentityProvider};
use crate::auth::jwt::{generate_oauth_state, generate_session_token, validate_oauth_state};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const NOT_AUTHORIZED: &str = "You are not authorized to perform this action.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string Google appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// The current session as seen by the admin UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user_id: DbId,
    pub email: String,
    pub is_admin: bool,
}

/// Successful sign-in: a bearer token plus the signed-in user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn identity_provider(state: &AppState) -> AppResult<&dyn IdentityProvider> {
    state
        .identity
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Google sign-in is not configured".into()))
}

/// Resolve the local user for a verified Google profile.
///
/// Existing admins are let in and their profile refreshed. Existing
/// non-admins are refused. Unknown emails are recorded, as admins only when
/// the email is on the allowlist; everyone else is refused.
pub async fn resolve_sign_in(pool: &PgPool, profile: &IdentityProfile) -> AppResult<User> {
    let email = normalize_email(&profile.email);

    let user = match UserRepo::find_by_email(pool, &email).await? {
        Some(user) if user.is_admin => UserRepo::update_profile(
            pool,
            user.id,
            profile.name.as_deref(),
            profile.image.as_deref(),
        )
        .await?
        .unwrap_or(user),
        Some(_) => {
            tracing::warn!(email = %email, "Blocked non-admin sign-in attempt");
            return Err(AppError::Core(CoreError::Forbidden(NOT_AUTHORIZED.into())));
        }
        None => {
            let is_admin = UserRepo::is_allowlisted(pool, &email).await?;
            let user = UserRepo::create(
                pool,
                &CreateUser {
                    email: email.clone(),
                    name: profile.name.clone(),
                    image: profile.image.clone(),
                    is_admin,
                },
            )
            .await?;
            tracing::info!(user_id = user.id, is_admin, "User created on first sign-in");
            if !is_admin {
                return Err(AppError::Core(CoreError::Forbidden(NOT_AUTHORIZED.into())));
            }
            user
        }
    };

    Ok(user)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/auth/google
///
/// Redirect to Google's consent page with a signed `state`.
pub async fn google_sign_in(State(state): State<AppState>) -> AppResult<Redirect> {
    let provider = identity_provider(&state)?;
    let oauth_state = generate_oauth_state(&state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("State token generation failed: {e}")))?;
    let url = provider
        .authorize_url(&oauth_state)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok(Redirect::to(&url))
}

/// GET /api/auth/google/callback?code=&state=
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<Json<DataResponse<SignInResponse>>> {
    if let Some(error) = params.error {
        return Err(AppError::Core(CoreError::Unauthorized(format!(
            "Google sign-in was cancelled: {error}"
        ))));
    }

    let provider = identity_provider(&state)?;
    let oauth_state = params.state.as_deref().unwrap_or_default();
    validate_oauth_state(oauth_state, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired sign-in state".into()))
    })?;
    let code = params
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".into()))?;

    let profile = provider.exchange_code(code).await.map_err(|e| {
        tracing::warn!(error = %e, "Google code exchange failed");
        AppError::Core(CoreError::Unauthorized("Google sign-in failed".into()))
    })?;

    let user = resolve_sign_in(&state.pool, &profile).await?;
    let token = generate_session_token(user.id, &user.email, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "Admin signed in");

    Ok(Json(DataResponse {
        data: SignInResponse {
            token,
            expires_in: state.config.jwt.session_expiry_secs(),
            user,
        },
    }))
}

/// GET /api/auth/session
pub async fn get_session(user: AuthUser) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse {
        data: SessionInfo {
            user_id: user.user_id,
            email: user.email,
            is_admin: user.is_admin,
        },
    })
}
