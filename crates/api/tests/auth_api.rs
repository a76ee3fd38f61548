//! HTTP-level integration tests for Google sign-in, sessions, RBAC and
//! admin preferences.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_user_with_token, get, get_auth, put_json_auth, user_token,
};
use flamingo_api::auth::google::{IdentityProfile, IdentityProvider, OAuthError};
use flamingo_api::error::AppError;
use flamingo_api::handlers::auth::resolve_sign_in;
use flamingo_core::error::CoreError;
use flamingo_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Identity provider that accepts the code `good` for a fixed profile.
struct FakeGoogle {
    email: &'static str,
}

#[async_trait]
impl IdentityProvider for FakeGoogle {
    fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        Ok(format!("https://accounts.test/auth?client_id=test&state={state}"))
    }

    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, OAuthError> {
        if code != "good" {
            return Err(OAuthError::UnverifiedEmail);
        }
        Ok(IdentityProfile {
            email: self.email.to_string(),
            name: Some("Owner".to_string()),
            image: Some("https://images.test/owner.png".to_string()),
        })
    }
}

fn profile(email: &str) -> IdentityProfile {
    IdentityProfile {
        email: email.to_string(),
        name: Some("Someone".to_string()),
        image: None,
    }
}

fn app_with_google(pool: PgPool, email: &'static str) -> axum::Router {
    let mut state = common::test_state(pool);
    state.identity = Some(Arc::new(FakeGoogle { email }));
    common::build_app_with(state)
}

/// Follow the sign-in redirect and return the signed `state` it carries.
async fn start_sign_in(app: axum::Router) -> String {
    let response = get(app, "/api/auth/google").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap().to_string();
    assert!(location.starts_with("https://accounts.test/auth"));
    location
        .split("state=")
        .nth(1)
        .expect("redirect must carry a state")
        .to_string()
}

// ---------------------------------------------------------------------------
// OAuth flow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_allowlisted_sign_in_issues_session(pool: PgPool) {
    UserRepo::upsert_admin(&pool, "owner@flamingo.test", None)
        .await
        .unwrap();
    let app = app_with_google(pool, "Owner@Flamingo.test");

    let state = start_sign_in(app.clone()).await;
    let response = get(
        app.clone(),
        &format!("/api/auth/google/callback?code=good&state={state}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["email"], "owner@flamingo.test");
    assert_eq!(json["data"]["user"]["isAdmin"], true);
    assert_eq!(json["data"]["expiresIn"], 30 * 24 * 60 * 60);
    let token = json["data"]["token"].as_str().unwrap().to_string();

    let response = get_auth(app, "/api/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "owner@flamingo.test");
    assert_eq!(json["data"]["isAdmin"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_callback_rejects_bad_state_and_failed_exchange(pool: PgPool) {
    UserRepo::upsert_admin(&pool, "owner@flamingo.test", None)
        .await
        .unwrap();
    let app = app_with_google(pool, "owner@flamingo.test");

    let response = get(app.clone(), "/api/auth/google/callback?code=good&state=forged").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let state = start_sign_in(app.clone()).await;
    let response = get(
        app.clone(),
        &format!("/api/auth/google/callback?code=bad&state={state}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Google sign-in failed");

    let response = get(app, "/api/auth/google/callback?error=access_denied").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_in_unavailable_without_google(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/auth/google").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Google sign-in is not configured");
}

// ---------------------------------------------------------------------------
// Sign-in resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_sign_in_rules(pool: PgPool) {
    // Unknown and not allowlisted: recorded, but refused.
    let result = resolve_sign_in(&pool, &profile("stranger@example.com")).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Forbidden(_))));
    let stranger = UserRepo::find_by_email(&pool, "stranger@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!stranger.is_admin);

    // Existing non-admin stays refused even after being allowlisted later.
    UserRepo::upsert_admin(&pool, "stranger@example.com", None)
        .await
        .unwrap();
    let result = resolve_sign_in(&pool, &profile("stranger@example.com")).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Forbidden(_))));

    // Existing admin: profile refreshed.
    let (admin, _) = create_user_with_token(&pool, "chef@flamingo.test", true).await;
    let user = resolve_sign_in(&pool, &profile("  CHEF@flamingo.test ")).await.unwrap();
    assert_eq!(user.id, admin.id);
    assert_eq!(user.name.as_deref(), Some("Someone"));
}

// ---------------------------------------------------------------------------
// Session and RBAC
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_requires_valid_token(pool: PgPool) {
    let guest = user_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/auth/session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.clone(), "/api/auth/session", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Any signed-in user has a session; admin routes still refuse them.
    let response = get_auth(app.clone(), "/api/auth/session", &guest).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["isAdmin"], false);

    let response = get_auth(app, "/api/admin/preferences/sidebar", &guest).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sidebar_preference_round_trip(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/admin/preferences/sidebar", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["collapsed"], false);

    let response = put_json_auth(
        app.clone(),
        "/api/admin/preferences/sidebar",
        json!({ "collapsed": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["collapsed"], true);

    let response = get_auth(app, "/api/admin/preferences/sidebar", &token).await;
    assert_eq!(body_json(response).await["data"]["collapsed"], true);
}
