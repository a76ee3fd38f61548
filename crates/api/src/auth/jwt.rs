//! HS256 token generation and validation.
//!
//! Three token kinds share the signing secret and are told apart by their
//! claim shapes and a `purpose` field:
//!
//! - [`Claims`]: admin sessions, presented as `Authorization: Bearer`.
//! - [`OAuthStateClaims`]: the short-lived `state` round-tripped through Google.
//! - [`ReservationActionClaims`]: approve/reject links in notification emails.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flamingo_core::reservation::ReservationStatus;
use flamingo_core::types::DbId;

/// Default session lifetime in days.
const DEFAULT_SESSION_EXPIRY_DAYS: i64 = 30;
/// Upper bound for `JWT_EXPIRY_DAYS`; larger values are clamped.
const MAX_SESSION_EXPIRY_DAYS: i64 = 365;
/// Lifetime of the OAuth `state` token.
const OAUTH_STATE_EXPIRY_SECS: i64 = 10 * 60;
/// Lifetime of reservation approve/reject links.
const ACTION_TOKEN_EXPIRY_DAYS: i64 = 7;

const PURPOSE_OAUTH_STATE: &str = "oauth_state";
const PURPOSE_RESERVATION_ACTION: &str = "reservation_action";

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub email: String,
    pub is_admin: bool,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Claims of the OAuth `state` parameter.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OAuthStateClaims {
    pub purpose: String,
    pub nonce: String,
    pub exp: i64,
    pub iat: i64,
}

/// Claims of a reservation approve/reject link.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReservationActionClaims {
    pub purpose: String,
    pub reservation_id: DbId,
    pub action: ReservationStatus,
    pub exp: i64,
    pub iat: i64,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in days (default: 30).
    pub session_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_DAYS` | no       | `30`    |
    ///
    /// `JWT_EXPIRY_DAYS` is clamped to `1..=365`.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let session_expiry_days: i64 = std::env::var("JWT_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            session_expiry_days: clamp_expiry_days(session_expiry_days),
        }
    }

    /// Session lifetime in seconds.
    pub fn session_expiry_secs(&self) -> i64 {
        self.session_expiry_days.saturating_mul(24 * 60 * 60)
    }
}

fn clamp_expiry_days(days: i64) -> i64 {
    days.clamp(1, MAX_SESSION_EXPIRY_DAYS)
}

fn sign<T: Serialize>(claims: &T, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(), // HS256
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

fn verify<T: DeserializeOwned>(token: &str, config: &JwtConfig) -> Result<T, jsonwebtoken::errors::Error> {
    let token_data = decode::<T>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

fn invalid_token() -> jsonwebtoken::errors::Error {
    jsonwebtoken::errors::ErrorKind::InvalidToken.into()
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Generate an HS256 session token for a signed-in user.
pub fn generate_session_token(
    user_id: DbId,
    email: &str,
    is_admin: bool,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        is_admin,
        exp: now + config.session_expiry_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    sign(&claims, config)
}

/// Validate and decode a session token, returning the embedded [`Claims`].
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify(token, config)
}

// ---------------------------------------------------------------------------
// OAuth state
// ---------------------------------------------------------------------------

pub fn generate_oauth_state(config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = OAuthStateClaims {
        purpose: PURPOSE_OAUTH_STATE.to_string(),
        nonce: Uuid::new_v4().to_string(),
        exp: now + OAUTH_STATE_EXPIRY_SECS,
        iat: now,
    };
    sign(&claims, config)
}

pub fn validate_oauth_state(state: &str, config: &JwtConfig) -> Result<(), jsonwebtoken::errors::Error> {
    let claims: OAuthStateClaims = verify(state, config)?;
    if claims.purpose != PURPOSE_OAUTH_STATE {
        return Err(invalid_token());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reservation actions
// ---------------------------------------------------------------------------

/// Sign a link token allowing exactly `action` on one reservation.
pub fn generate_action_token(
    reservation_id: DbId,
    action: ReservationStatus,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = ReservationActionClaims {
        purpose: PURPOSE_RESERVATION_ACTION.to_string(),
        reservation_id,
        action,
        exp: now + ACTION_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        iat: now,
    };
    sign(&claims, config)
}

/// Check that `token` authorizes `action` on `reservation_id`.
pub fn validate_action_token(
    token: &str,
    reservation_id: DbId,
    action: ReservationStatus,
    config: &JwtConfig,
) -> Result<(), jsonwebtoken::errors::Error> {
    let claims: ReservationActionClaims = verify(token, config)?;
    if claims.purpose != PURPOSE_RESERVATION_ACTION
        || claims.reservation_id != reservation_id
        || claims.action != action
    {
        return Err(invalid_token());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_days: 30,
        }
    }

    #[test]
    fn test_generate_and_validate_session_token() {
        let config = test_config();
        let token = generate_session_token(42, "owner@example.com", true, &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "owner@example.com");
        assert!(claims.is_admin);
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expiry_days_are_clamped() {
        assert_eq!(clamp_expiry_days(30), 30);
        assert_eq!(clamp_expiry_days(0), 1);
        assert_eq!(clamp_expiry_days(-5), 1);
        assert_eq!(clamp_expiry_days(i64::MAX), MAX_SESSION_EXPIRY_DAYS);

        let config = JwtConfig {
            secret: "s".to_string(),
            session_expiry_days: i64::MAX,
        };
        assert_eq!(config.session_expiry_secs(), i64::MAX);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            email: "a@example.com".to_string(),
            is_admin: true,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = sign(&claims, &config).expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            session_expiry_days: 30,
        };
        let token = generate_session_token(1, "a@example.com", true, &test_config()).unwrap();
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_action_token_is_bound_to_reservation_and_action() {
        let config = test_config();
        let token = generate_action_token(7, ReservationStatus::Approved, &config).unwrap();

        assert!(validate_action_token(&token, 7, ReservationStatus::Approved, &config).is_ok());
        assert!(validate_action_token(&token, 8, ReservationStatus::Approved, &config).is_err());
        assert!(validate_action_token(&token, 7, ReservationStatus::Rejected, &config).is_err());
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let config = test_config();
        let session = generate_session_token(7, "a@example.com", true, &config).unwrap();
        let state = generate_oauth_state(&config).unwrap();
        let action = generate_action_token(7, ReservationStatus::Approved, &config).unwrap();

        assert!(validate_oauth_state(&state, &config).is_ok());
        assert!(validate_oauth_state(&session, &config).is_err());
        assert!(validate_action_token(&session, 7, ReservationStatus::Approved, &config).is_err());
        assert!(validate_token(&state, &config).is_err());
        assert!(validate_token(&action, &config).is_err());
    }
}
