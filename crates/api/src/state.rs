use std::sync::Arc;

use flamingo_cloud::ObjectStorage;
use flamingo_notify::Mailer;

use crate::auth::google::IdentityProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: flamingo_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image bucket.
    pub storage: Arc<dyn ObjectStorage>,
    /// Outbound email; `None` when SMTP is not configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Google sign-in; `None` when OAuth credentials are not configured.
    pub identity: Option<Arc<dyn IdentityProvider>>,
}
