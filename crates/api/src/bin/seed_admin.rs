//! Add an email to the admin allowlist.
//!
//! ```text
//! seed-admin --email owner@example.com --name "Owner"
//! seed-admin --email owner@example.com --sync-user false
//! ```
//!
//! With `--sync-user` (the default) any existing user with that email is
//! promoted to admin as well.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::ValidateEmail;

use flamingo_db::models::user::normalize_email;
use flamingo_db::repositories::UserRepo;

#[derive(Parser)]
#[command(name = "seed-admin", about = "Seed the Flamingo admin allowlist")]
struct Cli {
    /// Email address to allowlist.
    #[arg(long)]
    email: String,
    /// Display name stored with the allowlist entry.
    #[arg(long)]
    name: Option<String>,
    /// Also flag an existing user with this email as admin.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    sync_user: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seed_admin=info,flamingo_db=info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let email = normalize_email(&cli.email);
    if !email.validate_email() {
        bail!("'{}' is not a valid email address", cli.email);
    }
    let name = cli
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = flamingo_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    flamingo_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let admin = UserRepo::upsert_admin(&pool, &email, name)
        .await
        .context("failed to upsert allowlist entry")?;
    tracing::info!(id = admin.id, email = %admin.email, "Admin allowlisted");

    if cli.sync_user {
        let updated = UserRepo::grant_admin_by_email(&pool, &email)
            .await
            .context("failed to promote existing user")?;
        tracing::info!(email = %email, updated, "Existing users promoted");
    }

    Ok(())
}
