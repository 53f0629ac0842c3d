//! Development token issuing.

use chrono::Duration;
use clap::Args;
use uuid::Uuid;

use assethub_auth::JwtEncoder;
use assethub_core::error::AppError;
use assethub_core::types::id::UserId;

use crate::output;

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User ID to put in the subject claim; random when omitted
    #[arg(short, long)]
    pub user: Option<Uuid>,
    /// Lifetime in minutes
    #[arg(long, default_value_t = 60)]
    pub ttl_minutes: i64,
}

/// Sign a bearer token with the configured secret
pub fn execute(args: &TokenArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    if config.auth.jwt_secret.is_empty() {
        return Err(AppError::configuration("auth.jwt_secret is not set"));
    }

    let user = args.user.map(UserId::from_uuid).unwrap_or_default();
    let token = JwtEncoder::new(&config.auth).issue(user, Duration::minutes(args.ttl_minutes))?;

    output::print_kv("user", &user.to_string());
    println!("{token}");
    Ok(())
}
