use anyhow::Context;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(
    config: &AppConfig,
    user: Option<Uuid>,
    hours: Option<u64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let user_id = user.unwrap_or_else(Uuid::new_v4);
    let hours = hours.unwrap_or(config.security.jwt_expiry_hours);

    let claims = Claims::new(user_id, hours).context("invalid --hours")?;
    let expires_at = claims.exp;
    let token = generate_jwt(&claims, &config.security.jwt_secret)
        .context("failed to mint token (is JWT_SECRET set?)")?;

    match output_format {
        OutputFormat::Json => {
            let out = json!({
                "user": user_id,
                "token": token,
                "expires_at": expires_at,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            eprintln!("user: {} (valid {}h)", user_id, hours);
            println!("{}", token);
        }
    }
    Ok(())
}
