use anyhow::Result;
use std::path::Path;

use liga_auth::{Role, create_jwt, role_name, verify_jwt};
use liga_core::config::LigaConfig;

pub fn issue(user: &str, username: &str, role: Option<&str>, base_dir: &Path) -> Result<()> {
    let config = LigaConfig::load(&LigaConfig::default_path(base_dir))?;
    let role = role.map(str::parse::<Role>).transpose()?;
    let token = create_jwt(
        user,
        username,
        role,
        &config.liga.jwt_secret,
        config.liga.token_ttl_hours,
    )?;
    tracing::info!(user, role = %role_name(role), "issued session token");
    println!("{token}");
    Ok(())
}

pub fn inspect(token: &str, base_dir: &Path) -> Result<()> {
    let config = LigaConfig::load(&LigaConfig::default_path(base_dir))?;
    let claims = verify_jwt(token, &config.liga.jwt_secret)?;
    let subject = claims.subject();

    println!("{}", serde_json::to_string_pretty(&claims)?);
    println!();
    println!("  Role:     {} ({subject})", role_name(subject));
    if let Some(expires) = chrono::DateTime::from_timestamp(claims.exp as i64, 0) {
        println!("  Expires:  {}", expires.to_rfc3339());
    }
    Ok(())
}
