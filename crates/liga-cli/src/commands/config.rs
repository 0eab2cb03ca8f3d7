use anyhow::Result;
use std::path::Path;

use liga_core::config::LigaConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = LigaConfig::default_path(base_dir);
    let config = LigaConfig::load(&config_path)?;

    println!("Config: {}", config_path.display());
    println!();
    println!("  JWT secret:     {}", redact(&config.liga.jwt_secret));
    println!("  Token TTL:      {} h", config.liga.token_ttl_hours);
    println!();

    if config.grants.is_empty() {
        println!("  No grant overrides; standard grants in effect.");
    } else {
        println!("  Grant overrides ({}):", config.grants.len());
        for (role, caps) in &config.grants {
            println!("    - {role}: [{}]", caps.join(", "));
        }
    }

    Ok(())
}

fn redact(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}****")
}
