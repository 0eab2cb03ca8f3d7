use anyhow::Result;
use rand::RngCore;
use std::path::Path;

use liga_core::config::LigaConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    println!("Initializing liga in {}", base_dir.display());

    std::fs::create_dir_all(base_dir)?;

    let config_path = LigaConfig::default_path(base_dir);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    let mut secret = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    let config = LigaConfig::default_config(&hex::encode(secret));
    config.save(&config_path)?;
    println!("Created config: {}", config_path.display());

    println!("\nNext steps:");
    println!("  1. Share liga.jwt_secret with the league backend");
    println!("  2. Add [grants] overrides to {} if needed", config_path.display());

    Ok(())
}
