pub mod capabilities;
pub mod check;
pub mod config;
pub mod grants;
pub mod init;
pub mod roles;
pub mod token;

use anyhow::Result;
use std::path::Path;

use liga_auth::GrantTable;
use liga_core::LigaError;
use liga_core::config::LigaConfig;

/// Standard grants plus any overrides from `liga.toml`. A missing config
/// file means the standard table.
pub fn load_grants(base_dir: &Path) -> Result<GrantTable> {
    let config_path = LigaConfig::default_path(base_dir);
    match LigaConfig::load(&config_path) {
        Ok(config) => Ok(GrantTable::from_overrides(&config.grants)?),
        Err(LigaError::ConfigNotFound(_)) => Ok(GrantTable::standard()),
        Err(e) => Err(e.into()),
    }
}
