use crate::error::{LigaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level league configuration stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LigaConfig {
    pub liga: LigaSettings,
    /// Per-role capability overrides, keyed by role name.
    /// Roles not listed keep the standard grants.
    #[serde(default)]
    pub grants: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LigaSettings {
    /// HS256 secret shared with the league backend for session tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Lifetime of tokens issued by `liga token issue`.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
}

fn default_jwt_secret() -> String {
    "liga-jwt-secret-change-me".to_string()
}

fn default_token_ttl_hours() -> u64 {
    24
}

/// One year.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 366;

impl LigaConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LigaError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| LigaError::TomlDe(e.to_string()))?;
        if config.liga.token_ttl_hours == 0 {
            return Err(LigaError::Config(
                "token_ttl_hours must be greater than zero".to_string(),
            ));
        }
        if config.liga.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(LigaError::Config(format!(
                "token_ttl_hours must be at most {MAX_TOKEN_TTL_HOURS}"
            )));
        }
        tracing::debug!(path = %path.display(), overrides = config.grants.len(), "loaded config");
        Ok(config)
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| LigaError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config for `liga init`.
    pub fn default_config(jwt_secret: &str) -> Self {
        Self {
            liga: LigaSettings {
                jwt_secret: jwt_secret.to_string(),
                token_ttl_hours: default_token_ttl_hours(),
            },
            grants: BTreeMap::new(),
        }
    }

    /// Resolve the config file path: `<base_dir>/liga.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("liga.toml")
    }

    /// Resolve the default liga home directory: `~/.liga`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".liga"))
            .ok_or_else(|| LigaError::Config("Cannot determine home directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip_config() {
        let tmp = TempDir::new().unwrap();
        let path = LigaConfig::default_path(tmp.path());
        let config = LigaConfig::default_config("s3cret");
        config.save(&path).unwrap();
        let loaded = LigaConfig::load(&path).unwrap();
        assert_eq!(loaded.liga.jwt_secret, "s3cret");
        assert_eq!(loaded.liga.token_ttl_hours, 24);
        assert!(loaded.grants.is_empty());
    }

    #[test]
    fn load_nonexistent_returns_error() {
        let result = LigaConfig::load(Path::new("/nonexistent/liga.toml"));
        assert!(matches!(result, Err(LigaError::ConfigNotFound(_))));
    }

    #[test]
    fn grant_overrides_are_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("liga.toml");
        std::fs::write(
            &path,
            r#"
[liga]
jwt_secret = "abc"

[grants]
delegate = ["view_championships", "edit_own_team"]
player = []
"#,
        )
        .unwrap();
        let loaded = LigaConfig::load(&path).unwrap();
        assert_eq!(loaded.liga.token_ttl_hours, 24);
        assert_eq!(
            loaded.grants["delegate"],
            vec!["view_championships".to_string(), "edit_own_team".to_string()]
        );
        assert!(loaded.grants["player"].is_empty());
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("liga.toml");
        std::fs::write(&path, "[liga]\ntoken_ttl_hours = 0\n").unwrap();
        assert!(matches!(LigaConfig::load(&path), Err(LigaError::Config(_))));
    }

    #[test]
    fn oversized_ttl_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("liga.toml");
        std::fs::write(&path, "[liga]\ntoken_ttl_hours = 4611686018427387904\n").unwrap();
        assert!(matches!(LigaConfig::load(&path), Err(LigaError::Config(_))));

        std::fs::write(&path, format!("[liga]\ntoken_ttl_hours = {MAX_TOKEN_TTL_HOURS}\n"))
            .unwrap();
        assert!(LigaConfig::load(&path).is_ok());
    }

    #[test]
    fn malformed_toml_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("liga.toml");
        std::fs::write(&path, "[liga\n").unwrap();
        assert!(matches!(LigaConfig::load(&path), Err(LigaError::TomlDe(_))));
    }
}
