use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the built frontend; `None` serves the API only
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Accepted bearer tokens
    #[serde(default)]
    pub tokens: Vec<String>,
}

impl AuthConfig {
    pub fn accepts(&self, token: &str) -> bool {
        !token.is_empty() && self.tokens.iter().any(|t| t == token)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub demo_data: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[database]
path = "db/manage.db"

[auth]
tokens = ["dev-token"]

[seed]
demo_data = true
"#;

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. The current working directory
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let exe_candidate = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("config.toml")));
    let cwd_candidate = Some(PathBuf::from("config.toml"));

    for config_path in [exe_candidate, cwd_candidate].into_iter().flatten() {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        }
        tracing::debug!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Resolves a configured path. Relative paths are taken relative to the
/// executable directory, falling back to the working directory.
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(path)))
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "db/manage.db");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.static_dir.is_none());
        assert!(config.auth.accepts("dev-token"));
        assert!(config.seed.demo_data);
    }

    #[test]
    fn optional_sections_default() {
        let config = parse_config(
            r#"
            [server]
            static_dir = "dist"

            [database]
            path = "/var/lib/manage.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.static_dir.as_deref(), Some("dist"));
        assert!(config.auth.tokens.is_empty());
        assert!(!config.seed.demo_data);
        assert_eq!(
            resolve_path(&config.database.path),
            PathBuf::from("/var/lib/manage.db")
        );
    }

    #[test]
    fn token_check() {
        let auth = AuthConfig {
            tokens: vec!["a".into(), "b".into()],
        };
        assert!(auth.accepts("b"));
        assert!(!auth.accepts("c"));
        assert!(!auth.accepts(""));
        assert!(!AuthConfig::default().accepts("a"));
    }

    #[test]
    fn missing_database_section_is_an_error() {
        assert!(parse_config("[server]\nport = 1").is_err());
    }
}
