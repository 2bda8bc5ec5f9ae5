use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::warn;

use solace_companion::RemoteConfig;
use solace_companion::remote::{DEFAULT_API_URL, DEFAULT_MODEL};

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Placeholder JWT secrets that MUST NOT be used in production.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "",
    DEV_JWT_SECRET,
    "change-me-to-a-random-string",
    "your-secret-key",
];

/// Load `.env.local` then `.env` from `dir`. dotenvy never overrides a
/// variable that is already set, so `.env.local` wins over `.env` and the
/// real environment wins over both. Missing files are skipped.
pub fn load_env_files(dir: &Path) {
    for name in [".env.local", ".env"] {
        let _ = dotenvy::from_path(dir.join(name));
    }
}

pub struct Config {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub production: bool,
    /// `None` when no API key is configured: chat runs on the fallback only.
    pub llm: Option<RemoteConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let production = var("SOLACE_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));

        let jwt_secret = var("SOLACE_JWT_SECRET").unwrap_or_default();
        let jwt_secret = if PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            if production {
                bail!("SOLACE_JWT_SECRET is unset or still a placeholder; set it before running in production");
            }
            warn!("SOLACE_JWT_SECRET is unset or a placeholder; using the development secret");
            DEV_JWT_SECRET.to_string()
        } else {
            jwt_secret
        };

        let host = var("SOLACE_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = var("SOLACE_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("SOLACE_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        let db_path = var("SOLACE_DB_PATH").unwrap_or_else(|| "solace.db".into()).into();

        let llm = match var("SOLACE_LLM_API_KEY").map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() => {
                let timeout_secs: u64 = match var("SOLACE_LLM_TIMEOUT_SECS") {
                    Some(v) => v.parse().context("SOLACE_LLM_TIMEOUT_SECS must be a number")?,
                    None => 30,
                };
                Some(RemoteConfig {
                    api_url: var("SOLACE_LLM_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
                    api_key: key,
                    model: var("SOLACE_LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            _ => None,
        };

        Ok(Self {
            addr,
            db_path,
            jwt_secret,
            production,
            llm,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn local_env_file_overrides_shared_one() {
        let dir = std::env::temp_dir().join(format!("solace-env-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(".env"),
            "SOLACE_ENV_ORDER_CHECK=shared\nSOLACE_ENV_ORDER_SHARED_ONLY=yes\n",
        )
        .unwrap();
        std::fs::write(dir.join(".env.local"), "SOLACE_ENV_ORDER_CHECK=local\n").unwrap();

        load_env_files(&dir);

        assert_eq!(std::env::var("SOLACE_ENV_ORDER_CHECK").unwrap(), "local");
        assert_eq!(std::env::var("SOLACE_ENV_ORDER_SHARED_ONLY").unwrap(), "yes");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn defaults_are_development() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.db_path, PathBuf::from("solace.db"));
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert!(!config.production);
        assert!(config.llm.is_none());
    }

    #[test]
    fn production_refuses_placeholder_secret() {
        assert!(load(&[("SOLACE_ENV", "production")]).is_err());
        assert!(load(&[("SOLACE_ENV", "production"), ("SOLACE_JWT_SECRET", "your-secret-key")]).is_err());

        let config = load(&[("SOLACE_ENV", "Production"), ("SOLACE_JWT_SECRET", "s3cr3t-value")]).unwrap();
        assert!(config.production);
        assert_eq!(config.jwt_secret, "s3cr3t-value");
    }

    #[test]
    fn api_key_enables_remote_backend() {
        let config = load(&[
            ("SOLACE_LLM_API_KEY", " sk-test "),
            ("SOLACE_LLM_MODEL", "qwen-max"),
            ("SOLACE_LLM_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        let llm = config.llm.unwrap();
        assert_eq!(llm.api_key, "sk-test");
        assert_eq!(llm.model, "qwen-max");
        assert_eq!(llm.api_url, DEFAULT_API_URL);
        assert_eq!(llm.timeout, Duration::from_secs(5));

        assert!(load(&[("SOLACE_LLM_API_KEY", "  ")]).unwrap().llm.is_none());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(load(&[("SOLACE_PORT", "eighty")]).is_err());
    }
}
