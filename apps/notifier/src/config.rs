use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use chrono_tz::Tz;
use stepin_catalog::DEFAULT_SUBSCRIPTIONS_URL;
use stepin_core::constants::{DEFAULT_BUSINESS_UNIT_ID, DEFAULT_DAILY_LIMIT};
use stepin_gist_storage::DEFAULT_GITHUB_API_URL;
use stepin_mailer::DEFAULT_BREVO_API_URL;

const DEFAULT_WEB_CATEGORY: i64 = 2;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_DATA_DIR: &str = "./data";

/// A credential that never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Gist {
        api_url: String,
        token: Secret,
        gist_id: Option<String>,
    },
    File {
        data_dir: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub enabled: bool,
    pub from: String,
    pub to: Vec<String>,
    pub admin: String,
    pub daily_limit: u32,
    pub api_url: String,
    pub api_key: Secret,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub business_unit: i64,
    pub web_category: i64,
    pub request_timeout: Duration,
    pub timezone: Tz,
    pub email: EmailConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let timeout_ms: u64 = env.parse_or("STEPIN_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        if timeout_ms == 0 {
            bail!("STEPIN_REQUEST_TIMEOUT_MS must be greater than zero");
        }
        let timezone = match env.get("STEPIN_TIMEZONE") {
            Some(name) => Tz::from_str(&name)
                .map_err(|e| anyhow!("Invalid STEPIN_TIMEZONE '{}': {}", name, e))?,
            None => Tz::UTC,
        };

        let enabled = match env.get("EMAIL_ENABLED") {
            Some(value) => parse_bool(&value).context("Invalid EMAIL_ENABLED")?,
            None => true,
        };
        let to: Vec<String> = env
            .get("EMAIL_TO")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if enabled && to.is_empty() {
            bail!("EMAIL_TO must list at least one recipient while EMAIL_ENABLED is true");
        }
        let email = EmailConfig {
            enabled,
            from: env.require("EMAIL_FROM")?,
            to,
            admin: env.require("EMAIL_ADMIN")?,
            daily_limit: env.parse_or("EMAIL_DAILY_LIMIT", DEFAULT_DAILY_LIMIT)?,
            api_url: env.get_or("BREVO_API_URL", DEFAULT_BREVO_API_URL),
            api_key: Secret(env.require("BREVO_API_KEY")?),
        };

        let storage = match env.get_or("STORAGE_BACKEND", "gist").to_ascii_lowercase().as_str() {
            "gist" => StorageConfig::Gist {
                api_url: env.get_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
                token: Secret(
                    env.require("GITHUB_TOKEN")
                        .context("STORAGE_BACKEND=gist needs a GitHub token")?,
                ),
                gist_id: env.get("GIST_ID"),
            },
            "file" => StorageConfig::File {
                data_dir: PathBuf::from(env.get_or("STEPIN_DATA_DIR", DEFAULT_DATA_DIR)),
            },
            other => bail!("Unknown STORAGE_BACKEND '{}' (expected 'gist' or 'file')", other),
        };

        Ok(Self {
            api_url: env.get_or("STEPIN_API_URL", DEFAULT_SUBSCRIPTIONS_URL),
            business_unit: env.parse_or("STEPIN_BUSINESS_UNIT", DEFAULT_BUSINESS_UNIT_ID)?,
            web_category: env.parse_or("STEPIN_WEB_CATEGORY", DEFAULT_WEB_CATEGORY)?,
            request_timeout: Duration::from_millis(timeout_ms),
            timezone,
            email,
            storage,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn require(&self, key: &str) -> anyhow::Result<String> {
        self.get(key)
            .ok_or_else(|| anyhow!("Missing required environment variable {}", key))
    }

    fn parse_or<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.get(key) {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid {} '{}'", key, value)),
            None => Ok(default),
        }
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("expected true or false, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("EMAIL_FROM", "watcher@example.com"),
        ("EMAIL_TO", "a@example.com, ,b@example.com"),
        ("EMAIL_ADMIN", "admin@example.com"),
        ("BREVO_API_KEY", "xkeysib"),
        ("GITHUB_TOKEN", "ghp_token"),
    ];

    fn with(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        let mut pairs = MINIMAL.to_vec();
        pairs.extend_from_slice(extra);
        pairs
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(MINIMAL)).unwrap();

        assert_eq!(config.api_url, DEFAULT_SUBSCRIPTIONS_URL);
        assert_eq!(config.business_unit, 2612);
        assert_eq!(config.web_category, 2);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.timezone, Tz::UTC);
        assert!(config.email.enabled);
        assert_eq!(config.email.to, vec!["a@example.com", "b@example.com"]);
        assert_eq!(config.email.daily_limit, 50);
        assert_eq!(config.email.api_url, DEFAULT_BREVO_API_URL);
        assert_eq!(
            config.storage,
            StorageConfig::Gist {
                api_url: DEFAULT_GITHUB_API_URL.to_string(),
                token: Secret("ghp_token".to_string()),
                gist_id: None,
            }
        );
    }

    #[test]
    fn file_backend_needs_no_token() {
        let pairs = [
            ("EMAIL_FROM", "watcher@example.com"),
            ("EMAIL_TO", "a@example.com"),
            ("EMAIL_ADMIN", "admin@example.com"),
            ("BREVO_API_KEY", "xkeysib"),
            ("STORAGE_BACKEND", "File"),
            ("STEPIN_DATA_DIR", "/var/lib/stepin"),
        ];
        let config = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(
            config.storage,
            StorageConfig::File {
                data_dir: PathBuf::from("/var/lib/stepin")
            }
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let pairs = with(&[
            ("STEPIN_BUSINESS_UNIT", "77"),
            ("STEPIN_TIMEZONE", "Europe/Stockholm"),
            ("EMAIL_DAILY_LIMIT", "3"),
            ("STEPIN_REQUEST_TIMEOUT_MS", "1500"),
            ("GIST_ID", " abc123 "),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.business_unit, 77);
        assert_eq!(config.timezone, chrono_tz::Europe::Stockholm);
        assert_eq!(config.email.daily_limit, 3);
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        assert!(matches!(
            config.storage,
            StorageConfig::Gist { gist_id: Some(ref id), .. } if id == "abc123"
        ));
    }

    #[test]
    fn recipients_only_required_when_enabled() {
        let pairs: Vec<_> = with(&[("EMAIL_ENABLED", "false")])
            .into_iter()
            .filter(|(k, _)| *k != "EMAIL_TO")
            .collect();
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert!(!config.email.enabled);
        assert!(config.email.to.is_empty());

        let pairs: Vec<_> = MINIMAL
            .iter()
            .copied()
            .filter(|(k, _)| *k != "EMAIL_TO")
            .collect();
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("EMAIL_TO"));
    }

    #[test]
    fn missing_required_values_are_named() {
        for key in ["EMAIL_FROM", "EMAIL_ADMIN", "BREVO_API_KEY", "GITHUB_TOKEN"] {
            let pairs: Vec<_> = MINIMAL.iter().copied().filter(|(k, _)| *k != key).collect();
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(format!("{:#}", err).contains(key), "{:#}", err);
        }
    }

    #[test]
    fn rejects_malformed_values() {
        for (key, value) in [
            ("STEPIN_BUSINESS_UNIT", "gym"),
            ("EMAIL_DAILY_LIMIT", "-1"),
            ("STEPIN_TIMEZONE", "Mars/Olympus"),
            ("EMAIL_ENABLED", "maybe"),
            ("STORAGE_BACKEND", "s3"),
            ("STEPIN_REQUEST_TIMEOUT_MS", "0"),
        ] {
            let pairs = with(&[(key, value)]);
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(format!("{:#}", err).contains(key), "{:#}", err);
        }
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let config = Config::from_lookup(lookup(MINIMAL)).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("xkeysib"));
        assert!(!rendered.contains("ghp_token"));
    }
}
