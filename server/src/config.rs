use std::time::Duration;

use anyhow::{Context, Result, anyhow};

pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br/ws";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_CEP_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub viacep_base_url: String,
    pub cep_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            viacep_base_url: DEFAULT_VIACEP_BASE_URL.to_string(),
            cep_timeout: Duration::from_secs(DEFAULT_CEP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cors_allowed_origins = parse_origins(
            &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into()),
        );

        let viacep_base_url = lookup("VIACEP_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_VIACEP_BASE_URL.into());
        if !viacep_base_url.starts_with("http://") && !viacep_base_url.starts_with("https://") {
            return Err(anyhow!(
                "VIACEP_BASE_URL must be an http(s) URL, got {viacep_base_url}"
            ));
        }

        let cep_timeout_secs = match lookup("CEP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid CEP_TIMEOUT_SECS {raw:?}"))?,
            None => DEFAULT_CEP_TIMEOUT_SECS,
        };

        Ok(Self {
            cors_allowed_origins,
            viacep_base_url,
            cep_timeout: Duration::from_secs(cep_timeout_secs),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
