use std::net::IpAddr;

use reqwest::Url;

pub const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_AIRTABLE_BASE_ID: &str = "app4Bs8Tjwvk5qcD4";
pub const DEFAULT_AIRTABLE_TABLE: &str = "Submissions";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub max_body_size: usize,
    /// Upstream API key. Left unset rather than failing startup.
    pub airtable_key: Option<String>,
    /// Shared secret expected in inbound `Authorization: Bearer` headers.
    pub secret_key: Option<String>,
    pub airtable: AirtableConfig,
}

#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_url: Url,
    pub base_id: String,
    pub table: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("SUBMISSION_GATE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SUBMISSION_GATE_HOST: {e}"))?;

        let port: u16 = env_or("SUBMISSION_GATE_PORT", "8787")
            .parse()
            .map_err(|e| format!("Invalid SUBMISSION_GATE_PORT: {e}"))?;

        let log_level = env_or("SUBMISSION_GATE_LOG_LEVEL", "info");

        let max_body_size: usize = env_or("SUBMISSION_GATE_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid SUBMISSION_GATE_MAX_BODY_SIZE: {e}"))?;

        let api_url = Url::parse(&env_or("AIRTABLE_API_URL", DEFAULT_AIRTABLE_API_URL))
            .map_err(|e| format!("Invalid AIRTABLE_API_URL: {e}"))?;
        if api_url.cannot_be_a_base() {
            return Err("Invalid AIRTABLE_API_URL: not a base URL".to_string());
        }

        let airtable = AirtableConfig {
            api_url,
            base_id: env_or("AIRTABLE_BASE_ID", DEFAULT_AIRTABLE_BASE_ID),
            table: env_or("AIRTABLE_TABLE", DEFAULT_AIRTABLE_TABLE),
        };

        Ok(Config {
            host,
            port,
            log_level,
            max_body_size,
            airtable_key: std::env::var("AIRTABLE_KEY").ok(),
            secret_key: std::env::var("SECRET_KEY").ok(),
            airtable,
        })
    }

    /// The upstream key, unless it is missing or obviously misconfigured.
    pub fn usable_airtable_key(&self) -> Option<&str> {
        self.airtable_key
            .as_deref()
            .filter(|key| !matches!(*key, "" | "undefined" | "null"))
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
