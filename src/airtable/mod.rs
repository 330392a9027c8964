pub mod client;
pub mod models;

use reqwest::StatusCode;

pub use client::AirtableClient;
pub use models::{RecordsEnvelope, Verification};

#[derive(Debug)]
pub enum UpstreamError {
    MissingKey,
    InvalidUrl(String),
    Request(reqwest::Error),
    Decode(serde_json::Error),
    Status(StatusCode),
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::MissingKey => write!(f, "Airtable API key is not configured"),
            UpstreamError::InvalidUrl(url) => write!(f, "Cannot build Airtable URL from {url}"),
            UpstreamError::Request(err) => write!(f, "Airtable request failed: {err}"),
            UpstreamError::Decode(err) => write!(f, "Airtable returned invalid JSON: {err}"),
            UpstreamError::Status(status) => write!(f, "Airtable responded with {status}"),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Request(err) => Some(err),
            UpstreamError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Request(err)
    }
}
