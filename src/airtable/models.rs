use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

/// Fields projected by the pending-submissions listing.
pub const LIST_FIELDS: [&str; 4] = ["SlackUsername", "OTP", "Slack ID", "Eligibility"];

/// Rows still awaiting review that carry a one-time code.
pub const PENDING_WITH_OTP: &str = "AND({Status}='Pending',NOT({OTP}=''))";

/// Body returned by the listing endpoint, held as raw JSON text so records
/// go back out byte for byte.
///
/// Anything without a `records` array (error objects, `null`) lands in
/// `Other` and is kept verbatim.
#[derive(Debug)]
pub enum RecordsEnvelope {
    Records(Vec<Box<RawValue>>),
    Other(Box<RawValue>),
}

#[derive(Deserialize)]
struct RecordsPage {
    records: Vec<Box<RawValue>>,
}

impl RecordsEnvelope {
    /// Fails only when the body is not JSON at all.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        // Derived structs also read arrays positionally, so require an object.
        if body.trim_start().starts_with('{') {
            if let Ok(page) = serde_json::from_str::<RecordsPage>(body) {
                return Ok(RecordsEnvelope::Records(page.records));
            }
        }
        Ok(RecordsEnvelope::Other(serde_json::from_str(body)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Verified,
    Unverified,
}

impl Verification {
    /// Parse the inbound `authenticated` flag. Only the strings `"true"` and
    /// `"false"` are accepted.
    pub fn from_flag(flag: Option<&Value>) -> Option<Self> {
        match flag.and_then(Value::as_str) {
            Some("true") => Some(Verification::Verified),
            Some("false") => Some(Verification::Unverified),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verification::Verified => "Verified",
            Verification::Unverified => "Unverified",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerificationFields {
    #[serde(rename = "Authenticated")]
    pub authenticated: &'static str,
    #[serde(rename = "OTP")]
    pub otp: &'static str,
}

impl From<Verification> for VerificationFields {
    fn from(verification: Verification) -> Self {
        // The one-time code is spent either way.
        Self {
            authenticated: verification.as_str(),
            otp: "",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdatePayload {
    pub fields: VerificationFields,
}
