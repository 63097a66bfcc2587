use serde::Serialize;

use crate::error::BfhlError;
use crate::operations::Outcome;

/// Payload of an envelope: a computed result or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Data {
    Outcome(Outcome),
    Message(String),
}

/// The uniform response wrapper. `data` is omitted for health checks,
/// `error_code` for successes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    #[serde(rename = "is_success")]
    pub success: bool,
    #[serde(rename = "official_email")]
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

impl Envelope {
    pub fn health(identity: &str) -> Self {
        Self {
            success: true,
            identity: identity.to_string(),
            data: None,
            error_code: None,
        }
    }

    pub fn success(identity: &str, outcome: Outcome) -> Self {
        Self {
            success: true,
            identity: identity.to_string(),
            data: Some(Data::Outcome(outcome)),
            error_code: None,
        }
    }

    pub fn failure(identity: &str, err: &BfhlError) -> Self {
        Self {
            success: false,
            identity: identity.to_string(),
            data: Some(Data::Message(err.to_string())),
            error_code: Some(err.code()),
        }
    }
}
