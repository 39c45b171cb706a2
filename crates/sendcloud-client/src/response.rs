//! Decoding of the API's JSON response envelope.
//!
//! Every endpoint answers with the same envelope:
//! `{"message": "success"|..., "errors": [...], "email_id_list": [...]}`.
//! Decoding is deliberately lenient: a malformed body or missing keys
//! degrade to empty fields rather than a decode error, because
//! HTTP-level failures are already reported separately by the
//! transport. A 200 body that is not the success envelope therefore
//! surfaces as `Remote("unknown")`.

use serde::Deserialize;

use crate::error::{ClientError, Result};

const SUCCESS_MESSAGE: &str = "success";

/// Outcome classification of one API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    /// The API reported `message == "success"`.
    Success,
    /// Anything else.
    Failure,
}

/// Decoded response envelope of one API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Success/failure classification.
    pub status: ApiStatus,
    /// Raw `message` field.
    pub message: String,
    /// Error strings, in reported order.
    pub errors: Vec<String>,
    /// Remote-assigned message ids, in reported order. Empty for
    /// template invocations.
    pub email_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    email_id_list: Vec<String>,
}

impl ApiResponse {
    /// Decodes a raw response body.
    ///
    /// Never fails: unparseable bodies decode as an empty envelope,
    /// which classifies as `Failure`.
    pub fn decode(body: &str) -> Self {
        let envelope: Envelope = serde_json::from_str(body).unwrap_or_default();
        let status = if envelope.message == SUCCESS_MESSAGE {
            ApiStatus::Success
        } else {
            ApiStatus::Failure
        };
        Self {
            status,
            message: envelope.message,
            errors: envelope.errors,
            email_ids: envelope.email_id_list,
        }
    }

    /// Converts a failure into the corresponding `Remote` error.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Remote` with the first reported error
    /// string, or `"unknown"` when the API supplied none.
    pub fn into_result(self) -> Result<Self> {
        match self.status {
            ApiStatus::Success => Ok(self),
            ApiStatus::Failure => {
                let reason =
                    self.errors.into_iter().next().unwrap_or_else(|| "unknown".to_string());
                Err(ClientError::Remote(reason))
            },
        }
    }

    /// First remote-assigned message id, empty when the call returns
    /// none (template invocations never do).
    pub fn first_email_id(&self) -> String {
        self.email_ids.first().cloned().unwrap_or_default()
    }
}
