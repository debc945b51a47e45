//! Backend response envelope
//!
//! Every JSON response from the backend is wrapped in a uniform
//! `{code, msg, data}` envelope. This module decodes that envelope exactly
//! once, at the boundary, into a discriminated outcome the pipeline can
//! branch on. Classification is total: a body that is not an envelope at
//! all (missing or non-integer `code`, or not an object) degrades to a
//! generic failure instead of panicking or erroring out of band.

use serde::Deserialize;
use serde_json::Value;

use crate::constants::{SESSION_EXPIRED_CODE, SUCCESS_CODES};

/// The uniform response envelope.
///
/// All fields are optional so that malformed or partial bodies still
/// deserialize; [`classify`] decides what they mean.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Outcome of envelope classification.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeOutcome {
    /// Success code (200 or 0): the unwrapped `data` field. A missing
    /// `data` field resolves as JSON null.
    Success(Value),
    /// Code 401: the session is no longer valid.
    SessionExpired { msg: Option<String> },
    /// Any other (or missing) code: an application-level failure. `body`
    /// keeps the original response for callers that need detail.
    Failure { code: Option<i64>, msg: Option<String>, body: Value },
}

/// Classify a raw response body against the envelope contract.
pub fn classify(body: &Value) -> EnvelopeOutcome {
    let envelope = match Envelope::deserialize(body) {
        Ok(envelope) => envelope,
        // Non-object bodies (a bare string, array, number) are not
        // envelopes; treat them as a generic failure.
        Err(_) => return EnvelopeOutcome::Failure { code: None, msg: None, body: body.clone() },
    };

    match envelope.code {
        Some(code) if SUCCESS_CODES.contains(&code) => {
            EnvelopeOutcome::Success(envelope.data.unwrap_or(Value::Null))
        }
        Some(SESSION_EXPIRED_CODE) => EnvelopeOutcome::SessionExpired { msg: envelope.msg },
        code => EnvelopeOutcome::Failure { code, msg: envelope.msg, body: body.clone() },
    }
}
