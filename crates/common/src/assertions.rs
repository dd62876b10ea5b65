//! Assertion helpers over [`ApiResponse`]
//!
//! Failures carry the actual status and a truncated body so a failing
//! scenario is diagnosable from its message alone.

use serde::de::DeserializeOwned;

use crate::client::ApiResponse;
use crate::error::{Error, Result};

/// Longest body excerpt embedded in a failure message
pub const MAX_BODY_CHARS: usize = 600;

/// Response status is in the 2xx range
pub fn expect_ok(resp: &ApiResponse) -> Result<()> {
    if resp.ok {
        return Ok(());
    }
    Err(Error::Assertion(format!(
        "Expected ok=true but got ok=false (status {}). Body: {}",
        resp.status,
        truncate(&resp.body_text, MAX_BODY_CHARS)
    )))
}

/// Response status equals `expected`
pub fn expect_status(resp: &ApiResponse, expected: u16) -> Result<()> {
    if resp.status == expected {
        return Ok(());
    }
    Err(Error::Assertion(format!(
        "Expected status {} but got {}. Body: {}",
        expected,
        resp.status,
        truncate(&resp.body_text, MAX_BODY_CHARS)
    )))
}

/// Response took at most `max_ms` milliseconds
pub fn expect_duration_under(resp: &ApiResponse, max_ms: u64) -> Result<()> {
    if resp.duration_ms <= max_ms {
        return Ok(());
    }
    Err(Error::Assertion(format!(
        "Expected duration <= {}ms but got {}ms (status {}). Body: {}",
        max_ms,
        resp.duration_ms,
        resp.status,
        truncate(&resp.body_text, MAX_BODY_CHARS)
    )))
}

/// Structured body deserialized as `T`
pub fn expect_json<T: DeserializeOwned>(resp: &ApiResponse) -> Result<T> {
    resp.json().ok_or_else(|| {
        Error::Assertion(format!(
            "Expected a JSON body of type {} (status {}). Body: {}",
            std::any::type_name::<T>(),
            resp.status,
            truncate(&resp.body_text, MAX_BODY_CHARS)
        ))
    })
}

/// Cut `s` to at most `max` characters, marking the cut with `...`
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...", &s[..idx]),
    }
}
