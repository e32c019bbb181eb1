//! Response assertions used by steps

use crate::client::ApiResponse;
use crate::error::{StepError, StepResult};
use reqwest::StatusCode;

/// Longest body excerpt quoted in a failure message
const BODY_EXCERPT_LEN: usize = 200;

/// Fail unless the response has exactly `expected` status
pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> StepResult {
    if response.status == expected {
        return Ok(());
    }
    Err(StepError::Assertion(format!(
        "expected status {}, got {} (body: {})",
        expected.as_u16(),
        response.status.as_u16(),
        excerpt(&response.body)
    )))
}

/// Fail unless the envelope's `Msg` equals `expected` exactly
pub fn expect_message(response: &ApiResponse, expected: &str) -> StepResult {
    match response.message()? {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(StepError::Assertion(format!(
            "expected message {:?}, got {:?}",
            expected, actual
        ))),
        None => Err(StepError::Assertion(format!(
            "expected message {:?}, response had none (body: {})",
            expected,
            excerpt(&response.body)
        ))),
    }
}

/// Fail with `message` unless `condition` holds
pub fn ensure(condition: bool, message: impl Into<String>) -> StepResult {
    if condition {
        Ok(())
    } else {
        Err(StepError::Assertion(message.into()))
    }
}

fn excerpt(body: &str) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
