//! Response builders for the API Gateway proxy integration.

use serde_json::{Value, json};

/// Returns the 200 acknowledgement the platform expects.
#[must_use]
pub fn ok_ack() -> Value {
    json!({ "statusCode": 200, "body": "OK" })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}
