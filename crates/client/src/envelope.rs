//! The uniform result of every car API call.
//!
//! A call that reaches the server and gets a 2xx answer resolves to an
//! [`ApiOutcome`]: `Success` only for an exact HTTP 200 whose body does
//! not explicitly say `"success": false`, `Failure` with the server's
//! error text otherwise. Transport problems never produce an outcome;
//! they surface as [`ClientError`](crate::api::ClientError).

use serde::de::DeserializeOwned;
use serde_json::Value;

const STATUS_OK: u16 = 200;

/// Application-level result of a car API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    /// The server accepted the request. Carries the list payload for
    /// reads and the server message for mutations.
    Success(T),
    /// The server answered but rejected the request.
    Failure(String),
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    /// The embedded message: the payload for message outcomes, the error
    /// text for failures.
    pub fn message(&self) -> Option<&str>
    where
        T: AsRef<str>,
    {
        match self {
            ApiOutcome::Success(message) => Some(message.as_ref()),
            ApiOutcome::Failure(error) => Some(error.as_str()),
        }
    }
}

/// Map a mutation response (`POST`/`PUT`/`DELETE`) to a message outcome.
pub fn message_outcome(status: u16, body: &Value) -> ApiOutcome<String> {
    if let Some(error) = rejection(status, body) {
        return ApiOutcome::Failure(error);
    }
    ApiOutcome::Success(text_field(body, "message").unwrap_or_default())
}

/// Map a read response to a data outcome.
///
/// The payload is either the whole body or, when the body is an object
/// with a `data` member, that member.
pub fn data_outcome<T: DeserializeOwned>(
    status: u16,
    body: Value,
) -> Result<ApiOutcome<T>, serde_json::Error> {
    if let Some(error) = rejection(status, &body) {
        return Ok(ApiOutcome::Failure(error));
    }

    let payload = match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    Ok(ApiOutcome::Success(serde_json::from_value(payload)?))
}

/// The error text when the response counts as a rejection.
fn rejection(status: u16, body: &Value) -> Option<String> {
    if status != STATUS_OK {
        return Some(
            text_field(body, "error")
                .unwrap_or_else(|| format!("Unexpected response status {status}")),
        );
    }

    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Some(
            text_field(body, "error")
                .or_else(|| text_field(body, "message"))
                .unwrap_or_else(|| "Request was rejected".to_string()),
        );
    }

    None
}

fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ok_status_yields_server_message() {
        let outcome = message_outcome(200, &json!({"message": "Car updated"}));
        assert_eq!(outcome, ApiOutcome::Success("Car updated".to_string()));
        assert!(outcome.is_success());
    }

    #[test]
    fn other_success_status_reads_error_field() {
        let outcome = message_outcome(201, &json!({"error": "Created elsewhere"}));
        assert_eq!(outcome, ApiOutcome::Failure("Created elsewhere".to_string()));
    }

    #[test]
    fn other_success_status_without_error_field_gets_status_text() {
        let outcome = message_outcome(204, &Value::Null);
        assert_eq!(
            outcome,
            ApiOutcome::Failure("Unexpected response status 204".to_string())
        );
    }

    #[test]
    fn explicit_success_false_is_a_rejection() {
        let outcome = message_outcome(200, &json!({"success": false, "error": "Model taken"}));
        assert_eq!(outcome.message(), Some("Model taken"));
        assert!(!outcome.is_success());

        let outcome = message_outcome(200, &json!({"success": false, "message": "Nope"}));
        assert_eq!(outcome, ApiOutcome::Failure("Nope".to_string()));
    }

    #[test]
    fn success_true_is_accepted() {
        let outcome = message_outcome(200, &json!({"success": true, "message": "ok"}));
        assert_eq!(outcome, ApiOutcome::Success("ok".to_string()));
    }

    #[test]
    fn data_outcome_accepts_bare_array_and_wrapped_data() {
        let bare: ApiOutcome<Vec<i64>> = data_outcome(200, json!([1, 2, 3])).unwrap();
        assert_eq!(bare, ApiOutcome::Success(vec![1, 2, 3]));

        let wrapped: ApiOutcome<Vec<i64>> = data_outcome(200, json!({"data": [4]})).unwrap();
        assert_eq!(wrapped, ApiOutcome::Success(vec![4]));
    }

    #[test]
    fn data_outcome_rejects_malformed_payload() {
        let result: Result<ApiOutcome<Vec<i64>>, _> = data_outcome(200, json!({"rows": []}));
        assert!(result.is_err());
    }

    #[test]
    fn data_outcome_failure_skips_decoding() {
        let outcome: ApiOutcome<Vec<i64>> =
            data_outcome(202, json!({"error": "Still indexing"})).unwrap();
        assert_eq!(outcome, ApiOutcome::Failure("Still indexing".to_string()));
    }
}
