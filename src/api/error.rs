//! API errors and the normalizer that turns them into a message fit for display.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown when a failure carries nothing more specific.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred, couldn't make a request";

/// Fields every entry of a validation failure's `errors` array carries.
const VALIDATION_FIELDS: [&str; 4] = ["location", "msg", "param", "value"];

/// A failed API call, as raw as the transport saw it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("the server responded with status {status}")]
    Status { status: u16, body: Value },

    /// The request never produced a response.
    #[error("the request could not be completed: {0}")]
    Transport(String),

    /// A successful response whose body did not have the expected shape.
    #[error("unable to decode the response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The uniform error shape stored on slices and shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ErrorData {
    pub message: String,
}

impl ErrorData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for ErrorData {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_MESSAGE)
    }
}

impl From<ApiError> for ErrorData {
    fn from(value: ApiError) -> Self {
        handle_error(&value)
    }
}

/// Classifies a failed call, in order:
///
/// 1. A validation failure: the body has an `errors` array whose first entry carries
///    `location`, `msg`, `param` and `value`. Every entry becomes `"{msg}: {param} - {value}"`,
///    joined with `", "`.
/// 2. A body with a string `message`, which is passed through.
/// 3. Anything else, which gets `DEFAULT_ERROR_MESSAGE`.
pub fn handle_error(error: &ApiError) -> ErrorData {
    let body = match error {
        ApiError::Status { body, .. } => body,
        ApiError::Transport(_) | ApiError::Decode(_) => return ErrorData::default(),
    };

    if let Some(message) = validation_message(body) {
        return ErrorData::new(message);
    }

    match body.get("message").and_then(Value::as_str) {
        Some(message) => ErrorData::new(message),
        None => ErrorData::default(),
    }
}

fn validation_message(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    let first = errors.first()?.as_object()?;
    if !VALIDATION_FIELDS.iter().all(|f| first.contains_key(*f)) {
        return None;
    }

    let entries: Vec<String> = errors
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            format!(
                "{}: {} - {}",
                field_text(entry, "msg"),
                field_text(entry, "param"),
                field_text(entry, "value")
            )
        })
        .collect();
    Some(entries.join(", "))
}

/// Strings are rendered without quotes, other values in their JSON form, missing values empty.
fn field_text(entry: &Map<String, Value>, field: &str) -> String {
    match entry.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(body: Value) -> ApiError {
        ApiError::Status { status: 400, body }
    }

    #[test]
    fn validation_errors_are_concatenated_in_order() {
        let error = status(json!({
            "errors": [
                {"location": "body", "msg": "Invalid value", "param": "email", "value": "nope"},
                {"location": "body", "msg": "Too short", "param": "password", "value": "123"},
                {"location": "body", "msg": "Must be positive", "param": "balance", "value": -5}
            ]
        }));
        assert_eq!(
            handle_error(&error).message,
            "Invalid value: email - nope, Too short: password - 123, Must be positive: balance - -5"
        );
    }

    #[test]
    fn validation_shape_requires_all_fields_on_first_entry() {
        let error = status(json!({
            "errors": [{"msg": "Invalid value", "param": "email"}],
            "message": "Bad request"
        }));
        assert_eq!(handle_error(&error).message, "Bad request");
    }

    #[test]
    fn server_message_is_passed_through() {
        let error = ApiError::Status {
            status: 404,
            body: json!({"message": "Account not found"}),
        };
        assert_eq!(handle_error(&error).message, "Account not found");
    }

    #[test]
    fn unknown_body_gets_default_message() {
        let error = status(Value::String("<html>Bad Gateway</html>".to_string()));
        assert_eq!(handle_error(&error).message, DEFAULT_ERROR_MESSAGE);

        let error = status(json!({"message": 42}));
        assert_eq!(handle_error(&error).message, DEFAULT_ERROR_MESSAGE);

        let error = status(json!({"errors": []}));
        assert_eq!(handle_error(&error).message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn transport_and_decode_failures_get_default_message() {
        let error = ApiError::Transport("connection refused".to_string());
        assert_eq!(handle_error(&error).message, DEFAULT_ERROR_MESSAGE);

        let decode = serde_json::from_str::<Value>("{").unwrap_err();
        assert_eq!(
            handle_error(&ApiError::Decode(decode)).message,
            DEFAULT_ERROR_MESSAGE
        );
    }

    #[test]
    fn error_data_displays_its_message() {
        let error = ErrorData::new("Insufficient funds");
        assert_eq!(error.to_string(), "Insufficient funds");
    }
}
