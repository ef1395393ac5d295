use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Failure of one call against the user service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API returned status: {status}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field errors reported by the server in a 4xx body shaped like
    /// `{ "errors": { "email": ["..."] } }`. Single string values are accepted too.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let Self::Status { status, body } = self else {
            return BTreeMap::new();
        };
        if !(400..500).contains(status) {
            return BTreeMap::new();
        }
        let Ok(Value::Object(root)) = serde_json::from_str::<Value>(body) else {
            return BTreeMap::new();
        };
        let Some(Value::Object(errors)) = root.get("errors") else {
            return BTreeMap::new();
        };

        errors
            .iter()
            .map(|(field, messages)| {
                let messages = match messages {
                    Value::String(message) => vec![message.clone()],
                    Value::Array(items) => items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_owned))
                        .collect(),
                    other => vec![other.to_string()],
                };
                (field.clone(), messages)
            })
            .collect()
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.field_errors().contains_key(field)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unprocessable(body: &str) -> ApiError {
        ApiError::Status {
            status: 422,
            body: body.to_owned(),
        }
    }

    #[test]
    fn field_errors_accept_lists_and_strings() {
        let err = unprocessable(
            r#"{"message":"invalid","errors":{"email":["The email has already been taken."],"name":"too short"}}"#,
        );
        let fields = err.field_errors();

        assert_eq!(
            fields.get("email").map(Vec::as_slice),
            Some(&["The email has already been taken.".to_owned()][..])
        );
        assert_eq!(
            fields.get("name").map(Vec::as_slice),
            Some(&["too short".to_owned()][..])
        );
        assert!(err.has_field_error("email"));
        assert!(!err.has_field_error("phone"));
    }

    #[test]
    fn server_errors_have_no_field_errors() {
        let err = ApiError::Status {
            status: 500,
            body: r#"{"errors":{"email":["boom"]}}"#.to_owned(),
        };
        assert!(err.field_errors().is_empty());
    }

    #[test]
    fn malformed_bodies_have_no_field_errors() {
        assert!(unprocessable("not json").field_errors().is_empty());
        assert!(unprocessable(r#"{"errors":[]}"#).field_errors().is_empty());
        assert!(
            ApiError::Transport("refused".into())
                .field_errors()
                .is_empty()
        );
    }

    #[test]
    fn status_is_exposed() {
        assert_eq!(unprocessable("{}").status(), Some(422));
        assert_eq!(ApiError::Decode("eof".into()).status(), None);
    }
}
