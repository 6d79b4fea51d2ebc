//! The `{ok, result, description, error_code}` wrapper around every response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tgkit_core::error::TgError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<Value>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
    pub parameters: Option<ResponseParameters>,
}

/// Extra hints attached to some failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// The group was migrated to a supergroup with this id.
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before repeating a flood-limited request.
    pub retry_after: Option<i64>,
}

impl ApiResponse {
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            description: None,
            error_code: None,
            parameters: None,
        }
    }

    pub fn failure(error_code: i64, description: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            description: Some(description.into()),
            error_code: Some(error_code),
            parameters: None,
        }
    }

    /// Unwrap `result` as `T`, turning `ok: false` into [`TgError::Api`].
    pub fn into_result<T: DeserializeOwned>(self, method: &str) -> Result<T, TgError> {
        if !self.ok {
            return Err(TgError::Api {
                description: self
                    .description
                    .unwrap_or_else(|| format!("{method} failed without description")),
                error_code: self.error_code.unwrap_or_default(),
            });
        }

        let result = self.result.unwrap_or(Value::Null);
        serde_json::from_value(result)
            .map_err(|e| TgError::Decode(format!("{method} returned unexpected result: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgkit_core::types::User;

    #[test]
    fn test_ok_envelope_decodes_result() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{"ok": true, "result": {"id": 1, "is_bot": true, "first_name": "Echo"}}"#,
        )
        .unwrap();
        let user: User = resp.into_result("getMe").unwrap();
        assert!(user.is_bot);
        assert_eq!(user.first_name, "Echo");
    }

    #[test]
    fn test_failed_envelope_is_api_error() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
        )
        .unwrap();
        let err = resp.into_result::<bool>("sendMessage").unwrap_err();
        assert_eq!(err.error_code(), Some(400));
        assert_eq!(err.to_string(), "api error 400: Bad Request: chat not found");
    }

    #[test]
    fn test_failed_envelope_without_description() {
        let err = ApiResponse {
            ok: false,
            result: None,
            description: None,
            error_code: None,
            parameters: None,
        }
        .into_result::<bool>("leaveChat")
        .unwrap_err();
        assert_eq!(err.error_code(), Some(0));
        assert!(err.to_string().contains("leaveChat failed"));
    }

    #[test]
    fn test_result_shape_mismatch_is_decode_error() {
        let err = ApiResponse::success(serde_json::json!("not a user"))
            .into_result::<User>("getMe")
            .unwrap_err();
        assert!(matches!(err, TgError::Decode(_)));
        assert_eq!(err.error_code(), None);
    }

    #[test]
    fn test_flood_parameters_decode() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{"ok": false, "error_code": 429, "description": "Too Many Requests: retry after 5",
                "parameters": {"retry_after": 5}}"#,
        )
        .unwrap();
        assert_eq!(resp.parameters.unwrap().retry_after, Some(5));
    }
}
