use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::auth;
use crate::models::DataError;

/// API error types, all surfaced inline at the triggering action
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    /// The backend answered `success: false` with this error text
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    MissingData(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Unauthorized - please log in")]
    Unauthorized,
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        ApiError::MissingData(err.to_string())
    }
}

/// Client for the action-discriminated analysis endpoint
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the base URL from window.ENV
    pub fn new() -> Self {
        Self {
            base_url: get_api_url(),
        }
    }

    /// Issue one GET for the given action and deserialize the payload.
    /// Every response is a JSON envelope with a `success` flag; a `false`
    /// flag is returned as `ApiError::Api` with the backend's error text.
    pub async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut url = format!("{}?action={}", self.base_url, action);
        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, js_sys::encode_uri_component(value)));
        }

        let mut request = Request::get(&url);
        if let Some(token) = auth::access_token() {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: gloo_net::http::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == 401 {
            auth::clear_session();
            auth::redirect_to_signin();
            return Err(ApiError::Unauthorized);
        }

        if !response.ok() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Http { status, message });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        check_envelope(&body)?;

        serde_json::from_value(body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject envelopes whose `success` flag is absent or false.
fn check_envelope(body: &Value) -> Result<(), ApiError> {
    let success = body
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if success {
        Ok(())
    } else {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        Err(ApiError::Api(message.to_string()))
    }
}

/// Get API URL from window.ENV or use default
fn get_api_url() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(env) = js_sys::Reflect::get(&window, &JsValue::from_str("ENV")) {
                if !env.is_undefined() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &JsValue::from_str("API_URL")) {
                        if let Some(url) = api_url.as_string() {
                            return url;
                        }
                    }
                }
            }
        }
    }

    // Default fallback
    "https://energy-api.example.com/exec".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success() {
        assert!(check_envelope(&json!({ "success": true, "data": {} })).is_ok());
    }

    #[test]
    fn test_envelope_failure_carries_error_text() {
        let err = check_envelope(&json!({ "success": false, "error": "no rows" })).unwrap_err();
        assert_eq!(err, ApiError::Api("no rows".to_string()));
    }

    #[test]
    fn test_envelope_failure_without_text() {
        let err = check_envelope(&json!({ "success": false })).unwrap_err();
        assert_eq!(err, ApiError::Api("Unknown error".to_string()));
    }

    #[test]
    fn test_envelope_missing_flag_is_failure() {
        assert!(check_envelope(&json!({ "data": {} })).is_err());
    }
}
