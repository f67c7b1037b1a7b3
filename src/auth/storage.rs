//! Bearer token and user info persistence in browser localStorage

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

const TOKEN_KEY: &str = "identity_token";
const TOKEN_EXPIRY_KEY: &str = "identity_token_expiry";
const USER_INFO_KEY: &str = "identity_user";

/// Signed-in user as reported by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Store the bearer token handed over by the identity provider
pub fn store_access_token(token: &str) {
    let _ = LocalStorage::set(TOKEN_KEY, token);
}

/// Get the bearer token, if any
pub fn access_token() -> Option<String> {
    LocalStorage::get(TOKEN_KEY).ok()
}

/// Store the token expiry timestamp (epoch milliseconds)
pub fn store_token_expiry(expiry_ms: u64) {
    let _ = LocalStorage::set(TOKEN_EXPIRY_KEY, expiry_ms.to_string());
}

/// Get the token expiry timestamp
pub fn token_expiry() -> Option<u64> {
    LocalStorage::get::<String>(TOKEN_EXPIRY_KEY)
        .ok()
        .and_then(|s| s.parse().ok())
}

/// Store user info
pub fn store_user_info(user_info: &UserInfo) {
    let _ = LocalStorage::set(USER_INFO_KEY, user_info);
}

/// Get stored user info
pub fn user_info() -> Option<UserInfo> {
    LocalStorage::get(USER_INFO_KEY).ok()
}

/// Clear the whole session from storage
pub fn clear_session() {
    LocalStorage::delete(TOKEN_KEY);
    LocalStorage::delete(TOKEN_EXPIRY_KEY);
    LocalStorage::delete(USER_INFO_KEY);
}

/// Check if the session holds a non-expired token. Tokens within five
/// minutes of expiry count as expired so in-flight requests do not outlive
/// them.
pub fn is_authenticated() -> bool {
    match (access_token(), token_expiry()) {
        (Some(_), Some(expiry)) => {
            let now = js_sys::Date::now() as u64;
            let buffer_ms = 5 * 60 * 1000;
            now < expiry.saturating_sub(buffer_ms)
        }
        _ => false,
    }
}
