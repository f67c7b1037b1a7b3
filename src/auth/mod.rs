//! Session token handling.
//!
//! Sign-in happens on the external identity provider's page; this module
//! only persists the bearer token and user info it hands back, and attaches
//! the token to API calls.

mod storage;

pub use storage::*;

/// Hand control back to the identity provider's sign-in page
pub fn redirect_to_signin() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/signin.html");
        }
    }
}
