//! Browser storage round-trips for the session and topology blobs.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use energy_web_leptos::auth;
use energy_web_leptos::models::PhaseTopology;
use energy_web_leptos::state::topology;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn topology_round_trip() {
    topology::clear_topology();
    assert!(topology::load_topology().is_none());

    let detected = PhaseTopology {
        is_three_phase: true,
        phases: vec!["A".into(), "B".into(), "C".into()],
    };
    topology::save_topology(&detected);
    assert_eq!(topology::load_topology(), Some(detected));

    topology::clear_topology();
    assert!(topology::load_topology().is_none());
}

#[wasm_bindgen_test]
fn session_round_trip() {
    auth::clear_session();
    assert!(auth::access_token().is_none());
    assert!(!auth::is_authenticated());

    auth::store_access_token("token-123");
    // expires in one hour
    let expiry = js_sys::Date::now() as u64 + 60 * 60 * 1000;
    auth::store_token_expiry(expiry);
    assert_eq!(auth::access_token().as_deref(), Some("token-123"));
    assert!(auth::is_authenticated());

    // a token at the edge of its lifetime no longer counts
    auth::store_token_expiry(js_sys::Date::now() as u64 + 1000);
    assert!(!auth::is_authenticated());

    auth::clear_session();
    assert!(auth::access_token().is_none());
}
