use leptos::*;
use leptos_router::*;

use crate::auth;
use crate::state::{topology, use_topology};

/// Layout component with navbar and content outlet
#[component]
pub fn Layout() -> impl IntoView {
    view! {
        <div class="layout">
            <Navbar />
            <main class="main-content">
                <Outlet />
            </main>
        </div>
    }
}

/// Navbar with analysis tabs, the detected topology and the session actions
#[component]
fn Navbar() -> impl IntoView {
    let location = use_location();
    let topology_ctx = use_topology();

    // Check if a path is active
    let is_active = move |path: &str| location.pathname.get().starts_with(path);

    let user_email = auth::user_info().and_then(|u| u.email);

    view! {
        <nav class="navbar">
            <div class="navbar-content">
                <h1 class="navbar-title">"Energy Dashboard"</h1>
                <div class="navbar-tabs">
                    <A
                        href="/tou"
                        class=move || if is_active("/tou") { "tab active" } else { "tab" }
                    >
                        "TOU Analysis"
                    </A>
                    <A
                        href="/solar"
                        class=move || if is_active("/solar") { "tab active" } else { "tab" }
                    >
                        "Solar Analysis"
                    </A>
                    <A
                        href="/year"
                        class=move || if is_active("/year") { "tab active" } else { "tab" }
                    >
                        "Year Analysis"
                    </A>
                    <A
                        href="/report"
                        class=move || if is_active("/report") { "tab active" } else { "tab" }
                    >
                        "Email Report"
                    </A>
                </div>
                <div class="navbar-actions">
                    {move || {
                        topology_ctx.topology.get().map(|t| {
                            let badge_class = if t.is_three_phase {
                                "phase-badge phase-badge-3"
                            } else {
                                "phase-badge phase-badge-1"
                            };
                            view! { <span class=badge_class>{t.describe()}</span> }
                        })
                    }}
                    {user_email.map(|email| view! { <span class="user-email">{email}</span> })}
                    <button class="logout-btn" on:click=move |_| sign_out()>
                        "Sign out"
                    </button>
                </div>
            </div>
        </nav>
    }
}

/// Drop the session and the cached topology, then hand control back to the
/// identity provider's sign-in page.
fn sign_out() {
    auth::clear_session();
    topology::clear_topology();
    auth::redirect_to_signin();
}
