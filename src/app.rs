use leptos::*;
use leptos_router::*;

use crate::auth;
use crate::components::layout::Layout;
use crate::components::{ReportTab, SolarTab, TouTab, YearTab};
use crate::state::provide_topology_context;

/// Main application component with routing
#[component]
pub fn App() -> impl IntoView {
    // The identity provider owns sign-in; without a live token there is
    // nothing this page can fetch.
    if !auth::is_authenticated() {
        log::warn!("no valid session token, redirecting to sign-in");
        auth::redirect_to_signin();
    }

    // Resolve the metering topology once for the whole session
    provide_topology_context();

    view! {
        <Router>
            <Routes>
                <Route path="/" view=Layout>
                    <Route path="" view=|| view! { <Redirect path="/tou" /> } />
                    <Route path="tou" view=TouTab />
                    <Route path="solar" view=SolarTab />
                    <Route path="year" view=YearTab />
                    <Route path="report" view=ReportTab />
                </Route>
            </Routes>
        </Router>
    }
}
