//! Inline alerts shown at the top of the active view

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Info,
}

impl AlertKind {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Error => "alert alert-error",
            Self::Info => "alert alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub kind: AlertKind,
    pub text: String,
}

/// Show an inline alert that dismisses itself after five seconds
pub fn show_alert(alert: RwSignal<Option<AlertMessage>>, kind: AlertKind, text: impl Into<String>) {
    alert.set(Some(AlertMessage {
        kind,
        text: text.into(),
    }));

    #[cfg(target_arch = "wasm32")]
    {
        use gloo_timers::callback::Timeout;

        Timeout::new(5_000, move || alert.set(None)).forget();
    }
}

#[component]
pub fn AlertBox(message: AlertMessage) -> impl IntoView {
    view! {
        <div class=message.kind.class()>{message.text}</div>
    }
}
