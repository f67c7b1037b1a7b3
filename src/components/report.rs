//! Email report view: asks the backend to generate and mail a usage report
//! for a date range.

use leptos::*;

use crate::api::{ApiClient, FetchGeneration};
use crate::models::validate_date_range;

use super::alert::{show_alert, AlertBox, AlertKind, AlertMessage};
use super::default_date_range;

#[derive(Debug, Clone, PartialEq)]
enum ReportState {
    Idle,
    Sending,
    Sent {
        recipient: String,
        start: String,
        end: String,
    },
    Failed(String),
}

/// Minimal recipient check: one '@', a non-empty local part and a dotted
/// domain, no whitespace.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.split('.').count() >= 2
                && domain.split('.').all(|segment| !segment.is_empty())
        }
        _ => false,
    }
}

#[component]
pub fn ReportTab() -> impl IntoView {
    let (default_start, default_end) = default_date_range();

    let recipient = create_rw_signal(String::new());
    let start_date = create_rw_signal(default_start);
    let end_date = create_rw_signal(default_end);

    let alert = create_rw_signal(None::<AlertMessage>);
    let state = create_rw_signal(ReportState::Idle);
    let generation = FetchGeneration::new();

    let send_report = move |_| {
        let to = recipient.get();
        if to.is_empty() {
            show_alert(alert, AlertKind::Error, "Recipient email is required");
            return;
        }
        if !is_valid_email(&to) {
            show_alert(alert, AlertKind::Error, "Invalid email address");
            return;
        }
        let start = start_date.get();
        let end = end_date.get();
        if let Err(e) = validate_date_range(&start, &end) {
            show_alert(alert, AlertKind::Error, e.to_string());
            return;
        }

        let token = generation.begin();
        state.set(ReportState::Sending);
        spawn_local(async move {
            let outcome = ApiClient::new().send_report(&to, &start, &end).await;
            if !token.is_current() {
                return;
            }
            match outcome {
                Ok(()) => {
                    show_alert(alert, AlertKind::Success, "Report sent");
                    state.set(ReportState::Sent {
                        recipient: to,
                        start,
                        end,
                    });
                }
                Err(e) => {
                    state.set(ReportState::Failed(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="tab-page">
            <h2>"Email Report"</h2>

            {move || alert.get().map(|message| view! { <AlertBox message=message /> })}

            <div class="form-grid">
                <label>
                    "Recipient"
                    <input
                        type="email"
                        placeholder="name@example.com"
                        prop:value=move || recipient.get()
                        on:input=move |ev| recipient.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Start date"
                    <input
                        type="date"
                        prop:value=move || start_date.get()
                        on:input=move |ev| start_date.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "End date"
                    <input
                        type="date"
                        prop:value=move || end_date.get()
                        on:input=move |ev| end_date.set(event_target_value(&ev))
                    />
                </label>
                <button class="primary" on:click=send_report>
                    "Send report"
                </button>
            </div>

            {move || match state.get() {
                ReportState::Idle => ().into_view(),
                ReportState::Sending => view! {
                    <div class="loading">
                        <p>"Generating and sending the report..."</p>
                        <p class="subtitle">"This can take 30-60 seconds"</p>
                    </div>
                }
                .into_view(),
                ReportState::Sent { recipient, start, end } => view! {
                    <div class="alert alert-success">
                        <h3>"Report sent"</h3>
                        <p>
                            <strong>"Recipient: "</strong>
                            {recipient}
                        </p>
                        <p>
                            <strong>"Period: "</strong>
                            {format!("{} to {}", start, end)}
                        </p>
                        <p>
                            "The report contains the overall usage summary, the TOU cost "
                            "analysis, the solar period analysis and an attached spreadsheet."
                        </p>
                    </div>
                }
                .into_view(),
                ReportState::Failed(error) => view! {
                    <div class="alert alert-error">
                        <h3>"Could not send the report"</h3>
                        <p>
                            <strong>"Error: "</strong>
                            {error}
                        </p>
                        <p>"Try again, or contact the administrator."</p>
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
    }
}
