//! Solar analysis view: window/installation form, usage stats and the
//! sizing estimate with its recommendation.

use leptos::*;

use crate::analysis::{estimate_solar, period_days, Recommendation, SolarAnalysis};
use crate::api::{ApiClient, ApiError, FetchGeneration};
use crate::charts;
use crate::models::{validate_date_range, PhaseTopology, SolarConfig, SolarWindowUsage};
use crate::state::use_topology;

use super::alert::{show_alert, AlertBox, AlertKind, AlertMessage};
use super::tou::StatCard;
use super::{default_date_range, format_kwh, format_percent, parse_field};

#[derive(Debug, Clone, PartialEq)]
struct SolarResults {
    usage: SolarWindowUsage,
    analysis: SolarAnalysis,
    config: SolarConfig,
}

fn read_solar_config(
    start_hour: &str,
    end_hour: &str,
    capacity: &str,
    efficiency: &str,
) -> Result<SolarConfig, String> {
    let config = SolarConfig {
        solar_start_hour: parse_field(start_hour, "solar start")?,
        solar_end_hour: parse_field(end_hour, "solar end")?,
        capacity_kw: parse_field(capacity, "capacity")?,
        efficiency_percent: parse_field(efficiency, "efficiency")?,
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Fetch the solar-window summary for the range and estimate the
/// installation against it. Three-phase metering uses the combined total.
async fn load_solar(
    client: &ApiClient,
    topology: &PhaseTopology,
    start_date: &str,
    end_date: &str,
    config: &SolarConfig,
    peak_rate: f64,
) -> Result<SolarResults, ApiError> {
    let usage = if topology.is_three_phase {
        client
            .get_data_3phase(
                start_date,
                end_date,
                config.solar_start_hour,
                config.solar_end_hour,
            )
            .await?
            .total
            .solar
    } else {
        let phase = topology
            .phase_list()
            .into_iter()
            .next()
            .unwrap_or_else(|| "A".to_string());
        client
            .get_phase_data(
                &phase,
                start_date,
                end_date,
                config.solar_start_hour,
                config.solar_end_hour,
            )
            .await?
            .solar
    };

    let days = period_days(&usage);
    let analysis = estimate_solar(&usage, config, peak_rate, days);
    Ok(SolarResults {
        usage,
        analysis,
        config: *config,
    })
}

fn recommendation_class(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Excellent => "alert alert-success",
        Recommendation::Moderate => "alert alert-info",
        Recommendation::Weak | Recommendation::Poor => "alert alert-error",
    }
}

#[component]
pub fn SolarTab() -> impl IntoView {
    let topology_ctx = use_topology();
    let (default_start, default_end) = default_date_range();

    let start_date = create_rw_signal(default_start);
    let end_date = create_rw_signal(default_end);
    let solar_start = create_rw_signal("6".to_string());
    let solar_end = create_rw_signal("18".to_string());
    let capacity = create_rw_signal("5".to_string());
    let efficiency = create_rw_signal("80".to_string());
    let peak_rate = create_rw_signal("4.50".to_string());

    let alert = create_rw_signal(None::<AlertMessage>);
    let loading = create_rw_signal(false);
    let results = create_rw_signal(None::<SolarResults>);
    let generation = FetchGeneration::new();

    let run_analysis = move |_| {
        let config = match read_solar_config(
            &solar_start.get(),
            &solar_end.get(),
            &capacity.get(),
            &efficiency.get(),
        ) {
            Ok(config) => config,
            Err(message) => {
                show_alert(alert, AlertKind::Error, message);
                return;
            }
        };
        let rate = match parse_field::<f64>(&peak_rate.get(), "peak rate") {
            Ok(rate) if rate > 0.0 => rate,
            _ => {
                show_alert(alert, AlertKind::Error, "Invalid value for peak rate");
                return;
            }
        };
        let start = start_date.get();
        let end = end_date.get();
        if let Err(e) = validate_date_range(&start, &end) {
            show_alert(alert, AlertKind::Error, e.to_string());
            return;
        }

        let topology = topology_ctx.current();
        let token = generation.begin();
        loading.set(true);
        spawn_local(async move {
            let outcome =
                load_solar(&ApiClient::new(), &topology, &start, &end, &config, rate).await;
            if !token.is_current() {
                return;
            }
            loading.set(false);
            match outcome {
                Ok(solar) => results.set(Some(solar)),
                Err(e) => {
                    results.set(None);
                    show_alert(
                        alert,
                        AlertKind::Error,
                        format!("Solar analysis failed: {}", e),
                    );
                }
            }
        });
    };

    create_effect(move |_| match results.get() {
        Some(solar) => {
            if !solar.usage.solar_daily.is_empty() {
                charts::bridge::render_line_chart(
                    "solar-usage-chart",
                    &charts::solar_daily_usage(&solar.usage.solar_daily),
                    "Daily solar window usage",
                );
            }
            charts::bridge::render_bar_chart(
                "solar-savings-chart",
                &charts::solar_savings_comparison(
                    solar.config.capacity_kw,
                    solar.analysis.savings_estimate,
                ),
                "Cost comparison",
            );
        }
        None => {
            charts::bridge::destroy_chart("solar-usage-chart");
            charts::bridge::destroy_chart("solar-savings-chart");
        }
    });

    view! {
        <div class="tab-page">
            <h2>"Solar Period Analysis"</h2>

            {move || alert.get().map(|message| view! { <AlertBox message=message /> })}

            <div class="form-grid">
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
                <label>
                    "Solar start hour"
                    <input
                        type="number"
                        prop:value=move || solar_start.get()
                        on:input=move |ev| solar_start.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Solar end hour"
                    <input
                        type="number"
                        prop:value=move || solar_end.get()
                        on:input=move |ev| solar_end.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Capacity (kW)"
                    <input
                        type="number"
                        step="0.1"
                        prop:value=move || capacity.get()
                        on:input=move |ev| capacity.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Efficiency (%)"
                    <input
                        type="number"
                        prop:value=move || efficiency.get()
                        on:input=move |ev| efficiency.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Peak rate"
                    <input
                        type="number"
                        step="0.01"
                        prop:value=move || peak_rate.get()
                        on:input=move |ev| peak_rate.set(event_target_value(&ev))
                    />
                </label>
                <button class="primary" on:click=run_analysis>
                    "Analyze"
                </button>
            </div>

            {move || loading.get().then(|| view! { <div class="loading">"Loading..."</div> })}

            {move || results.get().map(|solar| view! { <SolarResultsView results=solar /> })}
        </div>
    }
}

#[component]
fn SolarResultsView(results: SolarResults) -> impl IntoView {
    let usage = results.usage.clone();
    let analysis = results.analysis;
    let recommendation = Recommendation::from_coverage(analysis.coverage_percent);

    view! {
        <div class="section">
            <div class="stats-grid">
                <StatCard
                    label="Solar window usage"
                    value=format_kwh(usage.total_solar)
                    unit="kWh"
                />
                <StatCard label="Average per day" value=format_kwh(usage.avg_per_day) unit="kWh/day" />
                <StatCard
                    label="Average per hour"
                    value=format_kwh(usage.avg_per_hour)
                    unit="kWh/hour"
                />
                <StatCard label="Peak hour" value=usage.peak_hour.to_string() unit="h" />
            </div>

            <div class="alert alert-info">
                <h3>"Solar Installation Analysis"</h3>
                <p>
                    <strong>"Capacity: "</strong>
                    {format_kwh(results.config.capacity_kw)}
                    " kW"
                </p>
                <p>
                    <strong>"Estimated generation: "</strong>
                    {format_kwh(analysis.estimated_generation)}
                    " kWh"
                </p>
                <p>
                    <strong>"Coverage of window usage: "</strong>
                    {format_percent(analysis.coverage_percent)}
                    "%"
                </p>
                <p>
                    <strong>"Estimated savings: "</strong>
                    {format_kwh(analysis.savings_estimate)}
                </p>
                <p>
                    <strong>"Estimated payback: "</strong>
                    {format_percent(analysis.payback_years)}
                    " years"
                </p>
            </div>

            <div class=recommendation_class(recommendation)>
                <strong>"Recommendation: "</strong>
                {recommendation.advice()}
            </div>

            <div class="chart-row">
                <div id="solar-usage-chart" class="chart-container"></div>
                <div id="solar-savings-chart" class="chart-container"></div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_solar_config() {
        let config = read_solar_config("6", "18", "5", "80").unwrap();
        assert_eq!(config.solar_start_hour, 6);
        assert_eq!(config.solar_end_hour, 18);
        assert!((config.capacity_kw - 5.0).abs() < 1e-9);
        assert!((config.efficiency_percent - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_read_solar_config_rejects_invalid_window() {
        assert!(read_solar_config("18", "6", "5", "80").is_err());
        assert!(read_solar_config("6", "18", "0", "80").is_err());
        assert!(read_solar_config("6", "18", "5", "120").is_err());
    }

    #[test]
    fn test_recommendation_classes() {
        assert_eq!(
            recommendation_class(Recommendation::Excellent),
            "alert alert-success"
        );
        assert_eq!(
            recommendation_class(Recommendation::Moderate),
            "alert alert-info"
        );
        assert_eq!(recommendation_class(Recommendation::Poor), "alert alert-error");
    }
}
