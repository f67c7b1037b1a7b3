//! Time-of-Use analysis view: rate form, stat cards, breakdown table and
//! the energy/cost charts.

use leptos::*;

use crate::analysis::{compute_tou_breakdown, percent_of, TouBreakdown, TouSummary};
use crate::api::{ApiClient, ApiError, FetchGeneration};
use crate::charts;
use crate::models::{validate_date_range, DayType, PhaseTopology, RateConfig};
use crate::state::use_topology;

use super::alert::{show_alert, AlertBox, AlertKind, AlertMessage};
use super::{default_date_range, format_kwh, format_percent, parse_field};

/// Solar window parameters sent with fetches whose view does not expose them
const DEFAULT_SOLAR_START: u32 = 6;
const DEFAULT_SOLAR_END: u32 = 18;

#[derive(Debug, Clone, PartialEq)]
struct TouResults {
    phases: Vec<(String, TouBreakdown)>,
    total: TouBreakdown,
    summary: TouSummary,
}

fn read_rates(
    peak_start: &str,
    peak_end: &str,
    peak_rate: &str,
    offpeak_rate: &str,
    holiday_rate: &str,
) -> Result<RateConfig, String> {
    let rates = RateConfig {
        peak_start_hour: parse_field(peak_start, "peak start")?,
        peak_end_hour: parse_field(peak_end, "peak end")?,
        peak_rate: parse_field(peak_rate, "peak rate")?,
        offpeak_rate: parse_field(offpeak_rate, "off-peak rate")?,
        holiday_rate: parse_field(holiday_rate, "holiday rate")?,
    };
    rates.validate().map_err(|e| e.to_string())?;
    Ok(rates)
}

/// Fetch the records for the range and reduce them, once per phase plus
/// once for the combined total.
async fn load_tou(
    client: &ApiClient,
    topology: &PhaseTopology,
    start_date: &str,
    end_date: &str,
    rates: &RateConfig,
) -> Result<TouResults, ApiError> {
    if topology.is_three_phase {
        let data = client
            .get_data_3phase(start_date, end_date, DEFAULT_SOLAR_START, DEFAULT_SOLAR_END)
            .await?;
        let phases = data
            .named_phases()
            .into_iter()
            .map(|(name, series)| (name.to_string(), compute_tou_breakdown(&series.hourly, rates)))
            .collect();
        let total = compute_tou_breakdown(&data.total.hourly, rates);
        Ok(TouResults {
            phases,
            total,
            summary: total.summary(rates),
        })
    } else {
        let phase = topology
            .phase_list()
            .into_iter()
            .next()
            .unwrap_or_else(|| "A".to_string());
        let series = client
            .get_phase_data(
                &phase,
                start_date,
                end_date,
                DEFAULT_SOLAR_START,
                DEFAULT_SOLAR_END,
            )
            .await?;
        let total = compute_tou_breakdown(&series.hourly, rates);
        Ok(TouResults {
            phases: vec![(phase, total)],
            total,
            summary: total.summary(rates),
        })
    }
}

#[component]
pub fn TouTab() -> impl IntoView {
    let topology_ctx = use_topology();
    let (default_start, default_end) = default_date_range();

    let start_date = create_rw_signal(default_start);
    let end_date = create_rw_signal(default_end);
    let peak_start = create_rw_signal("9".to_string());
    let peak_end = create_rw_signal("22".to_string());
    let peak_rate = create_rw_signal("4.50".to_string());
    let offpeak_rate = create_rw_signal("2.50".to_string());
    let holiday_rate = create_rw_signal("2.50".to_string());

    let alert = create_rw_signal(None::<AlertMessage>);
    let loading = create_rw_signal(false);
    let results = create_rw_signal(None::<TouResults>);
    let generation = FetchGeneration::new();

    let run_analysis = move |_| {
        let rates = match read_rates(
            &peak_start.get(),
            &peak_end.get(),
            &peak_rate.get(),
            &offpeak_rate.get(),
            &holiday_rate.get(),
        ) {
            Ok(rates) => rates,
            Err(message) => {
                show_alert(alert, AlertKind::Error, message);
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
            let outcome = load_tou(&ApiClient::new(), &topology, &start, &end, &rates).await;
            if !token.is_current() {
                // a newer request superseded this one
                return;
            }
            loading.set(false);
            match outcome {
                Ok(tou) => results.set(Some(tou)),
                Err(e) => {
                    results.set(None);
                    show_alert(alert, AlertKind::Error, format!("TOU analysis failed: {}", e));
                }
            }
        });
    };

    // Charts follow the newest results
    create_effect(move |_| match results.get() {
        Some(tou) => {
            charts::bridge::render_pie_chart(
                "tou-type-chart",
                &charts::tou_energy_distribution(&tou.total),
                "Energy distribution",
            );
            charts::bridge::render_bar_chart(
                "tou-cost-chart",
                &charts::tou_cost_comparison(&tou.total),
                "Cost comparison",
            );
        }
        None => {
            charts::bridge::destroy_chart("tou-type-chart");
            charts::bridge::destroy_chart("tou-cost-chart");
        }
    });

    view! {
        <div class="tab-page">
            <h2>"TOU Cost Analysis"</h2>

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
                    "Peak start hour"
                    <input
                        type="number"
                        prop:value=move || peak_start.get()
                        on:input=move |ev| peak_start.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Peak end hour"
                    <input
                        type="number"
                        prop:value=move || peak_end.get()
                        on:input=move |ev| peak_end.set(event_target_value(&ev))
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
                <label>
                    "Off-peak rate"
                    <input
                        type="number"
                        step="0.01"
                        prop:value=move || offpeak_rate.get()
                        on:input=move |ev| offpeak_rate.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Holiday rate"
                    <input
                        type="number"
                        step="0.01"
                        prop:value=move || holiday_rate.get()
                        on:input=move |ev| holiday_rate.set(event_target_value(&ev))
                    />
                </label>
                <button class="primary" on:click=run_analysis>
                    "Analyze"
                </button>
            </div>

            {move || loading.get().then(|| view! { <div class="loading">"Loading..."</div> })}

            {move || results.get().map(|tou| view! { <TouResultsView results=tou /> })}
        </div>
    }
}

#[component]
fn TouResultsView(results: TouResults) -> impl IntoView {
    let summary = results.summary;
    let total = results.total;
    let show_phases = results.phases.len() > 1;

    view! {
        <div class="section">
            <div class="stats-grid">
                <StatCard label="Total energy" value=format_kwh(summary.total_energy) unit="kWh" />
                <StatCard label="Total cost" value=format_kwh(summary.total_cost) unit="" />
                <StatCard label="Average rate" value=format_kwh(summary.avg_rate) unit="per kWh" />
                <StatCard
                    label="Potential savings"
                    value=format_kwh(summary.potential_savings)
                    unit=""
                />
            </div>

            <table class="tou-table">
                <thead>
                    <tr>
                        <th>"Day type"</th>
                        <th>"Period"</th>
                        <th>"Energy (kWh)"</th>
                        <th>"Cost"</th>
                        <th>"Share"</th>
                    </tr>
                </thead>
                <tbody>
                    <BucketRow
                        day_type=DayType::Normal.as_str()
                        period="Peak"
                        energy=total.peak_normal.energy
                        cost=total.peak_normal.cost
                        total_energy=total.overall.total_energy
                    />
                    <BucketRow
                        day_type=DayType::Normal.as_str()
                        period="Off-peak"
                        energy=total.offpeak_normal.energy
                        cost=total.offpeak_normal.cost
                        total_energy=total.overall.total_energy
                    />
                    <BucketRow
                        day_type=DayType::NationalHoliday.as_str()
                        period="All day"
                        energy=total.holiday.energy
                        cost=total.holiday.cost
                        total_energy=total.overall.total_energy
                    />
                    <BucketRow
                        day_type=DayType::Weekend.as_str()
                        period="All day"
                        energy=total.weekend.energy
                        cost=total.weekend.cost
                        total_energy=total.overall.total_energy
                    />
                    <tr class="total-row">
                        <td colspan="2">"Total"</td>
                        <td>{format_kwh(total.overall.total_energy)}</td>
                        <td>{format_kwh(total.overall.total_cost)}</td>
                        <td>"100%"</td>
                    </tr>
                </tbody>
            </table>

            {show_phases.then(|| view! {
                <table class="tou-table">
                    <thead>
                        <tr>
                            <th>"Phase"</th>
                            <th>"Energy (kWh)"</th>
                            <th>"Cost"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {results
                            .phases
                            .iter()
                            .map(|(name, tou)| view! {
                                <tr>
                                    <td>{format!("Phase {}", name)}</td>
                                    <td>{format_kwh(tou.overall.total_energy)}</td>
                                    <td>{format_kwh(tou.overall.total_cost)}</td>
                                </tr>
                            })
                            .collect_view()}
                    </tbody>
                </table>
            })}

            <div class="chart-row">
                <div id="tou-type-chart" class="chart-container"></div>
                <div id="tou-cost-chart" class="chart-container"></div>
            </div>
        </div>
    }
}

#[component]
fn BucketRow(
    day_type: &'static str,
    period: &'static str,
    energy: f64,
    cost: f64,
    total_energy: f64,
) -> impl IntoView {
    view! {
        <tr>
            <td>{day_type}</td>
            <td>{period}</td>
            <td>{format_kwh(energy)}</td>
            <td>{format_kwh(cost)}</td>
            <td>{format_percent(percent_of(energy, total_energy))} "%"</td>
        </tr>
    }
}

#[component]
pub fn StatCard(label: &'static str, value: String, unit: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-label">{label}</div>
            <div class="stat-value">{value}</div>
            <div class="stat-unit">{unit}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rates() {
        let rates = read_rates("9", "22", "4.50", "2.50", "2.50").unwrap();
        assert_eq!(rates.peak_start_hour, 9);
        assert_eq!(rates.peak_end_hour, 22);
        assert!((rates.peak_rate - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_read_rates_rejects_bad_numbers() {
        assert!(read_rates("x", "22", "4.50", "2.50", "2.50").is_err());
    }

    #[test]
    fn test_read_rates_rejects_inverted_window() {
        let err = read_rates("22", "9", "4.50", "2.50", "2.50").unwrap_err();
        assert!(err.contains("Peak window"));
    }
}
