//! Year analysis view: yearly rollup, monthly table, trend and the
//! year-over-year comparison.

use chrono::Datelike;
use leptos::*;

use crate::analysis::{
    analyze_year, compare_years, month_name, percent_of, Trend, YearComparison, YearSummary,
};
use crate::api::{ApiClient, ApiError, FetchGeneration};
use crate::charts;
use crate::models::PhaseTopology;
use crate::state::use_topology;

use super::alert::{show_alert, AlertBox, AlertKind, AlertMessage};
use super::tou::StatCard;
use super::{format_kwh, format_percent, parse_field};

const DEFAULT_SOLAR_START: u32 = 6;
const DEFAULT_SOLAR_END: u32 = 18;
const FIRST_SELECTABLE_YEAR: i32 = 2020;

/// Years offered by the pickers, newest first
fn year_options() -> Vec<i32> {
    let current = chrono::Local::now().year();
    (FIRST_SELECTABLE_YEAR..=current).rev().collect()
}

/// Fetch the daily records of one calendar year and roll them up
async fn load_year(
    client: &ApiClient,
    topology: &PhaseTopology,
    year: i32,
) -> Result<YearSummary, ApiError> {
    let start = format!("{}-01-01", year);
    let end = format!("{}-12-31", year);

    let daily = if topology.is_three_phase {
        client
            .get_data_3phase(&start, &end, DEFAULT_SOLAR_START, DEFAULT_SOLAR_END)
            .await?
            .total
            .daily
    } else {
        let phase = topology
            .phase_list()
            .into_iter()
            .next()
            .unwrap_or_else(|| "A".to_string());
        client
            .get_phase_data(&phase, &start, &end, DEFAULT_SOLAR_START, DEFAULT_SOLAR_END)
            .await?
            .daily
    };

    Ok(analyze_year(&daily, year))
}

fn trend_class(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "alert alert-warning",
        Trend::Down => "alert alert-success",
        Trend::Stable => "alert alert-info",
    }
}

#[component]
pub fn YearTab() -> impl IntoView {
    let topology_ctx = use_topology();
    let years = year_options();
    let current_year = years.first().copied().unwrap_or(FIRST_SELECTABLE_YEAR);

    let selected_year = create_rw_signal(current_year.to_string());
    let compare_base = create_rw_signal((current_year - 1).to_string());
    let compare_other = create_rw_signal(current_year.to_string());

    let alert = create_rw_signal(None::<AlertMessage>);
    let loading = create_rw_signal(false);
    let results = create_rw_signal(None::<YearSummary>);
    let generation = FetchGeneration::new();

    let compare_loading = create_rw_signal(false);
    let compare_results = create_rw_signal(None::<(YearSummary, YearSummary, YearComparison)>);
    let compare_generation = FetchGeneration::new();

    let run_analysis = move |_| {
        let year = match parse_field::<i32>(&selected_year.get(), "year") {
            Ok(year) => year,
            Err(message) => {
                show_alert(alert, AlertKind::Error, message);
                return;
            }
        };

        let topology = topology_ctx.current();
        let token = generation.begin();
        loading.set(true);
        spawn_local(async move {
            let outcome = load_year(&ApiClient::new(), &topology, year).await;
            if !token.is_current() {
                return;
            }
            loading.set(false);
            match outcome {
                Ok(summary) => results.set(Some(summary)),
                Err(e) => {
                    results.set(None);
                    show_alert(alert, AlertKind::Error, format!("Year analysis failed: {}", e));
                }
            }
        });
    };

    let run_comparison = move |_| {
        let base_year = match parse_field::<i32>(&compare_base.get(), "year") {
            Ok(year) => year,
            Err(message) => {
                show_alert(alert, AlertKind::Error, message);
                return;
            }
        };
        let other_year = match parse_field::<i32>(&compare_other.get(), "year") {
            Ok(year) => year,
            Err(message) => {
                show_alert(alert, AlertKind::Error, message);
                return;
            }
        };
        if base_year == other_year {
            show_alert(alert, AlertKind::Error, "Pick two different years");
            return;
        }

        let topology = topology_ctx.current();
        let token = compare_generation.begin();
        compare_loading.set(true);
        spawn_local(async move {
            let client = ApiClient::new();
            let outcome = async {
                let base = load_year(&client, &topology, base_year).await?;
                let other = load_year(&client, &topology, other_year).await?;
                let comparison = compare_years(&base, &other);
                Ok::<_, ApiError>((base, other, comparison))
            }
            .await;
            if !token.is_current() {
                return;
            }
            compare_loading.set(false);
            match outcome {
                Ok(compared) => compare_results.set(Some(compared)),
                Err(e) => {
                    compare_results.set(None);
                    show_alert(alert, AlertKind::Error, format!("Comparison failed: {}", e));
                }
            }
        });
    };

    create_effect(move |_| match results.get() {
        Some(summary) => {
            charts::bridge::render_bar_chart(
                "year-monthly-chart",
                &charts::monthly_energy(&summary),
                "Monthly energy",
            );
            charts::bridge::render_line_chart(
                "year-avg-chart",
                &charts::monthly_daily_average(&summary),
                "Average per day by month",
            );
            charts::bridge::render_pie_chart(
                "year-distribution-chart",
                &charts::monthly_energy(&summary),
                "Monthly distribution",
            );
            charts::bridge::render_line_chart(
                "year-comparison-chart",
                &charts::monthly_vs_average(&summary),
                "Actual vs average",
            );
        }
        None => {
            for id in [
                "year-monthly-chart",
                "year-avg-chart",
                "year-distribution-chart",
                "year-comparison-chart",
            ] {
                charts::bridge::destroy_chart(id);
            }
        }
    });

    create_effect(move |_| match compare_results.get() {
        Some((base, other, _)) => {
            charts::bridge::render_line_chart(
                "year-compare-chart",
                &charts::year_comparison_series(&base, &other),
                "Monthly energy by year",
            );
        }
        None => charts::bridge::destroy_chart("year-compare-chart"),
    });

    let year_select_options = move |signal: RwSignal<String>| {
        year_options()
            .into_iter()
            .map(|year| {
                let value = year.to_string();
                let selected = signal.get_untracked() == value;
                view! {
                    <option value=value.clone() selected=selected>{value.clone()}</option>
                }
            })
            .collect_view()
    };

    view! {
        <div class="tab-page">
            <h2>"Year Analysis"</h2>

            {move || alert.get().map(|message| view! { <AlertBox message=message /> })}

            <div class="form-grid">
                <label>
                    "Year"
                    <select on:change=move |ev| selected_year.set(event_target_value(&ev))>
                        {year_select_options(selected_year)}
                    </select>
                </label>
                <button class="primary" on:click=run_analysis>
                    "Analyze"
                </button>
            </div>

            {move || loading.get().then(|| view! { <div class="loading">"Loading..."</div> })}

            {move || results.get().map(|summary| view! { <YearResultsView summary=summary /> })}

            <h2>"Compare Years"</h2>

            <div class="form-grid">
                <label>
                    "From year"
                    <select on:change=move |ev| compare_base.set(event_target_value(&ev))>
                        {year_select_options(compare_base)}
                    </select>
                </label>
                <label>
                    "To year"
                    <select on:change=move |ev| compare_other.set(event_target_value(&ev))>
                        {year_select_options(compare_other)}
                    </select>
                </label>
                <button class="primary" on:click=run_comparison>
                    "Compare"
                </button>
            </div>

            {move || {
                compare_loading.get().then(|| view! { <div class="loading">"Loading..."</div> })
            }}

            {move || {
                compare_results
                    .get()
                    .map(|(base, other, comparison)| view! {
                        <YearComparisonView base=base other=other comparison=comparison />
                    })
            }}
        </div>
    }
}

#[component]
fn YearResultsView(summary: YearSummary) -> impl IntoView {
    let total_energy = summary.total_energy;
    let peak = summary
        .peak_month
        .map(|m| format!("{} ({} kWh)", month_name(m.month), format_kwh(m.energy)))
        .unwrap_or_else(|| "-".to_string());
    let lowest = summary
        .lowest_month
        .map(|m| format!("{} ({} kWh)", month_name(m.month), format_kwh(m.energy)))
        .unwrap_or_else(|| "-".to_string());

    view! {
        <div class="section">
            <div class="stats-grid">
                <StatCard label="Total energy" value=format_kwh(summary.total_energy) unit="kWh" />
                <StatCard
                    label="Average per month"
                    value=format_kwh(summary.monthly_avg)
                    unit="kWh/month"
                />
                <StatCard
                    label="Average per day"
                    value=format_kwh(summary.daily_avg)
                    unit="kWh/day"
                />
                <StatCard label="Trend" value=summary.trend.as_str().to_string() unit="" />
            </div>

            <div class=trend_class(summary.trend)>
                <h3>{format!("Year {} overview", summary.year)}</h3>
                <p>
                    <strong>"Highest month: "</strong>
                    {peak}
                </p>
                <p>
                    <strong>"Lowest month: "</strong>
                    {lowest}
                </p>
                <p>
                    <strong>"Usage trend: "</strong>
                    {summary.trend.as_str()}
                </p>
            </div>

            <table class="tou-table">
                <thead>
                    <tr>
                        <th>"Month"</th>
                        <th>"Energy (kWh)"</th>
                        <th>"Days"</th>
                        <th>"Average per day"</th>
                        <th>"Share of year"</th>
                    </tr>
                </thead>
                <tbody>
                    {summary
                        .monthly
                        .iter()
                        .map(|month| view! {
                            <tr>
                                <td>{month_name(month.month)}</td>
                                <td>{format_kwh(month.energy)}</td>
                                <td>{month.days}</td>
                                <td>{format_kwh(month.avg_per_day)}</td>
                                <td>
                                    {format_percent(percent_of(month.energy, total_energy))}
                                    "%"
                                </td>
                            </tr>
                        })
                        .collect_view()}
                    <tr class="total-row">
                        <td>"Total"</td>
                        <td>{format_kwh(summary.total_energy)}</td>
                        <td>"-"</td>
                        <td>{format_kwh(summary.daily_avg)}</td>
                        <td>"100%"</td>
                    </tr>
                </tbody>
            </table>

            <div class="chart-row">
                <div id="year-monthly-chart" class="chart-container"></div>
                <div id="year-avg-chart" class="chart-container"></div>
                <div id="year-distribution-chart" class="chart-container"></div>
                <div id="year-comparison-chart" class="chart-container"></div>
            </div>
        </div>
    }
}

#[component]
fn YearComparisonView(
    base: YearSummary,
    other: YearSummary,
    comparison: YearComparison,
) -> impl IntoView {
    let direction = comparison.direction;

    view! {
        <div class="section">
            <div class="stats-grid">
                <StatCard
                    label=""
                    value=format!("{}: {} kWh", base.year, format_kwh(base.total_energy))
                    unit=""
                />
                <StatCard
                    label=""
                    value=format!("{}: {} kWh", other.year, format_kwh(other.total_energy))
                    unit=""
                />
                <StatCard
                    label="Difference"
                    value=format_kwh(comparison.diff.abs())
                    unit="kWh"
                />
                <StatCard
                    label="Change"
                    value=format!("{}%", format_percent(comparison.percent_change))
                    unit=""
                />
            </div>

            <div class=trend_class(direction)>
                <strong>
                    {format!(
                        "Usage is {} by {} kWh ({}%) from {} to {}",
                        direction.as_str(),
                        format_kwh(comparison.diff.abs()),
                        format_percent(comparison.percent_change),
                        base.year,
                        other.year,
                    )}
                </strong>
            </div>

            <div id="year-compare-chart" class="chart-container"></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_options_are_descending_from_current() {
        let years = year_options();
        assert!(!years.is_empty());
        assert_eq!(*years.last().unwrap(), FIRST_SELECTABLE_YEAR);
        for pair in years.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_trend_classes() {
        assert_eq!(trend_class(Trend::Up), "alert alert-warning");
        assert_eq!(trend_class(Trend::Down), "alert alert-success");
        assert_eq!(trend_class(Trend::Stable), "alert alert-info");
    }
}
