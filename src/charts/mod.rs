//! Chart-ready series derived from engine results.
//!
//! Builders here produce plain label/series data; drawing is delegated to
//! the external charting library through [`bridge`].

pub mod bridge;

use serde::Serialize;

use crate::analysis::{month_name, TouBreakdown, YearSummary};
use crate::models::DailyRecord;

/// One named numeric series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Labels plus one or more named series, the shape every renderer consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    fn single(labels: Vec<String>, label: &str, data: Vec<f64>) -> Self {
        Self {
            labels,
            datasets: vec![Dataset {
                label: label.to_string(),
                data,
            }],
        }
    }
}

const TOU_BUCKET_LABELS: [&str; 4] = [
    "Normal (peak)",
    "Normal (off-peak)",
    "National holiday",
    "Weekend",
];

/// Energy split across the four TOU buckets (pie)
pub fn tou_energy_distribution(tou: &TouBreakdown) -> ChartData {
    ChartData::single(
        TOU_BUCKET_LABELS.iter().map(|l| l.to_string()).collect(),
        "Energy (kWh)",
        vec![
            tou.peak_normal.energy,
            tou.offpeak_normal.energy,
            tou.holiday.energy,
            tou.weekend.energy,
        ],
    )
}

/// Cost per TOU bucket (bar)
pub fn tou_cost_comparison(tou: &TouBreakdown) -> ChartData {
    ChartData::single(
        TOU_BUCKET_LABELS.iter().map(|l| l.to_string()).collect(),
        "Cost",
        vec![
            tou.peak_normal.cost,
            tou.offpeak_normal.cost,
            tou.holiday.cost,
            tou.weekend.cost,
        ],
    )
}

/// Daily consumption inside the solar window (line)
pub fn solar_daily_usage(daily: &[DailyRecord]) -> ChartData {
    ChartData::single(
        daily.iter().map(|d| d.date.to_string()).collect(),
        "Solar window usage (kWh)",
        daily.iter().map(|d| d.solar.unwrap_or(0.0)).collect(),
    )
}

/// Remaining window cost with and without the installation (bar)
pub fn solar_savings_comparison(capacity_kw: f64, savings_estimate: f64) -> ChartData {
    ChartData::single(
        vec![
            "No solar".to_string(),
            format!("Solar {} kW", capacity_kw),
        ],
        "Cost",
        vec![savings_estimate, 0.0],
    )
}

fn month_labels(summary: &YearSummary) -> Vec<String> {
    summary
        .monthly
        .iter()
        .map(|m| month_name(m.month).to_string())
        .collect()
}

/// Energy per calendar month (bar, also used for the distribution pie)
pub fn monthly_energy(summary: &YearSummary) -> ChartData {
    ChartData::single(
        month_labels(summary),
        "Energy (kWh)",
        summary.monthly.iter().map(|m| m.energy).collect(),
    )
}

/// Average consumption per day for each month (line)
pub fn monthly_daily_average(summary: &YearSummary) -> ChartData {
    ChartData::single(
        month_labels(summary),
        "Average per day (kWh)",
        summary.monthly.iter().map(|m| m.avg_per_day).collect(),
    )
}

/// Monthly energy against the flat monthly average (two lines)
pub fn monthly_vs_average(summary: &YearSummary) -> ChartData {
    ChartData {
        labels: month_labels(summary),
        datasets: vec![
            Dataset {
                label: "Actual (kWh)".to_string(),
                data: summary.monthly.iter().map(|m| m.energy).collect(),
            },
            Dataset {
                label: "Average (kWh)".to_string(),
                data: vec![summary.monthly_avg; 12],
            },
        ],
    }
}

/// Monthly energy of two years overlaid (two lines)
pub fn year_comparison_series(base: &YearSummary, other: &YearSummary) -> ChartData {
    ChartData {
        labels: month_labels(base),
        datasets: vec![
            Dataset {
                label: base.year.to_string(),
                data: base.monthly.iter().map(|m| m.energy).collect(),
            },
            Dataset {
                label: other.year.to_string(),
                data: other.monthly.iter().map(|m| m.energy).collect(),
            },
        ],
    }
}
