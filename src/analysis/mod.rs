//! The aggregation engine: pure reductions over parsed records. Performs no
//! I/O and holds no state; callers run it once per data series.

pub mod solar;
pub mod tou;
pub mod year;

pub use solar::{estimate_solar, period_days, Recommendation, SolarAnalysis};
pub use tou::{compute_tou_breakdown, Bucket, OverallTotals, TouBreakdown, TouSummary};
pub use year::{
    analyze_year, compare_years, month_name, MonthExtreme, MonthlyData, Trend, YearComparison,
    YearSummary,
};

/// Share of `part` in `total` as a percentage, zero when `total` is zero.
pub fn percent_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}
