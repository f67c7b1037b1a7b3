//! Yearly rollup, trend classification and year-over-year comparison.

use chrono::Datelike;

use crate::models::DailyRecord;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Display name for a 1-based calendar month
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Accumulated figures for one calendar month
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyData {
    /// 1-based calendar month
    pub month: u32,
    pub energy: f64,
    pub days: u32,
    pub avg_per_day: f64,
}

/// A month singled out by the peak/lowest scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthExtreme {
    pub month: u32,
    pub energy: f64,
}

/// Direction of consumption across the year (and of a year-over-year diff)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "increasing",
            Self::Down => "decreasing",
            Self::Stable => "stable",
        }
    }
}

/// Rollup of one year of daily records
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    /// Always 12 entries, January first
    pub monthly: Vec<MonthlyData>,
    pub total_energy: f64,
    pub daily_avg: f64,
    pub monthly_avg: f64,
    pub peak_month: Option<MonthExtreme>,
    /// Months without energy are excluded from the scan, so an all-zero
    /// year has no lowest month.
    pub lowest_month: Option<MonthExtreme>,
    pub trend: Trend,
}

/// Bucket daily records into calendar months and derive the year figures.
pub fn analyze_year(daily_records: &[DailyRecord], year: i32) -> YearSummary {
    let mut monthly: Vec<MonthlyData> = (1..=12)
        .map(|month| MonthlyData {
            month,
            ..MonthlyData::default()
        })
        .collect();

    for record in daily_records {
        let slot = &mut monthly[record.date.month0() as usize];
        slot.energy += record.energy.max(0.0);
        slot.days += 1;
    }

    let mut total_energy = 0.0;
    let mut peak_month: Option<MonthExtreme> = None;
    let mut lowest_month: Option<MonthExtreme> = None;

    for slot in &mut monthly {
        if slot.days > 0 {
            slot.avg_per_day = slot.energy / f64::from(slot.days);
        }
        total_energy += slot.energy;

        if slot.energy > peak_month.map_or(0.0, |m| m.energy) {
            peak_month = Some(MonthExtreme {
                month: slot.month,
                energy: slot.energy,
            });
        }
        if slot.energy > 0.0 && slot.energy < lowest_month.map_or(f64::INFINITY, |m| m.energy) {
            lowest_month = Some(MonthExtreme {
                month: slot.month,
                energy: slot.energy,
            });
        }
    }

    let daily_avg = if daily_records.is_empty() {
        0.0
    } else {
        total_energy / daily_records.len() as f64
    };

    let months_with_data = monthly.iter().filter(|m| m.energy > 0.0).count();
    let monthly_avg = if months_with_data > 0 {
        total_energy / months_with_data as f64
    } else {
        0.0
    };

    let trend = classify_trend(&monthly);

    YearSummary {
        year,
        monthly,
        total_energy,
        daily_avg,
        monthly_avg,
        peak_month,
        lowest_month,
        trend,
    }
}

/// Compare the first and last three calendar months. Each side sums only its
/// non-zero months yet divides by 3 regardless, mirroring the established
/// reporting behavior; a zero side forces `Stable`.
fn classify_trend(monthly: &[MonthlyData]) -> Trend {
    let quarter_mean = |slots: &[MonthlyData]| -> f64 {
        slots
            .iter()
            .filter(|m| m.energy > 0.0)
            .map(|m| m.energy)
            .sum::<f64>()
            / 3.0
    };

    let first = quarter_mean(&monthly[0..3]);
    let last = quarter_mean(&monthly[9..12]);

    if first == 0.0 || last == 0.0 {
        return Trend::Stable;
    }

    let change = (last - first) / first * 100.0;
    if change > 10.0 {
        Trend::Up
    } else if change < -10.0 {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Year-over-year difference of total energy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearComparison {
    pub diff: f64,
    /// Zero when the base year has no energy
    pub percent_change: f64,
    pub direction: Trend,
}

pub fn compare_years(base: &YearSummary, other: &YearSummary) -> YearComparison {
    let diff = other.total_energy - base.total_energy;
    let percent_change = if base.total_energy > 0.0 {
        diff / base.total_energy * 100.0
    } else {
        0.0
    };
    let direction = if diff > 0.0 {
        Trend::Up
    } else if diff < 0.0 {
        Trend::Down
    } else {
        Trend::Stable
    };
    YearComparison {
        diff,
        percent_change,
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

    fn day(year: i32, month: u32, day: u32, energy: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            energy,
            solar: None,
        }
    }

    #[test]
    fn test_monthly_bucketing_and_averages() {
        let records = vec![
            day(2025, 1, 1, 10.0),
            day(2025, 1, 2, 20.0),
            day(2025, 3, 15, 30.0),
        ];
        let summary = analyze_year(&records, 2025);

        assert_eq!(summary.monthly.len(), 12);
        assert!((summary.monthly[0].energy - 30.0).abs() < EPS);
        assert_eq!(summary.monthly[0].days, 2);
        assert!((summary.monthly[0].avg_per_day - 15.0).abs() < EPS);
        assert!((summary.monthly[2].energy - 30.0).abs() < EPS);

        assert!((summary.total_energy - 60.0).abs() < EPS);
        assert!((summary.daily_avg - 20.0).abs() < EPS);
        // two months carry energy
        assert!((summary.monthly_avg - 30.0).abs() < EPS);
    }

    #[test]
    fn test_monthly_sum_equals_total() {
        let records = vec![
            day(2025, 2, 1, 1.25),
            day(2025, 6, 10, 2.5),
            day(2025, 11, 30, 4.75),
        ];
        let summary = analyze_year(&records, 2025);
        let monthly_sum: f64 = summary.monthly.iter().map(|m| m.energy).sum();
        assert!((monthly_sum - summary.total_energy).abs() < EPS);
    }

    #[test]
    fn test_peak_and_lowest_months() {
        let records = vec![
            day(2025, 1, 1, 5.0),
            day(2025, 4, 1, 50.0),
            day(2025, 7, 1, 2.0),
        ];
        let summary = analyze_year(&records, 2025);
        let peak = summary.peak_month.unwrap();
        assert_eq!(peak.month, 4);
        assert!((peak.energy - 50.0).abs() < EPS);
        let lowest = summary.lowest_month.unwrap();
        // zero-energy months are not candidates
        assert_eq!(lowest.month, 7);
        assert!((lowest.energy - 2.0).abs() < EPS);
    }

    #[test]
    fn test_empty_year_has_no_extremes_and_is_stable() {
        let summary = analyze_year(&[], 2025);
        assert!(summary.total_energy.abs() < EPS);
        assert!(summary.daily_avg.abs() < EPS);
        assert!(summary.monthly_avg.abs() < EPS);
        assert!(summary.peak_month.is_none());
        assert!(summary.lowest_month.is_none());
        assert_eq!(summary.trend, Trend::Stable);
    }

    #[test]
    fn test_trend_up() {
        let mut records = Vec::new();
        for month in 1..=3 {
            records.push(day(2025, month, 1, 100.0));
        }
        for month in 10..=12 {
            records.push(day(2025, month, 1, 150.0));
        }
        assert_eq!(analyze_year(&records, 2025).trend, Trend::Up);
    }

    #[test]
    fn test_trend_down() {
        let records = vec![
            day(2025, 1, 1, 100.0),
            day(2025, 2, 1, 100.0),
            day(2025, 3, 1, 100.0),
            day(2025, 10, 1, 50.0),
            day(2025, 11, 1, 50.0),
            day(2025, 12, 1, 50.0),
        ];
        assert_eq!(analyze_year(&records, 2025).trend, Trend::Down);
    }

    #[test]
    fn test_trend_stable_within_threshold() {
        let records = vec![
            day(2025, 1, 1, 100.0),
            day(2025, 2, 1, 100.0),
            day(2025, 3, 1, 100.0),
            day(2025, 10, 1, 105.0),
            day(2025, 11, 1, 105.0),
            day(2025, 12, 1, 105.0),
        ];
        assert_eq!(analyze_year(&records, 2025).trend, Trend::Stable);
    }

    #[test]
    fn test_trend_forced_stable_when_a_quarter_is_empty() {
        // plenty of energy late in the year, none in the first quarter
        let records = vec![
            day(2025, 10, 1, 500.0),
            day(2025, 11, 1, 500.0),
            day(2025, 12, 1, 500.0),
        ];
        assert_eq!(analyze_year(&records, 2025).trend, Trend::Stable);
    }

    #[test]
    fn test_trend_divides_by_three_even_with_gaps() {
        // first quarter has a single non-zero month: mean = 300/3 = 100.
        // last quarter is fully populated: mean = 330/3 = 110 -> stable.
        let records = vec![
            day(2025, 2, 1, 300.0),
            day(2025, 10, 1, 110.0),
            day(2025, 11, 1, 110.0),
            day(2025, 12, 1, 110.0),
        ];
        assert_eq!(analyze_year(&records, 2025).trend, Trend::Stable);
    }

    #[test]
    fn test_compare_years() {
        let base = analyze_year(&[day(2024, 5, 1, 200.0)], 2024);
        let other = analyze_year(&[day(2025, 5, 1, 260.0)], 2025);
        let cmp = compare_years(&base, &other);
        assert!((cmp.diff - 60.0).abs() < EPS);
        assert!((cmp.percent_change - 30.0).abs() < EPS);
        assert_eq!(cmp.direction, Trend::Up);
    }

    #[test]
    fn test_compare_years_zero_base() {
        let base = analyze_year(&[], 2024);
        let other = analyze_year(&[day(2025, 5, 1, 10.0)], 2025);
        let cmp = compare_years(&base, &other);
        assert!((cmp.diff - 10.0).abs() < EPS);
        assert!(cmp.percent_change.abs() < EPS);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }
}
