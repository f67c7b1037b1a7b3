//! Time-of-Use tariff classification and cost reduction.

use crate::models::{DayType, HourlyRecord, RateConfig};

use super::percent_of;

/// Energy and cost accumulated for one tariff bucket
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bucket {
    pub energy: f64,
    pub cost: f64,
}

impl Bucket {
    fn add(&mut self, energy: f64, rate: f64) {
        self.energy += energy;
        self.cost += energy * rate;
    }
}

/// Cross-bucket totals. Holiday and weekend consumption are reported as
/// separate buckets but share one combined `holiday_energy` counter, which
/// is what the summary percentages are computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverallTotals {
    pub total_energy: f64,
    pub total_cost: f64,
    pub peak_energy: f64,
    pub offpeak_energy: f64,
    pub holiday_energy: f64,
}

/// Full TOU partition of one data series
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouBreakdown {
    pub peak_normal: Bucket,
    pub offpeak_normal: Bucket,
    pub holiday: Bucket,
    pub weekend: Bucket,
    pub overall: OverallTotals,
}

/// Derived display figures for one breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouSummary {
    pub total_energy: f64,
    pub total_cost: f64,
    pub avg_rate: f64,
    pub peak_percent: f64,
    pub offpeak_percent: f64,
    pub holiday_percent: f64,
    pub potential_savings: f64,
}

/// Single pass over the hourly records, bucketing by day type and by the
/// half-open peak window for normal days. Negative energy readings floor
/// to zero; hours outside 0-24 fail the window test and land in off-peak.
pub fn compute_tou_breakdown(records: &[HourlyRecord], rates: &RateConfig) -> TouBreakdown {
    let mut tou = TouBreakdown::default();

    for record in records {
        let energy = record.energy.max(0.0);
        match record.day_type {
            DayType::Normal => {
                let is_peak =
                    record.hour >= rates.peak_start_hour && record.hour < rates.peak_end_hour;
                if is_peak {
                    tou.peak_normal.add(energy, rates.peak_rate);
                    tou.overall.peak_energy += energy;
                } else {
                    tou.offpeak_normal.add(energy, rates.offpeak_rate);
                    tou.overall.offpeak_energy += energy;
                }
            }
            DayType::NationalHoliday => {
                tou.holiday.add(energy, rates.holiday_rate);
                tou.overall.holiday_energy += energy;
            }
            DayType::Weekend => {
                tou.weekend.add(energy, rates.holiday_rate);
                tou.overall.holiday_energy += energy;
            }
        }
    }

    tou.overall.total_energy = tou.peak_normal.energy
        + tou.offpeak_normal.energy
        + tou.holiday.energy
        + tou.weekend.energy;
    tou.overall.total_cost =
        tou.peak_normal.cost + tou.offpeak_normal.cost + tou.holiday.cost + tou.weekend.cost;

    tou
}

impl TouBreakdown {
    /// Average rate, bucket shares and the hypothetical saving from shifting
    /// all peak consumption to off-peak hours.
    pub fn summary(&self, rates: &RateConfig) -> TouSummary {
        let mut summary = TouSummary {
            total_energy: self.overall.total_energy,
            total_cost: self.overall.total_cost,
            ..TouSummary::default()
        };

        if summary.total_energy > 0.0 {
            summary.avg_rate = summary.total_cost / summary.total_energy;
            summary.peak_percent = percent_of(self.overall.peak_energy, summary.total_energy);
            summary.offpeak_percent = percent_of(self.overall.offpeak_energy, summary.total_energy);
            summary.holiday_percent = percent_of(self.overall.holiday_energy, summary.total_energy);
            summary.potential_savings =
                self.overall.peak_energy * (rates.peak_rate - rates.offpeak_rate);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn rates() -> RateConfig {
        RateConfig {
            peak_start_hour: 9,
            peak_end_hour: 22,
            peak_rate: 4.0,
            offpeak_rate: 2.5,
            holiday_rate: 3.0,
        }
    }

    fn record(hour: u32, energy: f64, day_type: DayType) -> HourlyRecord {
        HourlyRecord {
            hour,
            energy,
            day_type,
        }
    }

    #[test]
    fn test_peak_hour_classification() {
        let tou = compute_tou_breakdown(&[record(10, 5.0, DayType::Normal)], &rates());
        assert!((tou.peak_normal.energy - 5.0).abs() < EPS);
        assert!((tou.peak_normal.cost - 20.0).abs() < EPS);
        assert!((tou.overall.total_energy - 5.0).abs() < EPS);
        assert!((tou.overall.total_cost - 20.0).abs() < EPS);
        assert!(tou.offpeak_normal.energy.abs() < EPS);
    }

    #[test]
    fn test_weekend_uses_holiday_rate() {
        let tou = compute_tou_breakdown(&[record(2, 3.0, DayType::Weekend)], &rates());
        assert!((tou.weekend.energy - 3.0).abs() < EPS);
        assert!((tou.weekend.cost - 9.0).abs() < EPS);
        assert!((tou.overall.holiday_energy - 3.0).abs() < EPS);
        assert!(tou.holiday.energy.abs() < EPS);
    }

    #[test]
    fn test_holiday_and_weekend_stay_separate_buckets() {
        let tou = compute_tou_breakdown(
            &[
                record(10, 2.0, DayType::NationalHoliday),
                record(10, 4.0, DayType::Weekend),
            ],
            &rates(),
        );
        assert!((tou.holiday.energy - 2.0).abs() < EPS);
        assert!((tou.weekend.energy - 4.0).abs() < EPS);
        // ...but feed one combined counter for the summary share
        assert!((tou.overall.holiday_energy - 6.0).abs() < EPS);
    }

    #[test]
    fn test_window_boundaries_are_half_open() {
        let r = rates();
        let tou = compute_tou_breakdown(
            &[
                record(9, 1.0, DayType::Normal),  // start inclusive
                record(21, 1.0, DayType::Normal), // last peak hour
                record(22, 1.0, DayType::Normal), // end exclusive
                record(8, 1.0, DayType::Normal),
            ],
            &r,
        );
        assert!((tou.peak_normal.energy - 2.0).abs() < EPS);
        assert!((tou.offpeak_normal.energy - 2.0).abs() < EPS);
    }

    #[test]
    fn test_out_of_range_hour_lands_in_offpeak() {
        let tou = compute_tou_breakdown(&[record(24, 2.0, DayType::Normal)], &rates());
        assert!((tou.offpeak_normal.energy - 2.0).abs() < EPS);
        assert!(tou.peak_normal.energy.abs() < EPS);
    }

    #[test]
    fn test_negative_energy_floors_to_zero() {
        let tou = compute_tou_breakdown(&[record(10, -5.0, DayType::Normal)], &rates());
        assert!(tou.overall.total_energy.abs() < EPS);
        assert!(tou.overall.total_cost.abs() < EPS);
    }

    #[test]
    fn test_empty_input_is_all_zeros() {
        let tou = compute_tou_breakdown(&[], &rates());
        assert_eq!(tou, TouBreakdown::default());
        let summary = tou.summary(&rates());
        assert!(summary.avg_rate.abs() < EPS);
        assert!(summary.potential_savings.abs() < EPS);
    }

    #[test]
    fn test_totals_equal_bucket_sums() {
        let records = vec![
            record(10, 5.0, DayType::Normal),
            record(3, 2.0, DayType::Normal),
            record(14, 1.5, DayType::NationalHoliday),
            record(20, 2.5, DayType::Weekend),
        ];
        let tou = compute_tou_breakdown(&records, &rates());
        let bucket_energy = tou.peak_normal.energy
            + tou.offpeak_normal.energy
            + tou.holiday.energy
            + tou.weekend.energy;
        let bucket_cost =
            tou.peak_normal.cost + tou.offpeak_normal.cost + tou.holiday.cost + tou.weekend.cost;
        assert!((tou.overall.total_energy - bucket_energy).abs() < EPS);
        assert!((tou.overall.total_cost - bucket_cost).abs() < EPS);
    }

    #[test]
    fn test_avg_rate_times_energy_recovers_cost() {
        let records = vec![
            record(10, 5.0, DayType::Normal),
            record(3, 2.0, DayType::Normal),
            record(14, 1.5, DayType::Weekend),
        ];
        let r = rates();
        let tou = compute_tou_breakdown(&records, &r);
        let summary = tou.summary(&r);
        assert!((summary.avg_rate * summary.total_energy - summary.total_cost).abs() < EPS);
    }

    #[test]
    fn test_summary_shares_and_savings() {
        let records = vec![
            record(10, 6.0, DayType::Normal),
            record(2, 3.0, DayType::Normal),
            record(12, 1.0, DayType::NationalHoliday),
        ];
        let r = rates();
        let summary = compute_tou_breakdown(&records, &r).summary(&r);
        assert!((summary.peak_percent - 60.0).abs() < EPS);
        assert!((summary.offpeak_percent - 30.0).abs() < EPS);
        assert!((summary.holiday_percent - 10.0).abs() < EPS);
        // 6 kWh shifted from 4.0 to 2.5 per kWh
        assert!((summary.potential_savings - 9.0).abs() < EPS);
    }
}
