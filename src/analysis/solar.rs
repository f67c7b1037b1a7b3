//! Solar self-consumption estimate for the configured daylight window.

use crate::models::{SolarConfig, SolarWindowUsage};

/// Average peak-sun-hours per day assumed by the generation model. A fixed
/// model constant, not user configurable.
pub const PEAK_SUN_HOURS_PER_DAY: f64 = 4.5;

/// Assumed installation cost per kW of capacity, in currency units.
pub const INSTALL_COST_PER_KW: f64 = 50_000.0;

/// Derived solar figures for one fetched period
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolarAnalysis {
    pub total_solar_usage: f64,
    pub estimated_generation: f64,
    /// Share of solar-window consumption covered by the estimated
    /// generation, clamped to [0, 100]. Zero when there was no usage.
    pub coverage_percent: f64,
    pub savings_estimate: f64,
    /// Zero when yearly savings are zero.
    pub payback_years: f64,
}

/// Sizing verdict derived from the coverage percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Excellent,
    Moderate,
    Weak,
    Poor,
}

impl Recommendation {
    /// Four fixed bands with inclusive lower bounds.
    pub fn from_coverage(coverage_percent: f64) -> Self {
        if coverage_percent >= 80.0 {
            Self::Excellent
        } else if coverage_percent >= 50.0 {
            Self::Moderate
        } else if coverage_percent >= 30.0 {
            Self::Weak
        } else {
            Self::Poor
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Excellent => {
                "A system this size is a very good fit. It can cover almost all \
                 daytime consumption."
            }
            Self::Moderate => {
                "The system covers about half of the daytime consumption. \
                 Consider a larger installation."
            }
            Self::Weak => {
                "The system covers only a small share of daytime consumption. \
                 Increase the capacity or reduce daytime usage."
            }
            Self::Poor => {
                "Daytime consumption far exceeds what this system can produce. \
                 It is unlikely to pay off at this size."
            }
        }
    }
}

/// Days covered by the fetched period, falling back to 30 when the backend
/// sent no daily profile.
pub fn period_days(usage: &SolarWindowUsage) -> u32 {
    if usage.solar_daily.is_empty() {
        30
    } else {
        usage.solar_daily.len() as u32
    }
}

/// Estimate generation, coverage, savings and payback for an installation.
/// `peak_rate` prices the offset energy; savings are capped at the actual
/// consumption inside the window.
pub fn estimate_solar(
    usage: &SolarWindowUsage,
    config: &SolarConfig,
    peak_rate: f64,
    period_days: u32,
) -> SolarAnalysis {
    let mut analysis = SolarAnalysis {
        total_solar_usage: usage.total_solar,
        ..SolarAnalysis::default()
    };

    analysis.estimated_generation = config.capacity_kw
        * PEAK_SUN_HOURS_PER_DAY
        * (config.efficiency_percent / 100.0)
        * f64::from(period_days);

    if analysis.total_solar_usage > 0.0 {
        analysis.coverage_percent =
            (analysis.estimated_generation / analysis.total_solar_usage * 100.0).min(100.0);
    }

    analysis.savings_estimate =
        analysis.estimated_generation.min(analysis.total_solar_usage) * peak_rate;

    if period_days > 0 {
        let yearly_savings = analysis.savings_estimate * (365.0 / f64::from(period_days));
        if yearly_savings > 0.0 {
            analysis.payback_years = config.capacity_kw * INSTALL_COST_PER_KW / yearly_savings;
        }
    }

    analysis
}
