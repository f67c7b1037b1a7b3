use chrono::NaiveDate;
use thiserror::Error;

/// Input validation errors, rejected before any fetch is issued
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Peak window start ({start}) must be before end ({end}), both within 0-24")]
    InvalidPeakWindow { start: u32, end: u32 },
    #[error("Rates must be positive")]
    NonPositiveRate,
    #[error("Solar window start ({start}) must be before end ({end}), both within 0-24")]
    InvalidSolarWindow { start: u32, end: u32 },
    #[error("Capacity must be greater than zero")]
    InvalidCapacity,
    #[error("Efficiency must be within (0, 100]")]
    InvalidEfficiency,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Start date must not be after end date")]
    InvalidDateRange,
}

/// Time-of-Use tariff configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConfig {
    pub peak_start_hour: u32,
    pub peak_end_hour: u32,
    pub peak_rate: f64,
    pub offpeak_rate: f64,
    pub holiday_rate: f64,
}

impl RateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.peak_start_hour >= self.peak_end_hour || self.peak_end_hour > 24 {
            return Err(ConfigError::InvalidPeakWindow {
                start: self.peak_start_hour,
                end: self.peak_end_hour,
            });
        }
        if self.peak_rate <= 0.0 || self.offpeak_rate <= 0.0 || self.holiday_rate <= 0.0 {
            return Err(ConfigError::NonPositiveRate);
        }
        Ok(())
    }
}

/// Solar installation parameters for the coverage estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarConfig {
    pub solar_start_hour: u32,
    pub solar_end_hour: u32,
    pub capacity_kw: f64,
    pub efficiency_percent: f64,
}

impl SolarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solar_start_hour >= self.solar_end_hour || self.solar_end_hour > 24 {
            return Err(ConfigError::InvalidSolarWindow {
                start: self.solar_start_hour,
                end: self.solar_end_hour,
            });
        }
        if self.capacity_kw <= 0.0 {
            return Err(ConfigError::InvalidCapacity);
        }
        if self.efficiency_percent <= 0.0 || self.efficiency_percent > 100.0 {
            return Err(ConfigError::InvalidEfficiency);
        }
        Ok(())
    }
}

/// Parse and order-check a user supplied date range
pub fn validate_date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), ConfigError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(ConfigError::InvalidDateRange);
    }
    Ok((start, end))
}

fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateConfig {
        RateConfig {
            peak_start_hour: 9,
            peak_end_hour: 22,
            peak_rate: 4.0,
            offpeak_rate: 2.5,
            holiday_rate: 3.0,
        }
    }

    #[test]
    fn test_valid_rate_config() {
        assert!(rates().validate().is_ok());
    }

    #[test]
    fn test_inverted_peak_window_rejected() {
        let mut r = rates();
        r.peak_start_hour = 22;
        r.peak_end_hour = 9;
        assert!(matches!(
            r.validate(),
            Err(ConfigError::InvalidPeakWindow { start: 22, end: 9 })
        ));
    }

    #[test]
    fn test_peak_window_past_midnight_rejected() {
        let mut r = rates();
        r.peak_end_hour = 25;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_zero_rate_rejected() {
        let mut r = rates();
        r.offpeak_rate = 0.0;
        assert_eq!(r.validate(), Err(ConfigError::NonPositiveRate));
    }

    #[test]
    fn test_solar_config_bounds() {
        let config = SolarConfig {
            solar_start_hour: 6,
            solar_end_hour: 18,
            capacity_kw: 5.0,
            efficiency_percent: 80.0,
        };
        assert!(config.validate().is_ok());

        let mut bad = config;
        bad.efficiency_percent = 101.0;
        assert_eq!(bad.validate(), Err(ConfigError::InvalidEfficiency));

        let mut bad = config;
        bad.capacity_kw = 0.0;
        assert_eq!(bad.validate(), Err(ConfigError::InvalidCapacity));

        let mut bad = config;
        bad.solar_start_hour = 18;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_date_range_parsing() {
        let (start, end) = validate_date_range("2025-01-01", "2025-01-31").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());

        assert!(matches!(
            validate_date_range("", "2025-01-31"),
            Err(ConfigError::InvalidDate(_))
        ));
        assert_eq!(
            validate_date_range("2025-02-01", "2025-01-31"),
            Err(ConfigError::InvalidDateRange)
        );
    }
}
