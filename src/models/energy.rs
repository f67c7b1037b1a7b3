//! Typed energy records and the parse step that produces them.
//!
//! The remote API returns loosely shaped JSON; everything is deserialized
//! into the `*Raw` forms below and converted into strict records here, so
//! absent payload sections fail at the boundary instead of deep inside the
//! aggregation code.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// A required section of a successful response was absent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Response is missing '{0}'")]
    MissingField(&'static str),
}

/// Day classification carried by each hourly record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    Normal,
    NationalHoliday,
    Weekend,
}

impl DayType {
    /// Map the wire value (0/1/2). Unknown values fall back to `Normal`,
    /// matching what the backend emits for unclassified days.
    pub fn from_wire(value: i64) -> Self {
        match value {
            1 => Self::NationalHoliday,
            2 => Self::Weekend,
            _ => Self::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal day",
            Self::NationalHoliday => "National holiday",
            Self::Weekend => "Weekend",
        }
    }
}

/// One hourly measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyRecord {
    pub hour: u32,
    pub energy: f64,
    pub day_type: DayType,
}

/// One daily aggregate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub energy: f64,
    pub solar: Option<f64>,
}

/// One point of the hourly solar-window profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint {
    pub hour: u32,
    pub energy: f64,
}

/// Solar-window consumption summary for one fetched period
#[derive(Debug, Clone, PartialEq)]
pub struct SolarWindowUsage {
    pub total_solar: f64,
    pub avg_per_day: f64,
    pub avg_per_hour: f64,
    pub peak_hour: u32,
    pub peak_energy: f64,
    pub solar_daily: Vec<DailyRecord>,
    pub solar_hourly: Vec<HourlyPoint>,
}

/// One fully parsed data series (a named phase, or the three-phase total)
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSeries {
    pub hourly: Vec<HourlyRecord>,
    pub daily: Vec<DailyRecord>,
    pub solar: SolarWindowUsage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRecordRaw {
    pub hour: u32,
    pub energy: Option<f64>,
    #[serde(rename = "type")]
    pub day_type: Option<i64>,
}

impl From<HourlyRecordRaw> for HourlyRecord {
    fn from(raw: HourlyRecordRaw) -> Self {
        Self {
            hour: raw.hour,
            energy: raw.energy.unwrap_or(0.0),
            day_type: DayType::from_wire(raw.day_type.unwrap_or(0)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecordRaw {
    pub date: String,
    pub energy: Option<f64>,
    pub solar: Option<f64>,
}

impl DailyRecordRaw {
    /// Rows with an unparseable date are dropped by the caller.
    fn parse(self) -> Option<DailyRecord> {
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(date) => Some(DailyRecord {
                date,
                energy: self.energy.unwrap_or(0.0),
                solar: self.solar,
            }),
            Err(_) => {
                log::warn!("skipping daily record with invalid date '{}'", self.date);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPointRaw {
    pub hour: u32,
    pub energy: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarWindowUsageRaw {
    pub total_solar: Option<f64>,
    pub avg_per_day: Option<f64>,
    pub avg_per_hour: Option<f64>,
    pub peak_hour: Option<u32>,
    pub peak_energy: Option<f64>,
    pub solar_daily: Option<Vec<DailyRecordRaw>>,
    pub solar_hourly: Option<Vec<HourlyPointRaw>>,
}

impl From<SolarWindowUsageRaw> for SolarWindowUsage {
    fn from(raw: SolarWindowUsageRaw) -> Self {
        Self {
            total_solar: raw.total_solar.unwrap_or(0.0),
            avg_per_day: raw.avg_per_day.unwrap_or(0.0),
            avg_per_hour: raw.avg_per_hour.unwrap_or(0.0),
            peak_hour: raw.peak_hour.unwrap_or(12),
            peak_energy: raw.peak_energy.unwrap_or(0.0),
            solar_daily: parse_daily(raw.solar_daily.unwrap_or_default()),
            solar_hourly: raw
                .solar_hourly
                .unwrap_or_default()
                .into_iter()
                .map(|p| HourlyPoint {
                    hour: p.hour,
                    energy: p.energy.unwrap_or(0.0),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSeriesRaw {
    pub hourly_data: Option<Vec<HourlyRecordRaw>>,
    pub daily_data: Option<Vec<DailyRecordRaw>>,
    pub solar_data: Option<SolarWindowUsageRaw>,
}

impl TryFrom<PhaseSeriesRaw> for PhaseSeries {
    type Error = DataError;

    fn try_from(raw: PhaseSeriesRaw) -> Result<Self, DataError> {
        let hourly = raw
            .hourly_data
            .ok_or(DataError::MissingField("hourlyData"))?;
        let daily = raw.daily_data.ok_or(DataError::MissingField("dailyData"))?;
        let solar = raw.solar_data.ok_or(DataError::MissingField("solarData"))?;
        Ok(Self {
            hourly: hourly.into_iter().map(HourlyRecord::from).collect(),
            daily: parse_daily(daily),
            solar: solar.into(),
        })
    }
}

fn parse_daily(raw: Vec<DailyRecordRaw>) -> Vec<DailyRecord> {
    raw.into_iter().filter_map(DailyRecordRaw::parse).collect()
}

/// Payload of a `getData3Phase` response: up to three named phases plus the
/// synthesized total series
#[derive(Debug, Clone, PartialEq)]
pub struct ThreePhaseSeries {
    pub phase_a: Option<PhaseSeries>,
    pub phase_b: Option<PhaseSeries>,
    pub phase_c: Option<PhaseSeries>,
    pub total: PhaseSeries,
}

impl ThreePhaseSeries {
    /// The named phases present in the response, in wiring order
    pub fn named_phases(&self) -> Vec<(&'static str, &PhaseSeries)> {
        [
            ("A", self.phase_a.as_ref()),
            ("B", self.phase_b.as_ref()),
            ("C", self.phase_c.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, series)| series.map(|s| (name, s)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn phase_series_raw(value: serde_json::Value) -> PhaseSeriesRaw {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_hourly_record_defaults() {
        let raw: HourlyRecordRaw = serde_json::from_value(json!({ "hour": 10 })).unwrap();
        let record = HourlyRecord::from(raw);
        assert_eq!(record.hour, 10);
        assert!((record.energy - 0.0).abs() < 1e-9);
        assert_eq!(record.day_type, DayType::Normal);
    }

    #[test]
    fn test_day_type_mapping() {
        assert_eq!(DayType::from_wire(0), DayType::Normal);
        assert_eq!(DayType::from_wire(1), DayType::NationalHoliday);
        assert_eq!(DayType::from_wire(2), DayType::Weekend);
        assert_eq!(DayType::from_wire(7), DayType::Normal);
    }

    #[test]
    fn test_invalid_daily_date_skipped() {
        let raw = phase_series_raw(json!({
            "hourlyData": [],
            "dailyData": [
                { "date": "2025-03-01", "energy": 4.5 },
                { "date": "not-a-date", "energy": 9.0 },
            ],
            "solarData": {}
        }));
        let series = PhaseSeries::try_from(raw).unwrap();
        assert_eq!(series.daily.len(), 1);
        assert_eq!(
            series.daily[0].date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_missing_solar_data_is_an_error() {
        let raw = phase_series_raw(json!({
            "hourlyData": [],
            "dailyData": [],
        }));
        assert_eq!(
            PhaseSeries::try_from(raw),
            Err(DataError::MissingField("solarData"))
        );
    }

    #[test]
    fn test_missing_hourly_data_is_an_error() {
        let raw = phase_series_raw(json!({
            "dailyData": [],
            "solarData": {}
        }));
        assert_eq!(
            PhaseSeries::try_from(raw),
            Err(DataError::MissingField("hourlyData"))
        );
    }

    #[test]
    fn test_solar_summary_defaults() {
        let raw: SolarWindowUsageRaw = serde_json::from_value(json!({
            "totalSolar": 120.5,
            "solarDaily": [{ "date": "2025-03-01", "solar": 4.0 }]
        }))
        .unwrap();
        let usage = SolarWindowUsage::from(raw);
        assert!((usage.total_solar - 120.5).abs() < 1e-9);
        assert_eq!(usage.peak_hour, 12);
        assert_eq!(usage.solar_daily.len(), 1);
        assert!(usage.solar_hourly.is_empty());
    }

    #[test]
    fn test_named_phases_skips_absent() {
        let series = PhaseSeries {
            hourly: vec![],
            daily: vec![],
            solar: SolarWindowUsage::from(SolarWindowUsageRaw::default()),
        };
        let three = ThreePhaseSeries {
            phase_a: Some(series.clone()),
            phase_b: None,
            phase_c: Some(series),
            total: PhaseSeries {
                hourly: vec![],
                daily: vec![],
                solar: SolarWindowUsage::from(SolarWindowUsageRaw::default()),
            },
        };
        let names: Vec<&str> = three.named_phases().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
