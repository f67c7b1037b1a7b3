use serde::Deserialize;

use super::client::{ApiClient, ApiError};
use crate::models::{
    DataError, PhaseSeries, PhaseSeriesRaw, PhaseTopology, PhaseTopologyRaw, ThreePhaseSeries,
};

/// `getPhaseData` payload wrapper
#[derive(Debug, Clone, Deserialize)]
struct PhaseDataResponse {
    data: Option<PhaseSeriesRaw>,
}

/// `getData3Phase` payload wrapper
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreePhaseResponse {
    phase_a: Option<PhaseSeriesRaw>,
    phase_b: Option<PhaseSeriesRaw>,
    phase_c: Option<PhaseSeriesRaw>,
    total: Option<PhaseSeriesRaw>,
}

impl ApiClient {
    /// Probe the metering topology
    pub async fn detect_phases(&self) -> Result<PhaseTopology, ApiError> {
        let raw: PhaseTopologyRaw = self.call("detectPhases", &[]).await?;
        Ok(raw.into())
    }

    /// Fetch one named phase for a date range
    pub async fn get_phase_data(
        &self,
        phase: &str,
        start_date: &str,
        end_date: &str,
        solar_start_hour: u32,
        solar_end_hour: u32,
    ) -> Result<PhaseSeries, ApiError> {
        let response: PhaseDataResponse = self
            .call(
                "getPhaseData",
                &[
                    ("phase", phase),
                    ("startDate", start_date),
                    ("endDate", end_date),
                    ("solarStartHour", &solar_start_hour.to_string()),
                    ("solarEndHour", &solar_end_hour.to_string()),
                ],
            )
            .await?;
        let data = response.data.ok_or(DataError::MissingField("data"))?;
        Ok(PhaseSeries::try_from(data)?)
    }

    /// Fetch all phases plus the combined total for a date range
    pub async fn get_data_3phase(
        &self,
        start_date: &str,
        end_date: &str,
        solar_start_hour: u32,
        solar_end_hour: u32,
    ) -> Result<ThreePhaseSeries, ApiError> {
        let response: ThreePhaseResponse = self
            .call(
                "getData3Phase",
                &[
                    ("startDate", start_date),
                    ("endDate", end_date),
                    ("solarStartHour", &solar_start_hour.to_string()),
                    ("solarEndHour", &solar_end_hour.to_string()),
                ],
            )
            .await?;

        let total = response.total.ok_or(DataError::MissingField("total"))?;
        Ok(ThreePhaseSeries {
            phase_a: parse_optional_phase(response.phase_a)?,
            phase_b: parse_optional_phase(response.phase_b)?,
            phase_c: parse_optional_phase(response.phase_c)?,
            total: PhaseSeries::try_from(total)?,
        })
    }

    /// Ask the backend to generate and email a usage report
    pub async fn send_report(
        &self,
        recipient_email: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .call(
                "sendReport",
                &[
                    ("recipientEmail", recipient_email),
                    ("startDate", start_date),
                    ("endDate", end_date),
                ],
            )
            .await?;
        Ok(())
    }
}

fn parse_optional_phase(raw: Option<PhaseSeriesRaw>) -> Result<Option<PhaseSeries>, ApiError> {
    match raw {
        Some(raw) => Ok(Some(PhaseSeries::try_from(raw)?)),
        None => Ok(None),
    }
}
