pub mod config;
pub mod energy;
pub mod topology;

pub use config::{validate_date_range, ConfigError, RateConfig, SolarConfig};
pub use energy::{
    DailyRecord, DataError, DayType, HourlyPoint, HourlyRecord, PhaseSeries, PhaseSeriesRaw,
    SolarWindowUsage, ThreePhaseSeries,
};
pub use topology::{PhaseTopology, PhaseTopologyRaw};
