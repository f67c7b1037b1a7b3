use serde::{Deserialize, Serialize};

/// Metering topology reported by the backend: single-phase, or three-phase
/// with named phases. Resolved once per session and persisted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTopology {
    pub is_three_phase: bool,
    pub phases: Vec<String>,
}

impl PhaseTopology {
    pub fn single_phase() -> Self {
        Self {
            is_three_phase: false,
            phases: vec!["A".to_string()],
        }
    }

    /// Named phases to display; an empty list means the implicit single phase.
    pub fn phase_list(&self) -> Vec<String> {
        if self.phases.is_empty() {
            vec!["A".to_string()]
        } else {
            self.phases.clone()
        }
    }

    pub fn describe(&self) -> &'static str {
        if self.is_three_phase {
            "3-phase"
        } else {
            "1-phase"
        }
    }
}

/// Raw `detectPhases` payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTopologyRaw {
    #[serde(rename = "is3Phase")]
    pub is_three_phase: Option<bool>,
    pub phases: Option<Vec<String>>,
}

impl From<PhaseTopologyRaw> for PhaseTopology {
    fn from(raw: PhaseTopologyRaw) -> Self {
        let is_three_phase = raw.is_three_phase.unwrap_or(false);
        let phases = match raw.phases {
            Some(phases) if !phases.is_empty() => phases,
            _ if is_three_phase => vec!["A".into(), "B".into(), "C".into()],
            _ => vec!["A".into()],
        };
        Self {
            is_three_phase,
            phases,
        }
    }
}
