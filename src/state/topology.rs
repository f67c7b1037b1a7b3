//! Phase topology resolution and persistence.
//!
//! The topology is probed once at session start (or restored from
//! localStorage) and handed to every analysis view through Leptos context,
//! so engine call sites receive it as an explicit value instead of reading
//! browser storage ad hoc.

use leptos::*;

use crate::api::ApiClient;
use crate::models::PhaseTopology;
use gloo_storage::{LocalStorage, Storage};

const STORAGE_KEY: &str = "phase_topology";

/// Load the persisted topology descriptor
pub fn load_topology() -> Option<PhaseTopology> {
    LocalStorage::get(STORAGE_KEY).ok()
}

/// Persist the topology descriptor after a successful probe
pub fn save_topology(topology: &PhaseTopology) {
    let _ = LocalStorage::set(STORAGE_KEY, topology);
}

/// Forget the persisted topology (used when clearing the session)
pub fn clear_topology() {
    LocalStorage::delete(STORAGE_KEY);
}

/// Topology context provided at the app root. `None` until the first probe
/// (or storage restore) completes.
#[derive(Clone, Copy)]
pub struct TopologyContext {
    pub topology: ReadSignal<Option<PhaseTopology>>,
}

impl TopologyContext {
    /// The resolved topology, or the single-phase default while the probe
    /// is still in flight.
    pub fn current(&self) -> PhaseTopology {
        self.topology
            .get()
            .unwrap_or_else(PhaseTopology::single_phase)
    }
}

/// Provide the topology context and, when nothing was persisted, probe the
/// backend once. Call at the root of the app.
pub fn provide_topology_context() {
    let initial = load_topology();
    let (topology, set_topology) = create_signal(initial);

    if topology.get_untracked().is_none() {
        spawn_local(async move {
            match ApiClient::new().detect_phases().await {
                Ok(detected) => {
                    log::info!(
                        "detected {} metering ({} phases)",
                        detected.describe(),
                        detected.phase_list().len()
                    );
                    save_topology(&detected);
                    set_topology.set(Some(detected));
                }
                Err(e) => {
                    log::error!("phase detection failed: {}", e);
                }
            }
        });
    }

    provide_context(TopologyContext { topology });
}

/// Hook to access the topology context
pub fn use_topology() -> TopologyContext {
    use_context::<TopologyContext>().expect("TopologyContext must be provided by a parent")
}
