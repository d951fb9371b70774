//! The selection engine: pure filtering of a telemetry snapshot
//! against a conjunctive constraint set.

use std::fmt;

use crate::gpu::GpuInfo;

/// Caller-supplied predicate over a single device record.
pub type Selector = dyn Fn(&GpuInfo) -> bool + Send + Sync;

/// A selection request: all predicates combine with AND, plus a
/// result-size limit.
///
/// Thresholds default to 0, which is a real constraint ("the metric
/// must be exactly zero"), not "unbounded": the default request asks
/// for a fully idle GPU. Raise a threshold to relax it.
pub struct Constraints {
    /// Maximum number of devices to return. Must be at least 1.
    pub count: usize,
    /// Restrict candidates to these device indices; empty means every
    /// device in the snapshot is a candidate.
    pub devices: Vec<u32>,
    /// Case-sensitive substring match against the device name.
    pub name: Option<String>,
    /// Qualify only if `utilization <= max_utilization`.
    pub max_utilization: u32,
    /// Qualify only if `memory_utilization <= max_memory_utilization`.
    pub max_memory_utilization: u32,
    /// Qualify only if `processes <= max_processes`.
    pub max_processes: u32,
    /// Custom predicate, ANDed with all of the above.
    pub selector: Option<Box<Selector>>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            count: 1,
            devices: Vec::new(),
            name: None,
            max_utilization: 0,
            max_memory_utilization: 0,
            max_processes: 0,
            selector: None,
        }
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraints")
            .field("count", &self.count)
            .field("devices", &self.devices)
            .field("name", &self.name)
            .field("max_utilization", &self.max_utilization)
            .field("max_memory_utilization", &self.max_memory_utilization)
            .field("max_processes", &self.max_processes)
            .field("selector", &self.selector.is_some())
            .finish()
    }
}

/// Configuration errors caught at the boundary, before selection runs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("requested device count must be at least 1")]
    InvalidCount,
    #[error("device index {0} is not present in the snapshot")]
    UnknownDevice(u32),
}

impl Constraints {
    /// Checks the request against a snapshot. `filter_gpus` assumes a
    /// validated request and never fails itself.
    pub fn validate(&self, snapshot: &[GpuInfo]) -> Result<(), SelectError> {
        if self.count == 0 {
            return Err(SelectError::InvalidCount);
        }
        for &device in &self.devices {
            if !snapshot.iter().any(|gpu| gpu.device == device) {
                return Err(SelectError::UnknownDevice(device));
            }
        }
        Ok(())
    }
}

/// Returns up to `constraints.count` qualifying devices, in snapshot
/// order (stable filter, no re-sorting by any metric).
///
/// Fewer qualifying devices than requested is not an error; the caller
/// detects under-fulfillment by comparing the returned length against
/// `count`.
pub fn filter_gpus(snapshot: &[GpuInfo], constraints: &Constraints) -> Vec<GpuInfo> {
    let mut selected = Vec::new();

    for gpu in snapshot {
        if !constraints.devices.is_empty() && !constraints.devices.contains(&gpu.device) {
            continue;
        }
        if let Some(name) = &constraints.name {
            if !gpu.name.contains(name.as_str()) {
                continue;
            }
        }
        if gpu.utilization > constraints.max_utilization {
            continue;
        }
        if gpu.memory_utilization > constraints.max_memory_utilization {
            continue;
        }
        if gpu.processes > constraints.max_processes {
            continue;
        }
        if let Some(selector) = &constraints.selector {
            if !selector(gpu) {
                continue;
            }
        }

        selected.push(gpu.clone());
        if selected.len() == constraints.count {
            break;
        }
    }

    selected
}
