//! Per-device telemetry record.

/// Snapshot of one GPU at query time.
///
/// Constructed fresh on every telemetry query and never cached; the
/// selection engine treats it as immutable input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuInfo {
    /// Device index/ordinal, unique within a snapshot.
    pub device: u32,
    /// Model string, e.g. "NVIDIA GeForce RTX 3090".
    pub name: String,
    /// Compute-engine utilization percent, 0-100.
    pub utilization: u32,
    /// Memory-controller utilization percent, 0-100.
    pub memory_utilization: u32,
    /// Number of processes currently running on the device.
    pub processes: u32,
}
