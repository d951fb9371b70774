//! NVML telemetry provider: one-shot snapshot of every device on the
//! host. No polling, no caching.

use anyhow::{Context, Result};
use nvml_wrapper::Nvml;

use crate::gpu::GpuInfo;

pub struct GpuTelemetry {
    nvml: Nvml,
}

impl GpuTelemetry {
    pub fn init() -> Result<Self> {
        let nvml = init_nvml().context("NVML initialization failed")?;
        Ok(Self { nvml })
    }

    /// Queries every device once, in index order.
    pub fn snapshot(&self) -> Result<Vec<GpuInfo>> {
        let device_count = self
            .nvml
            .device_count()
            .context("failed to query device count")?;

        let mut snapshot = Vec::with_capacity(device_count as usize);
        for index in 0..device_count {
            let device = self
                .nvml
                .device_by_index(index)
                .with_context(|| format!("failed to open device {index}"))?;

            let name = device
                .name()
                .with_context(|| format!("failed to query name of device {index}"))?;
            let utilization = device
                .utilization_rates()
                .with_context(|| format!("failed to query utilization of device {index}"))?;
            let processes = device
                .running_compute_processes()
                .with_context(|| format!("failed to query processes of device {index}"))?;

            tracing::debug!(
                "device {}: {} util={}% mem_util={}% processes={}",
                index,
                name,
                utilization.gpu,
                utilization.memory,
                processes.len()
            );

            snapshot.push(GpuInfo {
                device: index,
                name,
                utilization: utilization.gpu,
                memory_utilization: utilization.memory,
                processes: processes.len() as u32,
            });
        }

        Ok(snapshot)
    }
}

fn init_nvml() -> Result<Nvml> {
    match Nvml::init() {
        Ok(nvml) => Ok(nvml),
        Err(_) => {
            tracing::warn!("Standard NVML init failed, trying with explicit library path");
            let nvml = Nvml::builder()
                .lib_path(std::ffi::OsStr::new("libnvidia-ml.so.1"))
                .init()?;
            Ok(nvml)
        }
    }
}
