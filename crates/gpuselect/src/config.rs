use clap::Parser;

use crate::select::Constraints;

/// Select idle or lightly-loaded NVIDIA GPUs.
///
/// Prints the indices of qualifying devices, comma separated, on
/// stdout. Thresholds default to 0, so the default request only
/// matches fully idle GPUs; raise them to relax the filter.
///
/// Exit codes: 0 when all requested devices were found, 1 when fewer
/// qualified, 2 on configuration or telemetry errors.
#[derive(Parser, Debug)]
#[command(version, about, verbatim_doc_comment)]
pub struct CliArgs {
    #[arg(
        long,
        short = 'c',
        env = "GPUSELECT_COUNT",
        default_value = "1",
        help = "Maximum number of GPUs to select"
    )]
    pub count: usize,

    #[arg(
        long,
        short = 'd',
        env = "GPUSELECT_DEVICES",
        value_delimiter = ',',
        help = "Restrict selection to these device indices, e.g. 0,2,3 (default: all devices)"
    )]
    pub devices: Vec<u32>,

    #[arg(
        long,
        short = 'n',
        env = "GPUSELECT_NAME",
        help = "Select only GPUs whose name contains this substring (case-sensitive)"
    )]
    pub name: Option<String>,

    #[arg(
        long,
        env = "GPUSELECT_UTIL",
        default_value = "0",
        help = "Maximum compute utilization percent a GPU may have"
    )]
    pub util: u32,

    #[arg(
        long,
        env = "GPUSELECT_MEM_UTIL",
        default_value = "0",
        help = "Maximum memory-controller utilization percent a GPU may have"
    )]
    pub mem_util: u32,

    #[arg(
        long,
        env = "GPUSELECT_PROCESSES",
        default_value = "0",
        help = "Maximum number of running compute processes a GPU may have"
    )]
    pub processes: u32,

    #[arg(
        long,
        help = "Print as CUDA_VISIBLE_DEVICES=<indices> for shell eval"
    )]
    pub export: bool,
}

impl CliArgs {
    /// Maps the parsed flags onto a selection request. Flags left at
    /// their defaults follow the documented contract: unset name and
    /// empty device list mean unrestricted, thresholds of 0 demand a
    /// fully idle metric. The custom selector has no CLI form.
    pub fn constraints(&self) -> Constraints {
        Constraints {
            count: self.count,
            devices: self.devices.clone(),
            name: self.name.clone(),
            max_utilization: self.util,
            max_memory_utilization: self.mem_util,
            max_processes: self.processes,
            selector: None,
        }
    }
}
