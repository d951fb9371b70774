use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use gpuselect::config::CliArgs;
use gpuselect::logging;
use gpuselect::select::filter_gpus;
use gpuselect::telemetry::GpuTelemetry;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &CliArgs) -> Result<ExitCode> {
    let telemetry = GpuTelemetry::init()?;
    let snapshot = telemetry.snapshot()?;

    let constraints = args.constraints();
    constraints.validate(&snapshot)?;

    let selected = filter_gpus(&snapshot, &constraints);
    for gpu in &selected {
        tracing::info!(
            "selected device {}: {} (util={}% mem_util={}% processes={})",
            gpu.device,
            gpu.name,
            gpu.utilization,
            gpu.memory_utilization,
            gpu.processes
        );
    }

    let indices = selected
        .iter()
        .map(|gpu| gpu.device.to_string())
        .collect::<Vec<_>>()
        .join(",");
    if args.export {
        println!("CUDA_VISIBLE_DEVICES={indices}");
    } else {
        println!("{indices}");
    }

    if selected.len() < constraints.count {
        tracing::warn!(
            "only {} of {} requested GPUs qualified",
            selected.len(),
            constraints.count
        );
    }
    Ok(ExitCode::from(exit_code(selected.len(), constraints.count)))
}

/// 0 when all requested devices were found, 1 on under-fulfillment
/// (including none found). Runtime errors map to 2 in `main`.
fn exit_code(selected: usize, requested: usize) -> u8 {
    if selected == requested {
        0
    } else {
        1
    }
}
