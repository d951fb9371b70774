pub mod config;
pub mod gpu;
pub mod logging;
pub mod select;
pub mod telemetry;

pub use gpu::GpuInfo;
pub use select::filter_gpus;
pub use select::Constraints;
pub use select::SelectError;
pub use select::Selector;
pub use telemetry::GpuTelemetry;
