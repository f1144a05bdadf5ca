pub mod audio;
mod audio_output;
pub mod config;
pub mod devices;
pub mod engine;
pub mod error;
pub mod trigger;
pub mod watcher;

pub use audio::instruments::PingStatus;
pub use config::EngineConfig;
pub use devices::{list_output_devices, OutputSpec};
pub use engine::{AudioEngine, TriggerHandle};
pub use error::{DeviceOpenError, EngineError};
pub use trigger::{sweep_hits, Point, Sweep};
pub use watcher::{SharedSweep, SweepSource, TriggerLoop, DEFAULT_POLL_INTERVAL};
