//! harmlens-core — shared types for the HarmLens risk engine.
//!
//! Holds everything both the engine and its hosts need: configuration with
//! layered TOML resolution, the error taxonomy, the event system, canonical
//! signal identity, and collaborator traits. No scoring logic lives here.

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod priority;
pub mod signal;
pub mod traits;

pub use config::{CliOverrides, HarmlensConfig};
pub use errors::{
    ConfigError, EscalationError, FusionError, HarmlensErrorCode, PipelineError, SignalError,
};
pub use events::{EventDispatcher, HarmlensEventHandler};
pub use priority::Priority;
pub use signal::{Evidence, RawSignal, SignalName, CHILD_FLAG};
pub use traits::{SignalSource, StaticSignalSource};
