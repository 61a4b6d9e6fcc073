//! Collaborator traits.

pub mod signal_source;

pub use signal_source::{SignalSource, StaticSignalSource};
