//! Event system for HarmLens.
//!
//! Synchronous dispatch over a handler trait. Escalation transition events
//! are the interface exposed to the external audit mirror — discrete,
//! append-only facts, never the mutable record itself.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::HarmlensEventHandler;
