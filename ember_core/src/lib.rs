//! Core call-context and error machinery for the Ember runtime.
//!
//! This crate provides:
//! - Exception values (`Raised`, `ExcKind`) carried through return channels
//! - Call frames (`Frame`) with per-kind raise helpers
//! - Process-wide runtime configuration (`RuntimeConfig`)
//!
//! Failures never unwind. Every fallible runtime operation returns
//! `Result<T, Raised>` and propagates nested failures verbatim.

pub mod config;
pub mod frame;
pub mod raised;

// Re-export commonly used items
pub use config::{RuntimeConfig, runtime_config};
pub use frame::Frame;
pub use raised::{ExcKind, Raised};
