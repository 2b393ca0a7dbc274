//! Scroll-event driver for the `waterfall` crate.
//!
//! The `waterfall` crate is UI-agnostic and focuses on layout and slot recycling. This crate
//! provides the framework-neutral glue a host needs around it:
//!
//! - throttled forwarding of scroll offsets into the window tracker
//! - per-item show/hide signals for the real viewport
//! - header/footer show/hide signals, coalesced until the next tick
//! - end-reached signalling, programmatic `scroll_to` and `reset_list`
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod driver;
mod options;

#[cfg(test)]
mod tests;

pub use driver::{RenderedCell, ViewportDriver};
pub use options::{DriverOptions, IndexCallback, ScrollCallback, SignalCallback};
