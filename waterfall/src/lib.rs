//! A headless recycling engine for virtualized multi-column ("waterfall"/masonry) lists.
//!
//! The crate covers the two stateful halves of list virtualization:
//! - [`MasonryLayout`]: greedy shortest-column-first packing, append-only within a layout epoch.
//! - [`WindowTracker`]: an incremental window over the layout that materializes only items near
//!   the viewport and hands rendering slots back and forth through two type-keyed
//!   [`RecyclePool`]s, so a host can update existing visual nodes instead of creating new ones.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - item heights and recycling types
//! - viewport height and scroll offset
//! - a way to draw a box at `(top, left, width, height)` keyed by slot number
//!
//! For scroll event handling (throttling, show/hide and end-reached signals), see the
//! `waterfall-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod key;
mod layout;
mod options;
mod pool;
mod tracker;
mod types;


pub use error::ConfigError;
pub use key::ItemType;
pub use layout::MasonryLayout;
pub use options::{LayoutOptions, WindowOptions};
pub use pool::RecyclePool;
pub use tracker::WindowTracker;
pub use types::{
    Band, Item, LayoutEntry, MasonryItem, PoolEntry, Relayout, RenderSlot, ScrollDirection,
    WindowUpdate,
};
