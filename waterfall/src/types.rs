#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Input to [`crate::MasonryLayout`]: anything with a fixed height and a recycling type.
pub trait MasonryItem {
    type Type;

    fn height(&self) -> u32;
    fn item_type(&self) -> Self::Type;
}

/// A concrete item carrying an opaque payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<D, T> {
    pub height: u32,
    pub item_type: T,
    pub data: D,
}

impl<D, T> Item<D, T> {
    pub fn new(height: u32, item_type: T, data: D) -> Self {
        Self {
            height,
            item_type,
            data,
        }
    }
}

impl<D, T: Clone> MasonryItem for Item<D, T> {
    type Type = T;

    fn height(&self) -> u32 {
        self.height
    }

    fn item_type(&self) -> T {
        self.item_type.clone()
    }
}

/// Placement of a single item. Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutEntry<T> {
    /// Offset in the content area (excludes the header).
    pub top: u64,
    pub height: u32,
    pub left: f32,
    pub width: f32,
    pub column: usize,
    pub item_type: T,
}

impl<T> LayoutEntry<T> {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// A logical index paired with the rendering slot currently holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderSlot {
    pub index: usize,
    pub slot: usize,
}

/// A slot parked in a [`crate::RecyclePool`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolEntry<T> {
    pub index: usize,
    pub slot: usize,
    pub item_type: T,
}

impl<T> PoolEntry<T> {
    pub fn render_slot(&self) -> RenderSlot {
        RenderSlot {
            index: self.index,
            slot: self.slot,
        }
    }
}

/// The vertical band (in content coordinates) whose items must be materialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub start: u64,
    pub end: u64,
}

/// Summary of a [`crate::WindowTracker::update`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowUpdate {
    /// `true` iff at least one item entered the active window.
    pub changed: bool,
    pub direction: ScrollDirection,
    pub band: Band,
}

/// What a [`crate::MasonryLayout::relayout`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relayout {
    /// Nothing changed.
    Unchanged,
    /// Every entry was recomputed from index 0.
    Full,
    /// Entries `from..` were appended; earlier entries are untouched.
    Appended { from: usize },
}
