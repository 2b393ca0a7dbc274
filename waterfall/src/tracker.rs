use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::ops::Range;

use crate::key::ItemType;
use crate::{
    Band, ConfigError, LayoutEntry, PoolEntry, RecyclePool, RenderSlot, ScrollDirection,
    WindowOptions, WindowUpdate,
};

/// Incremental window tracker with type-keyed slot recycling.
///
/// The tracker keeps a contiguous run of logical indices (the active window) that intersects the
/// must-render band, plus two pools of evicted slots: items that scrolled past the top edge and
/// items that scrolled past the bottom edge. Pooled slots are still reported as rendered; a pooled
/// slot stops being reported for its old index only when another index reuses it.
///
/// Slot numbers across the window and both pools are always exactly `0..slot_count()`.
///
/// The tracker holds no layout; every call receives the current layout table. Calls must be
/// serialized by the caller.
#[derive(Clone, Debug)]
pub struct WindowTracker<T> {
    options: WindowOptions,
    window: VecDeque<RenderSlot>,
    top: RecyclePool<T>,
    bottom: RecyclePool<T>,
    last_scroll_top: Option<u64>,
}

impl<T: ItemType> WindowTracker<T> {
    pub fn new(options: WindowOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            window: VecDeque::new(),
            top: RecyclePool::new(),
            bottom: RecyclePool::new(),
            last_scroll_top: None,
        })
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// Replaces the viewport options. The window is kept and adjusts on the next update.
    pub fn set_options(&mut self, options: WindowOptions) -> Result<(), ConfigError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn set_viewport_height(&mut self, viewport_height: u32) {
        self.options.viewport_height = viewport_height;
    }

    pub fn set_scroll_margin(&mut self, scroll_margin: u32) {
        self.options.scroll_margin = scroll_margin;
    }

    pub fn last_scroll_top(&self) -> Option<u64> {
        self.last_scroll_top
    }

    pub fn top_pool(&self) -> &RecyclePool<T> {
        &self.top
    }

    pub fn bottom_pool(&self) -> &RecyclePool<T> {
        &self.bottom
    }

    /// The active window, ordered by logical index.
    pub fn window(&self) -> impl ExactSizeIterator<Item = RenderSlot> + '_ {
        self.window.iter().copied()
    }

    /// Logical indices covered by the active window.
    pub fn window_range(&self) -> Option<Range<usize>> {
        let first = self.window.front()?.index;
        let last = self.window.back()?.index;
        Some(first..last + 1)
    }

    /// Number of distinct slots currently alive (window plus both pools).
    pub fn slot_count(&self) -> usize {
        self.window.len() + self.top.len() + self.bottom.len()
    }

    /// The must-render band for a scroll offset, in content coordinates.
    pub fn band_for(&self, scroll_top: u64) -> Band {
        let margin = self.options.scroll_margin as u64;
        Band {
            start: scroll_top.saturating_sub(self.options.top_offset().saturating_add(margin)),
            end: scroll_top
                .saturating_add(self.options.bottom_offset())
                .saturating_sub(margin),
        }
    }

    /// Drops the window and both pools. The next update starts cold.
    pub fn clear(&mut self) {
        self.window.clear();
        self.top.clear();
        self.bottom.clear();
        self.last_scroll_top = None;
    }

    /// Clears all state and recomputes the window at `scroll_top`.
    pub fn reset(&mut self, scroll_top: u64, entries: &[LayoutEntry<T>]) -> WindowUpdate {
        self.clear();
        self.update(scroll_top, entries)
    }

    /// Moves the window to `scroll_top`.
    ///
    /// Direction is decided against the previous call's offset; an unchanged offset counts as
    /// forward.
    pub fn update(&mut self, scroll_top: u64, entries: &[LayoutEntry<T>]) -> WindowUpdate {
        let band = self.band_for(scroll_top);
        let direction = match self.last_scroll_top {
            Some(prev) if scroll_top < prev => ScrollDirection::Backward,
            _ => ScrollDirection::Forward,
        };

        if self.has_stale_index(entries.len()) {
            vwarn!(
                count = entries.len(),
                "WindowTracker: layout shrank under the window, starting cold"
            );
            self.clear();
        }
        self.last_scroll_top = Some(scroll_top);

        let changed = if self.window.is_empty() {
            self.fill_cold(band, entries)
        } else {
            match direction {
                ScrollDirection::Forward => self.scroll_forward(band, entries),
                ScrollDirection::Backward => self.scroll_backward(band, entries),
            }
        };

        vtrace!(
            scroll_top,
            ?direction,
            band_start = band.start,
            band_end = band.end,
            window = self.window.len(),
            top_pool = self.top.len(),
            bottom_pool = self.bottom.len(),
            changed,
            "WindowTracker::update"
        );

        WindowUpdate {
            changed,
            direction,
            band,
        }
    }

    fn has_stale_index(&self, count: usize) -> bool {
        if self.window.iter().any(|s| s.index >= count) {
            return true;
        }
        let mut stale = false;
        let mut check = |e: &PoolEntry<T>| stale |= e.index >= count;
        self.top.for_each(&mut check);
        self.bottom.for_each(&mut check);
        stale
    }

    fn fill_cold(&mut self, band: Band, entries: &[LayoutEntry<T>]) -> bool {
        let Some(first) = entries.iter().position(|e| e.bottom() >= band.start) else {
            return false;
        };
        for index in first..entries.len() {
            if index > first && entries[index].top >= band.end {
                break;
            }
            let slot = self.acquire(index, entries, band, None);
            self.window.push_back(RenderSlot { index, slot });
        }
        true
    }

    fn scroll_forward(&mut self, band: Band, entries: &[LayoutEntry<T>]) -> bool {
        let Some(last) = self.window.back().map(|s| s.index) else {
            return false;
        };

        while let Some(front) = self.window.front().copied() {
            let entry = &entries[front.index];
            if entry.bottom() >= band.start {
                break;
            }
            self.window.pop_front();
            self.top.push(PoolEntry {
                index: front.index,
                slot: front.slot,
                item_type: entry.item_type.clone(),
            });
        }

        let mut next = last + 1;
        if self.window.is_empty() {
            // Everything was evicted: resume at the first entry reaching into the band.
            while next < entries.len() && entries[next].bottom() < band.start {
                next += 1;
            }
        }

        let mut changed = false;
        while next < entries.len() && entries[next].top < band.end {
            let slot = self.acquire(next, entries, band, Some(ScrollDirection::Forward));
            self.window.push_back(RenderSlot { index: next, slot });
            changed = true;
            next += 1;
        }
        changed
    }

    fn scroll_backward(&mut self, band: Band, entries: &[LayoutEntry<T>]) -> bool {
        let Some(first) = self.window.front().map(|s| s.index) else {
            return false;
        };

        while let Some(back) = self.window.back().copied() {
            let entry = &entries[back.index];
            if entry.top <= band.end {
                break;
            }
            self.window.pop_back();
            self.bottom.push(PoolEntry {
                index: back.index,
                slot: back.slot,
                item_type: entry.item_type.clone(),
            });
        }

        let mut cursor = first.checked_sub(1);
        if self.window.is_empty() {
            // Everything was evicted: resume at the last entry starting before the band's end.
            while let Some(i) = cursor {
                if entries[i].top < band.end {
                    break;
                }
                cursor = i.checked_sub(1);
            }
        }

        let mut changed = false;
        while let Some(index) = cursor {
            if entries[index].bottom() < band.start {
                break;
            }
            let slot = self.acquire(index, entries, band, Some(ScrollDirection::Backward));
            self.window.push_front(RenderSlot { index, slot });
            changed = true;
            cursor = index.checked_sub(1);
        }
        changed
    }

    /// Picks a slot for `index`, which is about to enter the window.
    ///
    /// A slot still parked for the same index is always reclaimed. Otherwise, when scrolling, a
    /// same-type slot is taken from the pool on the far side of travel (unconditionally), then
    /// from the near side if its item is still outside the band. Failing that, a fresh slot is
    /// allocated as `slot_count()`.
    fn acquire(
        &mut self,
        index: usize,
        entries: &[LayoutEntry<T>],
        band: Band,
        direction: Option<ScrollDirection>,
    ) -> usize {
        let fresh = self.slot_count();
        let item_type = &entries[index].item_type;

        let exact = match direction {
            Some(ScrollDirection::Backward) => self
                .top
                .remove(item_type, index)
                .or_else(|| self.bottom.remove(item_type, index)),
            _ => self
                .bottom
                .remove(item_type, index)
                .or_else(|| self.top.remove(item_type, index)),
        };
        if let Some(entry) = exact {
            return entry.slot;
        }

        let reused = match direction {
            None => None,
            Some(ScrollDirection::Forward) => {
                if let Some(old) = self.bottom.peek_oldest(item_type).map(|e| e.index) {
                    self.bottom.remove(item_type, old)
                } else if let Some(old) = self
                    .top
                    .peek_oldest(item_type)
                    .map(|e| e.index)
                    .filter(|&old| entries[old].bottom() < band.start)
                {
                    self.top.remove(item_type, old)
                } else {
                    None
                }
            }
            Some(ScrollDirection::Backward) => {
                if let Some(old) = self.top.peek_newest(item_type).map(|e| e.index) {
                    self.top.remove(item_type, old)
                } else if let Some(old) = self
                    .bottom
                    .peek_newest(item_type)
                    .map(|e| e.index)
                    .filter(|&old| entries[old].top > band.end)
                {
                    self.bottom.remove(item_type, old)
                } else {
                    None
                }
            }
        };

        reused.map_or(fresh, |entry| entry.slot)
    }

    /// Every rendered slot (both pools and the active window), sorted by slot number.
    pub fn collect_rendered(&self, out: &mut Vec<RenderSlot>) {
        out.clear();
        out.reserve(self.slot_count());
        self.for_each_rendered(|s| out.push(s));
        out.sort_unstable_by_key(|s| s.slot);
    }

    /// Allocating convenience wrapper around [`Self::collect_rendered`].
    pub fn rendered(&self) -> Vec<RenderSlot> {
        let mut out = Vec::new();
        self.collect_rendered(&mut out);
        out
    }

    /// Iterates over rendered slots without allocating: top pool, active window, bottom pool.
    /// Order within each pool is unspecified.
    pub fn for_each_rendered(&self, mut f: impl FnMut(RenderSlot)) {
        self.top.for_each(|e| f(e.render_slot()));
        self.window.iter().copied().for_each(&mut f);
        self.bottom.for_each(|e| f(e.render_slot()));
    }
}
