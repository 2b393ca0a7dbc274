use alloc::vec::Vec;
use core::ops::Range;

use waterfall::{
    ConfigError, ItemType, LayoutEntry, MasonryItem, MasonryLayout, Relayout, RenderSlot,
    WindowTracker, WindowUpdate,
};

use crate::DriverOptions;

/// A cell the host should draw, keyed by `slot`.
#[derive(Debug)]
pub struct RenderedCell<'a, T> {
    pub index: usize,
    pub slot: usize,
    /// Top edge in scroll-container coordinates (content top plus header height).
    pub top: u64,
    pub entry: &'a LayoutEntry<T>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Visibility {
    current: bool,
    reported: bool,
}

/// A framework-neutral driver that feeds scroll events into a [`WindowTracker`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `set_items` whenever the item sequence changes (append-only growth is cheap)
/// - `mount` once the scroll container exists
/// - `on_scroll` for every raw scroll notification
/// - `tick` on the next scheduling tick after scroll events, to flush header/footer transitions
///
/// Callbacks receive plain values and no handle to the driver, so they cannot re-enter it.
#[derive(Clone, Debug)]
pub struct ViewportDriver<T> {
    options: DriverOptions,
    layout: MasonryLayout<T>,
    tracker: WindowTracker<T>,
    scroll_top: u64,
    header_height: u32,
    footer_height: u32,
    end_reached_armed: bool,
    shown: Option<Range<usize>>,
    header: Visibility,
    footer: Visibility,
}

impl<T: ItemType> ViewportDriver<T> {
    pub fn new(options: DriverOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let tracker = WindowTracker::new(options.window)?;
        Ok(Self {
            scroll_top: options.initial_scroll_top,
            header_height: options.window.scroll_margin,
            footer_height: 0,
            end_reached_armed: true,
            shown: None,
            header: Visibility::default(),
            footer: Visibility::default(),
            layout: MasonryLayout::new(),
            tracker,
            options,
        })
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    pub fn layout(&self) -> &MasonryLayout<T> {
        &self.layout
    }

    pub fn tracker(&self) -> &WindowTracker<T> {
        &self.tracker
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn header_height(&self) -> u32 {
        self.header_height
    }

    pub fn footer_height(&self) -> u32 {
        self.footer_height
    }

    /// Header, content and footer stacked.
    pub fn total_height(&self) -> u64 {
        self.header_height as u64 + self.layout.content_height() + self.footer_height as u64
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.options.window.viewport_height as u64)
    }

    /// Items currently intersecting the viewport (not the pre-render band).
    pub fn shown_range(&self) -> Option<Range<usize>> {
        self.shown.clone()
    }

    pub fn header_visible(&self) -> bool {
        self.header.reported
    }

    pub fn footer_visible(&self) -> bool {
        self.footer.reported
    }

    fn is_mounted(&self) -> bool {
        self.tracker.last_scroll_top().is_some()
    }

    /// Lays out `items` with the current options.
    ///
    /// After a full relayout the window is rebuilt from scratch; after append-only growth it is
    /// extended in place at the tail, whatever the direction of the last raw scroll event.
    pub fn set_items<I>(&mut self, items: &[I]) -> Result<Relayout, ConfigError>
    where
        I: MasonryItem<Type = T>,
    {
        let kind = self.layout.relayout(items, &self.options.layout)?;
        if !self.is_mounted() {
            return Ok(kind);
        }
        match kind {
            Relayout::Unchanged => return Ok(kind),
            Relayout::Full => {
                self.tracker.reset(self.scroll_top, self.layout.entries());
            }
            Relayout::Appended { .. } => {
                // Must run forward to grow the tail, even after a throttled scroll up.
                let at = self
                    .tracker
                    .last_scroll_top()
                    .map_or(self.scroll_top, |last| last.max(self.scroll_top));
                self.tracker.update(at, self.layout.entries());
            }
        }
        self.check_end_reached();
        self.compute_show_events();
        Ok(kind)
    }

    /// Replaces the options and relayouts `items` (fully, if the geometry changed).
    pub fn set_options<I>(
        &mut self,
        mut options: DriverOptions,
        items: &[I],
    ) -> Result<Relayout, ConfigError>
    where
        I: MasonryItem<Type = T>,
    {
        options.validate()?;
        options.window.scroll_margin = self.header_height;
        self.tracker.set_options(options.window)?;
        self.options = options;
        self.set_items(items)
    }

    pub fn set_viewport_height(&mut self, viewport_height: u32) {
        self.options.window.viewport_height = viewport_height;
        self.tracker.set_viewport_height(viewport_height);
    }

    /// Reports the header's current height. Content shifts down by this amount.
    pub fn on_header_height(&mut self, height: u32) {
        if self.header_height == height {
            return;
        }
        vdebug!(height, "header height changed");
        self.header_height = height;
        self.options.window.scroll_margin = height;
        self.tracker.set_scroll_margin(height);
        if self.is_mounted() {
            self.tracker.update(self.scroll_top, self.layout.entries());
            self.compute_show_events();
        }
    }

    /// Reports the footer's current height.
    pub fn on_footer_height(&mut self, height: u32) {
        if self.footer_height == height {
            return;
        }
        vdebug!(height, "footer height changed");
        self.footer_height = height;
        if self.is_mounted() {
            self.compute_show_events();
        }
    }

    /// Computes the first window at `initial_scroll_top` and evaluates show/hide state.
    pub fn mount(&mut self) -> WindowUpdate {
        self.scroll_top = self.options.initial_scroll_top;
        vdebug!(scroll_top = self.scroll_top, "mount");
        let update = self.tracker.update(self.scroll_top, self.layout.entries());
        self.check_end_reached();
        self.compute_show_events();
        update
    }

    /// Handles a raw scroll notification.
    ///
    /// Returns the window update when the throttle let it through. Cell show/hide is evaluated
    /// before the update and again after it, so a long jump reports the cells it lands on.
    pub fn on_scroll(&mut self, scroll_top: u64) -> Option<WindowUpdate> {
        self.scroll_top = scroll_top;
        self.check_end_reached();
        if let Some(cb) = &self.options.on_scroll {
            cb(scroll_top);
        }
        self.compute_show_events();

        if let Some(last) = self.tracker.last_scroll_top() {
            if last.abs_diff(scroll_top) < self.options.scroll_throttle {
                vtrace!(scroll_top, last, "on_scroll: throttled");
                return None;
            }
        }
        let update = self.tracker.update(scroll_top, self.layout.entries());
        self.compute_cell_show_events();
        Some(update)
    }

    /// Flushes header/footer transitions accumulated since the previous tick.
    ///
    /// Toggles that cancel out between two ticks fire nothing.
    pub fn tick(&mut self) {
        if self.header.current != self.header.reported {
            self.header.reported = self.header.current;
            let cb = if self.header.current {
                &self.options.on_header_show
            } else {
                &self.options.on_header_hide
            };
            if let Some(cb) = cb {
                cb();
            }
        }
        if self.footer.current != self.footer.reported {
            self.footer.reported = self.footer.current;
            let cb = if self.footer.current {
                &self.options.on_footer_show
            } else {
                &self.options.on_footer_hide
            };
            if let Some(cb) = cb {
                cb();
            }
        }
    }

    /// Drops every rendering slot and recomputes the window at the current offset.
    pub fn reset_list(&mut self) -> WindowUpdate {
        vdebug!(scroll_top = self.scroll_top, "reset_list");
        let update = self.tracker.reset(self.scroll_top, self.layout.entries());
        self.compute_show_events();
        update
    }

    /// Programmatically moves to `offset` (clamped) and updates the window immediately.
    ///
    /// Returns the applied offset; the adapter is expected to move the real scroll container
    /// there.
    pub fn scroll_to(&mut self, offset: u64) -> u64 {
        let offset = offset.min(self.max_scroll_offset());
        self.scroll_top = offset;
        self.tracker.update(offset, self.layout.entries());
        self.compute_show_events();
        offset
    }

    /// Iterates over cells to draw without allocating. Order is unspecified; cells are keyed by
    /// `slot`.
    pub fn for_each_rendered<'a>(&'a self, mut f: impl FnMut(RenderedCell<'a, T>)) {
        self.tracker.for_each_rendered(|s| {
            if let Some(cell) = self.cell(s) {
                f(cell);
            }
        });
    }

    /// Collects cells to draw into `out` (clears `out` first), sorted by slot.
    pub fn collect_rendered<'a>(&'a self, out: &mut Vec<RenderedCell<'a, T>>) {
        out.clear();
        self.for_each_rendered(|cell| out.push(cell));
        out.sort_unstable_by_key(|cell| cell.slot);
    }

    fn cell(&self, s: RenderSlot) -> Option<RenderedCell<'_, T>> {
        let entry = self.layout.entries().get(s.index)?;
        Some(RenderedCell {
            index: s.index,
            slot: s.slot,
            top: entry.top.saturating_add(self.header_height as u64),
            entry,
        })
    }

    fn check_end_reached(&mut self) {
        let remaining = self.total_height() as i128
            - self.scroll_top as i128
            - self.options.window.viewport_height as i128;
        if remaining >= self.options.end_reached_threshold as i128 {
            self.end_reached_armed = true;
            return;
        }
        if !self.end_reached_armed {
            return;
        }
        self.end_reached_armed = false;
        vdebug!(scroll_top = self.scroll_top, remaining, "end reached");
        if let Some(cb) = &self.options.on_end_reached {
            cb();
        }
    }

    fn compute_show_events(&mut self) {
        self.compute_cell_show_events();

        let header = self.header_height as u64;
        let view_end = self
            .scroll_top
            .saturating_add(self.options.window.viewport_height as u64);
        self.header.current = self.scroll_top < header;
        self.footer.current = self.footer_height > 0
            && view_end > header.saturating_add(self.layout.content_height());
    }

    fn visible_cells(&self) -> Option<Range<usize>> {
        let window = self.tracker.window_range()?;
        let entries = self.layout.entries();
        let header = self.header_height as u64;
        let view_start = self.scroll_top;
        let view_end = view_start.saturating_add(self.options.window.viewport_height as u64);

        let mut first = None;
        let mut end = window.end;
        for index in window {
            let Some(entry) = entries.get(index) else {
                end = index;
                break;
            };
            let top = entry.top.saturating_add(header);
            match first {
                None if top >= view_end => return None,
                None => {
                    if top.saturating_add(entry.height as u64) > view_start {
                        first = Some(index);
                    }
                }
                Some(_) => {
                    if top >= view_end {
                        end = index;
                        break;
                    }
                }
            }
        }
        first.map(|first| first..end)
    }

    fn compute_cell_show_events(&mut self) {
        let next = self.visible_cells();
        if next == self.shown {
            return;
        }
        let prev = core::mem::replace(&mut self.shown, next.clone());
        let was_shown = |i: usize| prev.as_ref().is_some_and(|r| r.contains(&i));
        let is_shown = |i: usize| next.as_ref().is_some_and(|r| r.contains(&i));

        if let Some(cb) = &self.options.on_cell_show {
            for i in next.clone().into_iter().flatten() {
                if !was_shown(i) {
                    cb(i);
                }
            }
        }
        if let Some(cb) = &self.options.on_cell_hide {
            for i in prev.clone().into_iter().flatten() {
                if !is_shown(i) {
                    cb(i);
                }
            }
        }
    }
}
