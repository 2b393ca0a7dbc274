use alloc::vec::Vec;

use crate::{ConfigError, LayoutEntry, LayoutOptions, MasonryItem, Relayout};

/// Greedy shortest-column-first masonry layout.
///
/// Layout is append-only within an epoch (see [`LayoutOptions`]): entries, once created, are never
/// re-packed, so `top + height` of an existing entry is stable until the next full relayout.
///
/// Note: with more than one column, `top` is only approximately non-decreasing in index order (a
/// later item can land in a shorter column). Window scans rely on that approximation.
#[derive(Clone, Debug)]
pub struct MasonryLayout<T> {
    entries: Vec<LayoutEntry<T>>,
    column_heights: Vec<u64>,
    epoch: Option<LayoutOptions>,
}

impl<T> Default for MasonryLayout<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MasonryLayout<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            column_heights: Vec::new(),
            epoch: None,
        }
    }

    /// Lays out `items`, deciding between full and append-only work.
    ///
    /// A full relayout happens when `options` differ from the previous call's, or when `items`
    /// is shorter than the current table (append-only layout cannot shrink).
    pub fn relayout<I>(
        &mut self,
        items: &[I],
        options: &LayoutOptions,
    ) -> Result<Relayout, ConfigError>
    where
        I: MasonryItem<Type = T>,
    {
        let epoch_changed = self.epoch.as_ref() != Some(options);
        self.compute_layout(items, epoch_changed, options)
    }

    /// Lays out `items` from index 0 (`epoch_changed`) or from the current table length.
    ///
    /// Column accumulators carry over between append-only calls and are reset to zero on a full
    /// relayout.
    pub fn compute_layout<I>(
        &mut self,
        items: &[I],
        epoch_changed: bool,
        options: &LayoutOptions,
    ) -> Result<Relayout, ConfigError>
    where
        I: MasonryItem<Type = T>,
    {
        let item_width = options.item_width()?;

        let full = epoch_changed
            || items.len() < self.entries.len()
            || self.column_heights.len() != options.columns;
        let from = if full {
            self.entries.clear();
            self.column_heights.clear();
            self.column_heights.resize(options.columns, 0);
            0
        } else {
            self.entries.len()
        };
        self.epoch = Some(*options);

        if !full && from == items.len() {
            return Ok(Relayout::Unchanged);
        }

        self.entries.reserve(items.len().saturating_sub(from));
        for item in &items[from..] {
            let column = self.shortest_column();
            let top = self.column_heights[column];
            let height = item.height();
            self.column_heights[column] = top.saturating_add(height as u64);
            self.entries.push(LayoutEntry {
                top,
                height,
                left: options.left_gap as f32
                    + column as f32 * (options.column_gap as f32 + item_width),
                width: item_width,
                column,
                item_type: item.item_type(),
            });
        }

        let kind = if full {
            Relayout::Full
        } else {
            Relayout::Appended { from }
        };
        vdebug!(
            ?kind,
            count = self.entries.len(),
            content_height = self.content_height(),
            "relayout"
        );
        Ok(kind)
    }

    fn shortest_column(&self) -> usize {
        let mut best = 0;
        for (i, &h) in self.column_heights.iter().enumerate() {
            if h < self.column_heights[best] {
                best = i;
            }
        }
        best
    }

    pub fn entries(&self) -> &[LayoutEntry<T>] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&LayoutEntry<T>> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn column_heights(&self) -> &[u64] {
        &self.column_heights
    }

    /// Height of the tallest column.
    pub fn content_height(&self) -> u64 {
        self.column_heights.iter().copied().max().unwrap_or(0)
    }

    /// Options of the current epoch, if any layout has been computed.
    pub fn options(&self) -> Option<&LayoutOptions> {
        self.epoch.as_ref()
    }
}
