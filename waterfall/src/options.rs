use crate::ConfigError;

/// Geometry of the masonry layout.
///
/// Equality of the whole struct defines a layout epoch: any difference forces a full relayout from
/// index 0, while an unchanged value only lays out newly appended items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    pub columns: usize,
    /// Space between the container's left edge and the first column.
    pub left_gap: u32,
    /// Space between the last column and the container's right edge.
    pub right_gap: u32,
    /// Space between adjacent columns.
    pub column_gap: u32,
    /// Container width.
    pub width: u32,
    /// Opaque key; changing it forces a full relayout even when the geometry is the same.
    pub relayout_key: u64,
}

impl LayoutOptions {
    pub fn new(columns: usize, width: u32) -> Self {
        Self {
            columns,
            left_gap: 0,
            right_gap: 0,
            column_gap: 0,
            width,
            relayout_key: 0,
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_gaps(mut self, left_gap: u32, right_gap: u32, column_gap: u32) -> Self {
        self.left_gap = left_gap;
        self.right_gap = right_gap;
        self.column_gap = column_gap;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_relayout_key(mut self, relayout_key: u64) -> Self {
        self.relayout_key = relayout_key;
        self
    }

    /// Width of a single column.
    pub fn item_width(&self) -> Result<f32, ConfigError> {
        if self.columns < 1 {
            return Err(ConfigError::InvalidColumnCount);
        }
        let gaps = (self.columns as i64 - 1).saturating_mul(self.column_gap as i64);
        let free = self.width as i64 - self.left_gap as i64 - self.right_gap as i64 - gaps;
        let item_width = free as f32 / self.columns as f32;
        if item_width > 0.0 {
            Ok(item_width)
        } else {
            Err(ConfigError::NonPositiveItemWidth {
                width: self.width,
                item_width,
            })
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.item_width().map(|_| ())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Viewport configuration for [`crate::WindowTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowOptions {
    pub viewport_height: u32,
    /// How many viewport heights are kept materialized, split evenly above and below the
    /// viewport (`5.0` keeps two viewports above and two below).
    pub lookahead: f32,
    /// Distance from the top of the scroll container to the start of the content area (e.g. a
    /// header's height).
    pub scroll_margin: u32,
}

impl WindowOptions {
    pub const DEFAULT_LOOKAHEAD: f32 = 5.0;

    pub fn new(viewport_height: u32) -> Self {
        Self {
            viewport_height,
            lookahead: Self::DEFAULT_LOOKAHEAD,
            scroll_margin: 0,
        }
    }

    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    pub fn with_lookahead(mut self, lookahead: f32) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_scroll_margin(mut self, scroll_margin: u32) -> Self {
        self.scroll_margin = scroll_margin;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead.is_finite() && self.lookahead >= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidLookahead(self.lookahead))
        }
    }

    /// Buffer kept above the viewport.
    pub fn top_offset(&self) -> u64 {
        self.buffer() as u64
    }

    /// Distance from the scroll offset to the end of the band (buffer plus one viewport).
    pub fn bottom_offset(&self) -> u64 {
        (self.buffer() + self.viewport_height as f64) as u64
    }

    fn buffer(&self) -> f64 {
        let factor = (self.lookahead as f64 - 1.0).max(0.0);
        self.viewport_height as f64 * factor / 2.0
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new(0)
    }
}
