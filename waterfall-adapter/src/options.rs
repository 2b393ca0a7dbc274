use alloc::sync::Arc;

use waterfall::{ConfigError, LayoutOptions, WindowOptions};

/// A callback receiving a logical item index.
pub type IndexCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// A callback receiving the raw scroll offset.
pub type ScrollCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// A callback without arguments (header/footer transitions, end reached).
pub type SignalCallback = Arc<dyn Fn() + Send + Sync>;

/// Configuration for [`crate::ViewportDriver`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
#[derive(Clone)]
pub struct DriverOptions {
    pub layout: LayoutOptions,
    /// Viewport options. `window.scroll_margin` is the initial header height; later reports via
    /// [`crate::ViewportDriver::on_header_height`] take precedence.
    pub window: WindowOptions,

    /// Minimum scroll distance since the last applied update before the window is recomputed.
    pub scroll_throttle: u64,
    /// `on_end_reached` fires once the remaining scrollable distance drops below this.
    pub end_reached_threshold: u64,
    /// Offset applied by [`crate::ViewportDriver::mount`].
    pub initial_scroll_top: u64,

    pub on_scroll: Option<ScrollCallback>,
    pub on_end_reached: Option<SignalCallback>,
    pub on_cell_show: Option<IndexCallback>,
    pub on_cell_hide: Option<IndexCallback>,
    pub on_header_show: Option<SignalCallback>,
    pub on_header_hide: Option<SignalCallback>,
    pub on_footer_show: Option<SignalCallback>,
    pub on_footer_hide: Option<SignalCallback>,
}

impl DriverOptions {
    pub const DEFAULT_SCROLL_THROTTLE: u64 = 100;
    pub const DEFAULT_END_REACHED_THRESHOLD: u64 = 500;

    pub fn new(layout: LayoutOptions, viewport_height: u32) -> Self {
        Self {
            layout,
            window: WindowOptions::new(viewport_height),
            scroll_throttle: Self::DEFAULT_SCROLL_THROTTLE,
            end_reached_threshold: Self::DEFAULT_END_REACHED_THRESHOLD,
            initial_scroll_top: 0,
            on_scroll: None,
            on_end_reached: None,
            on_cell_show: None,
            on_cell_hide: None,
            on_header_show: None,
            on_header_hide: None,
            on_footer_show: None,
            on_footer_hide: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.window.validate()
    }

    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_window(mut self, window: WindowOptions) -> Self {
        self.window = window;
        self
    }

    pub fn with_lookahead(mut self, lookahead: f32) -> Self {
        self.window.lookahead = lookahead;
        self
    }

    pub fn with_scroll_throttle(mut self, scroll_throttle: u64) -> Self {
        self.scroll_throttle = scroll_throttle;
        self
    }

    pub fn with_end_reached_threshold(mut self, threshold: u64) -> Self {
        self.end_reached_threshold = threshold;
        self
    }

    pub fn with_initial_scroll_top(mut self, scroll_top: u64) -> Self {
        self.initial_scroll_top = scroll_top;
        self
    }

    pub fn with_on_scroll(mut self, f: Option<impl Fn(u64) + Send + Sync + 'static>) -> Self {
        self.on_scroll = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_end_reached(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_end_reached = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_cell_show(mut self, f: Option<impl Fn(usize) + Send + Sync + 'static>) -> Self {
        self.on_cell_show = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_cell_hide(mut self, f: Option<impl Fn(usize) + Send + Sync + 'static>) -> Self {
        self.on_cell_hide = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_header_show(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_header_show = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_header_hide(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_header_hide = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_footer_show(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_footer_show = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_footer_hide(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_footer_hide = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for DriverOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DriverOptions")
            .field("layout", &self.layout)
            .field("window", &self.window)
            .field("scroll_throttle", &self.scroll_throttle)
            .field("end_reached_threshold", &self.end_reached_threshold)
            .field("initial_scroll_top", &self.initial_scroll_top)
            .finish_non_exhaustive()
    }
}
