use thiserror::Error;

/// Caller misconfiguration, reported when options are applied.
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    #[error("column count must be at least 1")]
    InvalidColumnCount,
    #[error("item width {item_width} is not positive (container width {width})")]
    NonPositiveItemWidth { width: u32, item_width: f32 },
    #[error("lookahead factor {0} must be finite and at least 1")]
    InvalidLookahead(f32),
}
