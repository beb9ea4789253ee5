//! ASS subtitle rendering
//!
//! Comments are sorted by presentation time, assigned a lane and row by
//! [`layout::layout_events`] and written out by [`ass::AssWriter`].

pub mod ass;
pub mod layout;

use serde::{Deserialize, Serialize};

use crate::types::CommentRecord;

pub use layout::{layout_events, PlacedEvent};

/// Canvas and timing parameters for subtitle rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Font size used when a comment carries none
    pub base_font_size: u32,
    /// Vertical gap between rows
    pub line_padding: u32,
    /// How long a scrolling comment takes to cross the screen
    pub scroll_duration_secs: f64,
    /// How long a top/bottom comment stays on screen
    pub static_duration_secs: f64,
    pub font_name: String,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f64,
    /// Outline width of the default style
    pub outline: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            base_font_size: 36,
            line_padding: 4,
            scroll_duration_secs: 8.0,
            static_duration_secs: 5.0,
            font_name: "Microsoft YaHei".to_string(),
            opacity: 0.8,
            outline: 1.0,
        }
    }
}

impl LayoutConfig {
    pub fn row_height(&self) -> u32 {
        self.base_font_size.saturating_add(self.line_padding).max(1)
    }

    /// Rows available per lane, at least one
    pub fn row_count(&self) -> usize {
        ((self.height / self.row_height()) as usize).max(1)
    }
}

/// Render records as an ASS script with the default canvas.
pub fn to_subtitle(records: &[CommentRecord]) -> String {
    to_subtitle_with(records, &LayoutConfig::default())
}

/// Render records as an ASS script with an explicit layout configuration.
pub fn to_subtitle_with(records: &[CommentRecord], config: &LayoutConfig) -> String {
    let events = layout_events(records, config);
    ass::AssWriter::new(config).write(&events)
}
