//! Decoded comment records and their motion classes.

use serde::{Deserialize, Serialize};

/// A single decoded comment.
///
/// Records are produced in stream order by [`crate::decode`]; that order is
/// not guaranteed to be chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Presentation time in milliseconds from video start
    pub offset_ms: u64,
    /// Raw motion class, see [`Mode::from_raw`]
    pub mode: u32,
    /// Font size in pixels, 0 means the renderer default
    pub font_size: u32,
    /// 24-bit RGB colour
    pub color: u32,
    /// Unix epoch seconds at which the comment was sent
    pub created_at: i64,
    /// Opaque subtype classifier
    pub pool: u32,
    /// Opaque, already-hashed sender identifier
    pub sender_hash: String,
    /// Opaque identifier in the source system
    pub external_id: String,
    /// Comment body, possibly containing control characters
    pub text: String,
}

impl CommentRecord {
    /// Motion class of this record
    pub fn motion(&self) -> Mode {
        Mode::from_raw(self.mode)
    }

    /// Presentation time in seconds
    pub fn offset_secs(&self) -> f64 {
        self.offset_ms as f64 / 1000.0
    }
}

/// Motion class of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Right to left across the screen
    Scroll,
    /// Left to right across the screen
    ReverseScroll,
    /// Stationary, anchored to the bottom edge
    Bottom,
    /// Stationary, anchored to the top edge
    Top,
}

impl Mode {
    /// Map the raw wire value to a motion class. Unknown values scroll.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            4 => Mode::Bottom,
            5 => Mode::Top,
            6 => Mode::ReverseScroll,
            _ => Mode::Scroll,
        }
    }

    /// Layout lane this motion class is scheduled in
    pub fn lane(self) -> Lane {
        match self {
            Mode::Scroll | Mode::ReverseScroll => Lane::Scroll,
            Mode::Bottom => Lane::Bottom,
            Mode::Top => Lane::Top,
        }
    }
}

/// Independent pool of screen rows used by the subtitle layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Scroll,
    Top,
    Bottom,
}

impl Lane {
    pub(crate) fn index(self) -> usize {
        match self {
            Lane::Scroll => 0,
            Lane::Top => 1,
            Lane::Bottom => 2,
        }
    }

    /// Stationary lanes keep the comment in place for the static duration
    pub fn is_fixed(self) -> bool {
        !matches!(self, Lane::Scroll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_raw() {
        assert_eq!(Mode::from_raw(1), Mode::Scroll);
        assert_eq!(Mode::from_raw(2), Mode::Scroll);
        assert_eq!(Mode::from_raw(3), Mode::Scroll);
        assert_eq!(Mode::from_raw(0), Mode::Scroll);
        assert_eq!(Mode::from_raw(4), Mode::Bottom);
        assert_eq!(Mode::from_raw(5), Mode::Top);
        assert_eq!(Mode::from_raw(6), Mode::ReverseScroll);
        assert_eq!(Mode::from_raw(7), Mode::Scroll);
        assert_eq!(Mode::from_raw(u32::MAX), Mode::Scroll);
    }

    #[test]
    fn test_mode_lane() {
        assert_eq!(Mode::Scroll.lane(), Lane::Scroll);
        assert_eq!(Mode::ReverseScroll.lane(), Lane::Scroll);
        assert_eq!(Mode::Bottom.lane(), Lane::Bottom);
        assert_eq!(Mode::Top.lane(), Lane::Top);
        assert!(Lane::Top.is_fixed());
        assert!(!Lane::Scroll.is_fixed());
    }

    #[test]
    fn test_offset_secs() {
        let record = CommentRecord {
            offset_ms: 1500,
            ..Default::default()
        };
        assert_eq!(record.offset_secs(), 1.5);
    }

    #[test]
    fn test_record_json() {
        let record = CommentRecord {
            offset_ms: 42,
            mode: 5,
            text: "hello".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"offset_ms\":42"));
        let back: CommentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
