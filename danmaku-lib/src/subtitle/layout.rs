//! Lane and row scheduling
//!
//! Each lane (scroll, top, bottom) owns one "free at" timestamp per screen
//! row. A comment takes the lowest row that is already free at its start
//! time. When every row of its lane is still busy it takes the row that frees
//! up first and overlaps the comment there; comments are never dropped or
//! delayed.

use super::LayoutConfig;
use crate::markup::strip_control_chars;
use crate::types::{CommentRecord, Lane, Mode};

/// Row chosen for one comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlot {
    pub row: usize,
    /// True when no row was free and the earliest-freeing row was reused
    pub overflow: bool,
}

/// Per-render arena of row free-at times, indexed by lane then row.
#[derive(Debug)]
pub struct LaneAllocator {
    free_at: [Vec<u64>; 3],
}

impl LaneAllocator {
    pub fn new(rows: usize) -> Self {
        let rows = rows.max(1);
        Self {
            free_at: [vec![0; rows], vec![0; rows], vec![0; rows]],
        }
    }

    pub fn rows(&self) -> usize {
        self.free_at[0].len()
    }

    /// Reserve a row of `lane` for `[start_ms, start_ms + duration_ms)`.
    pub fn place(&mut self, lane: Lane, start_ms: u64, duration_ms: u64) -> RowSlot {
        let rows = &mut self.free_at[lane.index()];

        let slot = match rows.iter().position(|&free| free <= start_ms) {
            Some(row) => RowSlot {
                row,
                overflow: false,
            },
            None => {
                // min_by_key keeps the first of equal minima, so ties go to the lowest row
                let row = rows
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, &free)| free)
                    .map(|(row, _)| row)
                    .unwrap_or(0);
                RowSlot {
                    row,
                    overflow: true,
                }
            }
        };

        rows[slot.row] = start_ms.saturating_add(duration_ms);
        slot
    }

    /// Free-at time of a row, for inspection
    pub fn free_at(&self, lane: Lane, row: usize) -> Option<u64> {
        self.free_at[lane.index()].get(row).copied()
    }
}

/// A comment with its layout decided, ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent {
    pub start_ms: u64,
    pub end_ms: u64,
    pub lane: Lane,
    pub mode: Mode,
    pub row: usize,
    pub overflow: bool,
    /// Font size actually used (record size or the configured base size)
    pub font_size: u32,
    pub color: u32,
    /// Estimated rendered width in pixels
    pub width_px: f64,
    /// Text with control characters removed, not yet escaped
    pub text: String,
}

impl PlacedEvent {
    /// Whether `[start, end)` of both events intersect
    pub fn overlaps(&self, other: &PlacedEvent) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}

/// Width estimate used for off-screen scroll coordinates
pub fn estimate_width(text: &str, font_size: u32) -> f64 {
    text.chars().count() as f64 * f64::from(font_size) * 0.6
}

/// Sort, filter and place every record, in presentation order.
pub fn layout_events(records: &[CommentRecord], config: &LayoutConfig) -> Vec<PlacedEvent> {
    let mut ordered: Vec<&CommentRecord> = records.iter().collect();
    // Vec::sort_by_key is stable: equal offsets keep stream order
    ordered.sort_by_key(|r| r.offset_ms);

    let mut allocator = LaneAllocator::new(config.row_count());
    let scroll_ms = secs_to_ms(config.scroll_duration_secs);
    let static_ms = secs_to_ms(config.static_duration_secs);

    let mut events = Vec::with_capacity(ordered.len());
    let mut overflows = 0usize;

    for record in ordered {
        let text = strip_control_chars(&record.text);
        if text.is_empty() {
            continue;
        }

        let mode = record.motion();
        let lane = mode.lane();
        let duration_ms = if lane.is_fixed() { static_ms } else { scroll_ms };
        let slot = allocator.place(lane, record.offset_ms, duration_ms);
        if slot.overflow {
            overflows += 1;
            tracing::trace!(
                ?lane,
                row = slot.row,
                start_ms = record.offset_ms,
                "all rows busy, overlapping on earliest free row"
            );
        }

        let font_size = if record.font_size == 0 {
            config.base_font_size
        } else {
            record.font_size
        };

        events.push(PlacedEvent {
            start_ms: record.offset_ms,
            end_ms: record.offset_ms.saturating_add(duration_ms),
            lane,
            mode,
            row: slot.row,
            overflow: slot.overflow,
            font_size,
            color: record.color & 0x00ff_ffff,
            width_px: estimate_width(&text, font_size),
            text,
        });
    }

    tracing::debug!(
        records = records.len(),
        events = events.len(),
        rows = allocator.rows(),
        overflows,
        "subtitle layout done"
    );

    events
}

fn secs_to_ms(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1000.0).round() as u64
    } else {
        0
    }
}
