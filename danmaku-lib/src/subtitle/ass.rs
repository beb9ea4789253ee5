//! ASS script writer
//!
//! Turns placed events into `Dialogue` lines with `\pos`/`\move` overrides
//! under a fixed header with a single `Default` style.

use super::layout::PlacedEvent;
use super::LayoutConfig;
use crate::types::{Lane, Mode};

const WHITE: u32 = 0x00ff_ffff;

const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, \
OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

/// Writes a complete ASS script for one render call
pub struct AssWriter<'a> {
    config: &'a LayoutConfig,
}

impl<'a> AssWriter<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Header followed by one `Dialogue` line per event
    pub fn write(&self, events: &[PlacedEvent]) -> String {
        let mut out = String::with_capacity(1024 + events.len() * 128);
        self.write_header(&mut out);
        for event in events {
            out.push_str(&self.dialogue_line(event));
            out.push('\n');
        }
        out
    }

    fn write_header(&self, out: &mut String) {
        let c = self.config;
        let alpha = opacity_to_alpha(c.opacity);

        out.push_str("[Script Info]\n");
        out.push_str("; Script generated by danmaku-lib\n");
        out.push_str("Title: Danmaku\n");
        out.push_str("ScriptType: v4.00+\n");
        out.push_str("WrapStyle: 2\n");
        out.push_str("ScaledBorderAndShadow: yes\n");
        out.push_str(&format!("PlayResX: {}\n", c.width));
        out.push_str(&format!("PlayResY: {}\n", c.height));
        out.push('\n');

        out.push_str("[V4+ Styles]\n");
        out.push_str(STYLE_FORMAT);
        out.push('\n');
        out.push_str(&format!(
            "Style: Default,{font},{size},&H{a:02X}FFFFFF,&H{a:02X}FFFFFF,&H{a:02X}000000,&H{a:02X}000000,\
0,0,0,0,100,100,0,0,1,{outline},0,7,0,0,0,1\n",
            font = c.font_name,
            size = c.base_font_size,
            a = alpha,
            outline = c.outline,
        ));
        out.push('\n');

        out.push_str("[Events]\n");
        out.push_str(EVENT_FORMAT);
        out.push('\n');
    }

    /// Single `Dialogue` line for a placed event, without trailing newline
    pub fn dialogue_line(&self, event: &PlacedEvent) -> String {
        format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{{{}}}{}",
            format_timestamp(event.start_ms),
            format_timestamp(event.end_ms),
            self.override_tags(event),
            escape_ass_text(&event.text),
        )
    }

    fn override_tags(&self, event: &PlacedEvent) -> String {
        let c = self.config;
        let y = event.row as u64 * u64::from(c.row_height());
        let width = i64::from(c.width);
        let text_width = event.width_px.round() as i64;

        let mut tags = match (event.lane, event.mode) {
            (Lane::Scroll, Mode::ReverseScroll) => {
                format!("\\an7\\move({},{},{},{})", -text_width, y, width, y)
            }
            (Lane::Scroll, _) => format!("\\an7\\move({},{},{},{})", width, y, -text_width, y),
            (Lane::Top, _) => format!("\\an8\\pos({},{})", width / 2, y),
            (Lane::Bottom, _) => format!(
                "\\an2\\pos({},{})",
                width / 2,
                i64::from(c.height) - y as i64
            ),
        };

        if event.font_size != c.base_font_size {
            tags.push_str(&format!("\\fs{}", event.font_size));
        }
        if event.color != WHITE {
            tags.push_str(&format!("\\c{}", ass_color(event.color)));
        }
        tags
    }
}

/// `H:MM:SS.cc`, centiseconds rounded from milliseconds
pub fn format_timestamp(ms: u64) -> String {
    let cs = ms.saturating_add(5) / 10;
    format!(
        "{}:{:02}:{:02}.{:02}",
        cs / 360_000,
        (cs / 6_000) % 60,
        (cs / 100) % 60,
        cs % 100
    )
}

/// ASS colours are written blue-green-red
pub fn ass_color(rgb: u32) -> String {
    let r = (rgb >> 16) & 0xff;
    let g = (rgb >> 8) & 0xff;
    let b = rgb & 0xff;
    format!("&H{:02X}{:02X}{:02X}&", b, g, r)
}

/// Escape override-block characters and turn line breaks into `\N`.
pub fn escape_ass_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\N");
            }
            '\n' => out.push_str("\\N"),
            _ => out.push(c),
        }
    }
    out
}

fn opacity_to_alpha(opacity: f64) -> u8 {
    let opacity = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        1.0
    };
    ((1.0 - opacity) * 255.0).round() as u8
}
