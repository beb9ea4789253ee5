//! XML markup rendering
//!
//! Writes decoded comments as the classic `<i><d p="...">text</d></i>`
//! document, optionally keeping only comments sent on a given local date
//! and/or hour (civil time UTC+8).

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};

use crate::error::{DanmakuError, Result};
use crate::types::CommentRecord;

/// Civil-time offset used for date/hour filtering, in seconds east of UTC
const LOCAL_OFFSET_SECS: i32 = 8 * 3600;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Send-time filter applied to `created_at`.
#[derive(Debug, Clone, Copy)]
pub struct SendTimeFilter {
    date: Option<NaiveDate>,
    hour: Option<u32>,
    offset: FixedOffset,
}

impl SendTimeFilter {
    /// Build a filter from the caller-supplied date (`YYYY-MM-DD`) and hour (0-23).
    pub fn new(date: Option<&str>, hour: Option<u32>) -> Result<Self> {
        let date = date
            .map(|s| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
                    DanmakuError::InvalidFilter(format!("date {:?}: {}", s, e))
                })
            })
            .transpose()?;

        if let Some(h) = hour {
            if h > 23 {
                return Err(DanmakuError::InvalidFilter(format!(
                    "hour {} is outside 0-23",
                    h
                )));
            }
        }

        let offset = FixedOffset::east_opt(LOCAL_OFFSET_SECS).ok_or_else(|| {
            DanmakuError::InvalidFilter("local time offset out of range".to_string())
        })?;

        Ok(Self { date, hour, offset })
    }

    pub fn is_active(&self) -> bool {
        self.date.is_some() || self.hour.is_some()
    }

    /// Whether a comment sent at `created_at` (epoch seconds) passes.
    pub fn matches(&self, created_at: i64) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(utc) = DateTime::from_timestamp(created_at, 0) else {
            return false;
        };
        let local = utc.with_timezone(&self.offset);

        if let Some(date) = self.date {
            if local.date_naive() != date {
                return false;
            }
        }
        if let Some(hour) = self.hour {
            if local.hour() != hour {
                return false;
            }
        }
        true
    }
}

/// Render records as an XML document, keeping stream order.
pub fn to_markup(
    records: &[CommentRecord],
    date_filter: Option<&str>,
    hour_filter: Option<u32>,
) -> Result<String> {
    let filter = SendTimeFilter::new(date_filter, hour_filter)?;

    let mut out = String::with_capacity(64 + records.len() * 96);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str("<i>");

    let mut kept = 0usize;
    for record in records.iter().filter(|r| filter.matches(r.created_at)) {
        out.push('\n');
        write_comment(&mut out, record);
        kept += 1;
    }

    if kept > 0 {
        out.push('\n');
    }
    out.push_str("</i>\n");

    tracing::debug!(
        total = records.len(),
        kept,
        filtered = filter.is_active(),
        "rendered markup"
    );

    Ok(out)
}

fn write_comment(out: &mut String, record: &CommentRecord) {
    out.push_str("<d p=\"");
    out.push_str(&format!(
        "{}.{:03},{},{},{},{},{},",
        record.offset_ms / 1000,
        record.offset_ms % 1000,
        record.mode,
        record.font_size,
        record.color,
        record.created_at,
        record.pool,
    ));
    out.push_str(&escape_xml(&record.sender_hash));
    out.push(',');
    out.push_str(&escape_xml(&record.external_id));
    out.push_str("\">");
    out.push_str(&escape_xml(&record.text));
    out.push_str("</d>");
}

/// Whether a character survives display sanitising.
///
/// C0 controls other than tab, LF and CR are dropped, as is the whole
/// DEL..C1 range (U+007F to U+009F).
pub(crate) fn is_displayable(c: char) -> bool {
    let cp = c as u32;
    if cp < 0x20 {
        return matches!(c, '\t' | '\n' | '\r');
    }
    !(0x7f..=0x9f).contains(&cp)
}

/// Remove control characters that must not reach a rendered document
pub fn strip_control_chars(text: &str) -> String {
    text.chars().filter(|&c| is_displayable(c)).collect()
}

/// Strip control characters, then escape the five XML reserved characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_displayable(c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
