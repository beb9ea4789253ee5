pub(crate) mod api;
pub(crate) mod error;
pub(crate) mod markup;
pub(crate) mod subtitle;
pub(crate) mod types;
pub(crate) mod wire;

#[cfg(test)]
pub(crate) mod tests;

pub use api::*;
pub use error::{DanmakuError, Result};
pub use markup::{escape_xml, strip_control_chars, SendTimeFilter};
pub use subtitle::ass::AssWriter;
pub use subtitle::layout::{estimate_width, LaneAllocator, RowSlot};
pub use subtitle::{LayoutConfig, PlacedEvent};
pub use types::{CommentRecord, Lane, Mode};
pub use wire::reader::{Tag, WireReader, WireType};
