//! Binary comment stream decoding
//!
//! This module turns the length-delimited comment stream into records:
//! - Bounded, copy-free cursor over the input (`reader`)
//! - Field-number mapping for comment sub-records (`decoder`)

pub mod decoder;
pub mod reader;

pub use decoder::{decode, decode_segments};
