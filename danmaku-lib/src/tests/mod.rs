//! Integration testing module
//!
//! End-to-end tests across decoder and renderers:
//! - Stream decoding, truncation and noise
//! - Markup filtering and structure
//! - Subtitle layout and script structure

pub mod validation;
