//! HTTP server module
//!
//! Conversion endpoints over the danmaku library:
//! - Raw stream to JSON records, XML markup or ASS subtitles
//! - Health, version and Prometheus metrics
//! - Request logging, CORS and body size limits

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
