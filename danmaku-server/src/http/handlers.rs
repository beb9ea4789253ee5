//! HTTP request handlers
//!
//! Conversions run on the blocking pool; the decoder and renderers are plain
//! synchronous functions.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;

use danmaku_lib::DanmakuError;

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Send-time filter for `/markup`
#[derive(Debug, Default, Deserialize)]
pub struct MarkupQuery {
    /// Local (UTC+8) date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Local hour, 0-23
    pub hour: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Run a conversion on the blocking pool. The closure returns the document
/// and the number of records decoded.
async fn convert<F>(state: &AppState, format: &'static str, body: Bytes, f: F) -> Result<String>
where
    F: FnOnce(&[u8]) -> danmaku_lib::Result<(String, usize)> + Send + 'static,
{
    let bytes = body.len() as u64;
    let result = tokio::task::spawn_blocking(move || f(&body))
        .await
        .map_err(|e| ServerError::Internal(format!("conversion task failed: {}", e)))
        .and_then(|r| r.map_err(ServerError::from));

    match result {
        Ok((document, records)) => {
            state.metrics.record_conversion(format, bytes, records as u64);
            tracing::debug!(format, bytes, records, "converted stream");
            Ok(document)
        }
        Err(err) => {
            if matches!(err, ServerError::Library(DanmakuError::InvalidFilter(_))) {
                state.metrics.record_filter_rejection();
            }
            state.metrics.record_error(err.kind());
            tracing::warn!(format, error = %err, "conversion failed");
            Err(err)
        }
    }
}

fn document(content_type: &'static str, body: String) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static(content_type));
    headers.insert("Cache-Control", HeaderValue::from_static("no-cache"));
    (headers, body).into_response()
}

/// Decode endpoint
/// POST /decode
pub async fn decode_stream(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response> {
    let json = convert(&state, "json", body, |data| {
        let records = danmaku_lib::decode(data);
        Ok((danmaku_lib::to_json(&records)?, records.len()))
    })
    .await?;

    Ok(document("application/json", json))
}

/// Markup endpoint
/// POST /markup?date=YYYY-MM-DD&hour=H
pub async fn markup(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarkupQuery>,
    body: Bytes,
) -> Result<Response> {
    let xml = convert(&state, "xml", body, move |data| {
        let records = danmaku_lib::decode(data);
        let xml = danmaku_lib::to_markup(&records, query.date.as_deref(), query.hour)?;
        Ok((xml, records.len()))
    })
    .await?;

    Ok(document("application/xml; charset=utf-8", xml))
}

/// Subtitle endpoint
/// POST /subtitle
pub async fn subtitle(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response> {
    let layout = state.config.layout.clone();
    let script = convert(&state, "ass", body, move |data| {
        let records = danmaku_lib::decode(data);
        Ok((danmaku_lib::to_subtitle_with(&records, &layout), records.len()))
    })
    .await?;

    Ok(document("text/x-ssa; charset=utf-8", script))
}
