// HTTP response utilities for HTML panels and CSV downloads, with optional
// Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use tokio::io::AsyncReadExt;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Check if the client accepts Brotli compression
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(|enc| enc.trim().starts_with("br")))
        .unwrap_or(false)
}

async fn brotli(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(bytes);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Build a response, compressing the body when the client allows it.
async fn encoded_response(
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
    compress: bool,
    extra_headers: &[(header::HeaderName, HeaderValue)],
) -> Result<Response<Body>, StatusCode> {
    let (body_bytes, content_encoding) = if compress {
        let compressed = brotli(&body).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(
            "Compressed {} -> {} bytes ({:.1}% reduction)",
            body.len(),
            compressed.len(),
            (1.0 - compressed.len() as f64 / body.len().max(1) as f64) * 100.0
        );
        (compressed, Some("br"))
    } else {
        (body, None)
    };

    let mut response_builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body_bytes.len())
        .header(header::VARY, "accept-encoding");

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    for (name, value) in extra_headers {
        response_builder = response_builder.header(name, value);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub async fn html_response(
    status: StatusCode,
    html: String,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    encoded_response(status, HTML_CONTENT_TYPE, html.into_bytes(), compress, &[]).await
}

/// CSV download; `filename` must be ASCII.
pub async fn csv_response(
    filename: &str,
    csv: String,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| {
            tracing::error!("Invalid export filename {}: {}", filename, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    encoded_response(
        StatusCode::OK,
        CSV_CONTENT_TYPE,
        csv.into_bytes(),
        compress,
        &[(header::CONTENT_DISPOSITION, disposition)],
    )
    .await
}
