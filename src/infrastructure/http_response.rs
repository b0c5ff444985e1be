// HTTP response utilities for rendered pages and JSON bodies
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// True when the client advertises Brotli with a non-zero quality.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(brotli_allowed))
        .unwrap_or(false)
}

fn brotli_allowed(coding: &str) -> bool {
    let mut params = coding.split(';').map(str::trim);
    if params.next() != Some("br") {
        return false;
    }
    params
        .filter_map(|p| p.strip_prefix("q=").or_else(|| p.strip_prefix("Q=")))
        .all(|q| q.trim().parse::<f32>().is_ok_and(|q| q > 0.0))
}

async fn brotli(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(bytes);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Build a response for a text body, optionally Brotli-compressed
pub async fn text_response(
    body: String,
    content_type: &'static str,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let raw = body.into_bytes();

    let (body_bytes, content_encoding) = if compress {
        let compressed = brotli(&raw).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(
            "Compressed: {} → {} bytes ({:.1}% reduction)",
            raw.len(),
            compressed.len(),
            (1.0 - compressed.len() as f64 / raw.len().max(1) as f64) * 100.0
        );
        (compressed, Some("br"))
    } else {
        tracing::debug!("Sending uncompressed: {} bytes", raw.len());
        (raw, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()))
        .header(header::VARY, "accept-encoding");

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Serialize `data` as a JSON response
pub fn json_response<T: Serialize>(data: &T) -> Result<Response<Body>, StatusCode> {
    let bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()))
        .body(Body::from(bytes))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        assert!(accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, br;q=0.8"));
        assert!(accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, br;q=0"));
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("br; q=0.000, gzip"));
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, broken"));
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        assert!(!accepts_brotli(&headers));
    }

    #[tokio::test]
    async fn test_compressed_body_decodes() {
        let page = "<p>Sales Report</p>".repeat(50);
        let response = text_response(page.clone(), "text/html; charset=utf-8", true)
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let mut decoder = BrotliDecoder::new(&bytes[..]);
        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).await.unwrap();
        assert_eq!(decoded, page);
    }

    #[tokio::test]
    async fn test_uncompressed_body() {
        let response = text_response("ok".to_string(), "text/plain", false).await.unwrap();
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "2");
    }
}
