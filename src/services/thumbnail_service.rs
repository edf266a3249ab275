use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::utils::errors::ChartError;

/// Fetch an image and resize it to a `size`×`size` thumbnail.
///
/// Accepts http(s) URLs and inline `data:image/...;base64,` URLs. Nothing is cached.
pub async fn load_thumbnail(http: &HttpClient, url: &str, size: u32) -> Result<RgbaImage, ChartError> {
    let bytes = if url.starts_with("data:") {
        decode_data_url(url)?
    } else {
        fetch_bytes(http, url).await?
    };

    decode_thumbnail(&bytes, size).map_err(|e| {
        warn!("Thumbnail decode failed for {}: {}", url, e);
        e
    })
}

async fn fetch_bytes(http: &HttpClient, url: &str) -> Result<Vec<u8>, ChartError> {
    debug!("Fetching thumbnail {}", url);
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| ChartError::Image(format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(ChartError::Image(format!("HTTP {} for {}", response.status(), url)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ChartError::Image(format!("Failed to read body: {}", e)))?;
    Ok(bytes.to_vec())
}

fn decode_data_url(url: &str) -> Result<Vec<u8>, ChartError> {
    let (header, payload) = url
        .split_once(',')
        .ok_or_else(|| ChartError::Image("Malformed data URL".to_string()))?;

    if !header.ends_with(";base64") {
        return Err(ChartError::Image("Only base64 data URLs are supported".to_string()));
    }

    BASE64
        .decode(payload.trim())
        .map_err(|e| ChartError::Image(format!("Invalid base64 payload: {}", e)))
}

/// Decode image bytes and resize with a Lanczos filter
pub fn decode_thumbnail(bytes: &[u8], size: u32) -> Result<RgbaImage, ChartError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ChartError::Image(format!("Failed to decode image: {}", e)))?;
    Ok(imageops::resize(&img.to_rgba8(), size, size, FilterType::Lanczos3))
}
