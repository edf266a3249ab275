use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use super::models::{ApiError, ChartResponse};
use tracing::{debug, warn};

/// Yahoo Finance chart API client
pub struct YahooClient {
    http_client: HttpClient,
    base_url: String,
}

impl YahooClient {
    const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com";
    const BROWSER_AGENT: &'static str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against another host (mirrors, local fixtures)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// The endpoint rejects requests without a browser-like agent
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::BROWSER_AGENT));
        headers
    }

    /// Pull the provider's own description out of an error body, if it sent one
    fn provider_message(body_text: &str) -> String {
        serde_json::from_str::<ChartResponse>(body_text)
            .ok()
            .and_then(|r| r.chart.error)
            .map(|e| format!("{} ({})", e.description, e.code))
            .unwrap_or_else(|| body_text.to_string())
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = Self::provider_message(&body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            429 => {
                warn!("Rate limited by market data provider");
                ApiError::RateLimited
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    /// GET /v8/finance/chart/{symbol}?range={range}&interval={interval}
    ///
    /// # Returns
    /// * `Ok(ChartResponse)` - Raw chart payload, possibly with zero bars
    /// * `Err(ApiError)` - Transport, status or decoding failure
    pub async fn get_chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResponse, ApiError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!("GET {} range={} interval={}", url, range, interval);

        let response = self.http_client
            .get(&url)
            .headers(Self::create_headers())
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<ChartResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_prefers_envelope_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert_eq!(
            YahooClient::provider_message(body),
            "No data found, symbol may be delisted (Not Found)"
        );
        assert_eq!(YahooClient::provider_message("gateway timeout"), "gateway timeout");
    }

    #[tokio::test]
    async fn test_malformed_base_url_is_a_request_error() {
        let client = YahooClient::with_base_url("not a url".to_string());
        let err = client.get_chart("AAPL", "1y", "1d").await.unwrap_err();
        assert!(matches!(err, ApiError::RequestError(_)));
    }
}
