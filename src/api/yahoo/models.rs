use serde::Deserialize;

/// Body of `GET /v8/finance/chart/{symbol}`
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ProviderError>,
}

/// Error object embedded in the chart envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Unix seconds, one per bar; absent when the range holds no bars
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    pub symbol: String,
    /// Exchange offset from UTC in seconds
    #[serde(default, rename = "gmtoffset")]
    pub gmt_offset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-oriented OHLCV values; any cell may be null
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl Quote {
    fn value_at(values: &[Option<f64>], idx: usize) -> Option<f64> {
        values.get(idx).copied().flatten()
    }

    pub fn open_at(&self, idx: usize) -> Option<f64> {
        Self::value_at(&self.open, idx)
    }

    pub fn high_at(&self, idx: usize) -> Option<f64> {
        Self::value_at(&self.high, idx)
    }

    pub fn low_at(&self, idx: usize) -> Option<f64> {
        Self::value_at(&self.low, idx)
    }

    pub fn close_at(&self, idx: usize) -> Option<f64> {
        Self::value_at(&self.close, idx)
    }

    pub fn volume_at(&self, idx: usize) -> Option<f64> {
        Self::value_at(&self.volume, idx)
    }
}

/// Error type for market-data API calls
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request (e.g. unsupported range/interval combination)
    BadRequest(String),
    /// 401 Unauthorized
    Unauthorized(String),
    /// 403 Forbidden
    Forbidden(String),
    /// 404 Not Found, usually an unknown symbol
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited,
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited => write!(f, "Rate Limited by the data provider, try again later"),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}
