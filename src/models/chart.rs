//! Chart generation models

use chrono::{DateTime, Duration, Utc};

use super::config::Theme;
use super::series::PriceSeries;

/// An event resolved against the series: where its arrow points and what it says
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub bar_index: usize,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub text: String,
    pub color: String,
    pub image_url: Option<String>,
}

/// Inset rectangle in figure fractions, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetPlacement {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything the renderer needs, computed up front from the session state
#[derive(Debug, Clone)]
pub struct ChartPlan<'a> {
    pub series: &'a PriceSeries,
    pub symbol: String,
    pub theme: Theme,
    pub x_range: (DateTime<Utc>, DateTime<Utc>),
    pub price_range: (f64, f64),
    pub volume_max: f64,
    pub bar_half_width: Duration,
    pub month_ticks: Vec<DateTime<Utc>>,
    pub annotations: Vec<Annotation>,
}
