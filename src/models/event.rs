//! Event annotation models

use chrono::NaiveDate;

pub const DEFAULT_EVENT_COLOR: &str = "#FF9800";

/// A user-defined annotation pinned to a calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub date: NaiveDate,
    pub description: String,
    pub color: String,
    pub image_url: Option<String>,
}

/// Entry of the built-in event catalog
#[derive(Debug, Clone, Copy)]
pub struct PresetEvent {
    pub date: &'static str,
    pub title: &'static str,
    pub image_url: &'static str,
}
