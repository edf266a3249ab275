use std::collections::HashMap;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use tracing::debug;

use crate::models::event::{Event, PresetEvent, DEFAULT_EVENT_COLOR};
use crate::utils::color::parse_hex_color;
use crate::utils::errors::ChartError;

lazy_static! {
    static ref PRESET_EVENTS: HashMap<&'static str, Vec<PresetEvent>> = {
        let mut m = HashMap::new();
        m.insert("TSLA", vec![
            PresetEvent { date: "2023-04-19", title: "Q1 Earnings Miss", image_url: "https://i.imgur.com/JNNRbVA.png" },
            PresetEvent { date: "2023-06-20", title: "Supercharger Deal", image_url: "https://i.imgur.com/8BKvGQP.png" },
            PresetEvent { date: "2023-10-18", title: "Cybertruck Production", image_url: "https://i.imgur.com/ixVHvry.png" },
            PresetEvent { date: "2024-01-24", title: "Q4 Earnings Report", image_url: "https://i.imgur.com/JNNRbVA.png" },
        ]);
        m.insert("AAPL", vec![
            PresetEvent { date: "2023-06-05", title: "Vision Pro Announcement", image_url: "https://i.imgur.com/QkIa5tS.png" },
            PresetEvent { date: "2023-09-12", title: "iPhone 15 Release", image_url: "https://i.imgur.com/jK3wDrk.png" },
            PresetEvent { date: "2024-02-01", title: "AI Strategy Announcement", image_url: "https://i.imgur.com/8BKvGQP.png" },
        ]);
        m.insert("MSFT", vec![
            PresetEvent { date: "2023-01-23", title: "OpenAI Investment", image_url: "https://i.imgur.com/8BKvGQP.png" },
            PresetEvent { date: "2023-05-23", title: "Build Conference", image_url: "https://i.imgur.com/QkIa5tS.png" },
            PresetEvent { date: "2023-10-03", title: "Surface Event", image_url: "https://i.imgur.com/jK3wDrk.png" },
        ]);
        m.insert("NVDA", vec![
            PresetEvent { date: "2025-01-08", title: "CES Keynote", image_url: "https://i.imgur.com/QkIa5tS.png" },
            PresetEvent { date: "2025-02-25", title: "AI Boom Earnings", image_url: "https://i.imgur.com/JNNRbVA.png" },
            PresetEvent { date: "2025-03-28", title: "New GPU Announcement", image_url: "https://s2.coinmarketcap.com/static/img/coins/200x200/25228.png" },
        ]);
        m.insert("GOOGL", vec![
            PresetEvent { date: "2023-05-10", title: "Google I/O", image_url: "https://i.imgur.com/QkIa5tS.png" },
            PresetEvent { date: "2023-08-16", title: "Gemini AI Launch", image_url: "https://i.imgur.com/8BKvGQP.png" },
            PresetEvent { date: "2023-10-04", title: "Pixel 8 Release", image_url: "https://i.imgur.com/jK3wDrk.png" },
        ]);
        m
    };
}

/// Built-in events for a symbol, if the catalog has any
pub fn preset_events(symbol: &str) -> Option<Vec<PresetEvent>> {
    PRESET_EVENTS.get(symbol.trim().to_uppercase().as_str()).cloned()
}

/// Parse a `YYYY-MM-DD` event date
pub fn parse_event_date(value: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ChartError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", value)))
}

/// Ordered list of the session's annotations
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    ///
    /// Fails without touching the list when the date or description is missing
    /// or the color is not a hex color. An empty image URL means no image.
    pub fn add(
        &mut self,
        date: Option<NaiveDate>,
        description: &str,
        color: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<&Event, ChartError> {
        let description = description.trim();
        let date = match date {
            Some(d) if !description.is_empty() => d,
            _ => {
                return Err(ChartError::Validation(
                    "Please provide both date and description for the event".to_string(),
                ))
            }
        };

        let color = color.map(str::trim).filter(|c| !c.is_empty()).unwrap_or(DEFAULT_EVENT_COLOR);
        parse_hex_color(color).map_err(ChartError::Validation)?;

        let image_url = image_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        self.events.push(Event {
            date,
            description: description.to_string(),
            color: color.to_string(),
            image_url,
        });
        debug!("Event store now holds {} events", self.events.len());

        Ok(&self.events[self.events.len() - 1])
    }

    /// Add every catalog event for `symbol`, returning how many were added
    pub fn add_presets(&mut self, symbol: &str) -> Result<usize, ChartError> {
        let presets = preset_events(symbol).ok_or_else(|| {
            ChartError::Validation(format!("No preset events for '{}'", symbol.trim().to_uppercase()))
        })?;

        for preset in &presets {
            let date = parse_event_date(preset.date)?;
            self.add(Some(date), preset.title, None, Some(preset.image_url))?;
        }
        Ok(presets.len())
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
