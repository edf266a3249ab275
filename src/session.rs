use chrono::NaiveDate;
use image::RgbaImage;
use reqwest::Client as HttpClient;
use tracing::{info, warn};

use crate::api::yahoo::YahooClient;
use crate::config::Settings;
use crate::models::chart::ChartPlan;
use crate::models::config::{AssetType, ChartConfig, Interval, Period, Theme};
use crate::models::event::Event;
use crate::models::series::PriceSeries;
use crate::services::event_service::EventStore;
use crate::services::{chart_service, market_data_service, thumbnail_service};
use crate::utils::errors::ChartError;
use crate::utils::OutputArea;

/// The last successfully fetched series and the symbol it belongs to
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub symbol: String,
    pub series: PriceSeries,
}

/// One user's chart: selections, annotations and the cached dataset
pub struct ChartSession {
    config: ChartConfig,
    events: EventStore,
    current: Option<LoadedSeries>,
    market_data: YahooClient,
    http_client: HttpClient,
    settings: Settings,
}

impl ChartSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            config: ChartConfig::default(),
            events: EventStore::new(),
            current: None,
            market_data: YahooClient::with_base_url(settings.data_url.clone()),
            http_client: HttpClient::new(),
            settings,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn current(&self) -> Option<&LoadedSeries> {
        self.current.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.current.is_some()
    }

    pub fn set_symbol(&mut self, symbol: &str) {
        self.config.symbol = symbol.trim().to_uppercase();
    }

    pub fn set_period(&mut self, period: Period) {
        self.config.period = period;
    }

    pub fn set_interval(&mut self, interval: Interval) {
        self.config.interval = interval;
    }

    pub fn set_asset_type(&mut self, asset_type: AssetType) {
        self.config.asset_type = asset_type;
    }

    /// Change only the theme; cached data and events are untouched
    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
    }

    pub fn add_event(
        &mut self,
        date: Option<NaiveDate>,
        description: &str,
        color: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<&Event, ChartError> {
        self.events.add(date, description, color, image_url)
    }

    pub fn add_preset_events(&mut self, symbol: &str) -> Result<usize, ChartError> {
        self.events.add_presets(symbol)
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Fetch the configured symbol and redraw.
    ///
    /// The cached series and its symbol are replaced together, and only on success;
    /// after a failure the previous chart can still be redrawn.
    pub async fn load(&mut self, out: &mut OutputArea) -> Result<(), ChartError> {
        let symbol = self.config.symbol.clone();
        out.print(format!(
            "Fetching data for {} ({})...",
            symbol,
            self.config.asset_type.label()
        ));

        let series = market_data_service::fetch_price_series(
            &self.market_data,
            &symbol,
            self.config.period,
            self.config.interval,
        )
        .await?;

        out.print(format!("Retrieved {} data points", series.len()));
        info!("Loaded {} bars for {}", series.len(), symbol);
        self.current = Some(LoadedSeries { symbol, series });

        self.redraw(out).await.map(|_| ())
    }

    /// Plan for the cached series, or `None` when nothing is loaded
    pub fn chart_plan(&self) -> Option<Result<ChartPlan<'_>, ChartError>> {
        self.current.as_ref().map(|loaded| {
            chart_service::plan_chart(
                &loaded.series,
                &loaded.symbol,
                self.events.events(),
                self.config.theme,
            )
        })
    }

    /// Load each annotation's thumbnail; failures are reported and become `None`
    async fn resolve_thumbnails(&self, plan: &ChartPlan<'_>, out: &mut OutputArea) -> Vec<Option<RgbaImage>> {
        let mut thumbnails = Vec::with_capacity(plan.annotations.len());
        for annotation in &plan.annotations {
            let thumbnail = match &annotation.image_url {
                Some(url) => {
                    match thumbnail_service::load_thumbnail(&self.http_client, url, self.settings.thumbnail_size).await {
                        Ok(img) => Some(img),
                        Err(e) => {
                            warn!("Skipping thumbnail for '{}': {}", annotation.text, e);
                            out.print(e.to_string());
                            None
                        }
                    }
                }
                None => None,
            };
            thumbnails.push(thumbnail);
        }
        thumbnails
    }

    /// Render the cached series with the current events and theme.
    ///
    /// Returns `false` without drawing when no data has been loaded yet.
    pub async fn redraw(&self, out: &mut OutputArea) -> Result<bool, ChartError> {
        let Some(plan) = self.chart_plan().transpose()? else {
            return Ok(false);
        };

        let thumbnails = self.resolve_thumbnails(&plan, out).await;
        let png = chart_service::render_chart(&plan, &thumbnails, self.settings.width, self.settings.height)?;
        out.show_chart(png);
        Ok(true)
    }
}
