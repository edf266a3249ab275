pub mod chart_service;
pub mod event_service;
pub mod market_data_service;
pub mod thumbnail_service;
