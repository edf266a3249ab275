//! Data models shared by the session, services and commands

pub mod chart;
pub mod config;
pub mod event;
pub mod series;
