//! FanPulse REST API adapter.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::ApiClient;
pub use settings::ApiConfig;
