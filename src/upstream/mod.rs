//! Upstream city-insights and weather-prediction services
//!
//! Handlers only see the [`CityDataProvider`] trait, so they can be driven by
//! the HTTP [`UpstreamClient`] in production and by an in-process fake in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

pub mod client;

pub use client::UpstreamClient;

/// Source of raw city and weather payloads.
///
/// Payloads are returned unvalidated; see [`crate::validate`].
#[async_trait]
pub trait CityDataProvider: Send + Sync {
    /// Fetch city insights. Fails with `NotFound` when the city does not
    /// exist upstream and with `Upstream` on any other failure.
    async fn fetch_city_info(&self, city_id: &str) -> Result<Value>;

    /// Fetch today's and tomorrow's predictions for a position. Fails with
    /// `Upstream` on any failure, including a not-found status.
    async fn fetch_weather(&self, latitude: f64, longitude: f64) -> Result<Value>;
}
