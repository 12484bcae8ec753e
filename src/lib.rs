//! `city-info-gateway` - aggregates city insights, weather predictions and
//! user submitted recipes behind a small JSON API
//!
//! The info endpoint fetches a city, validates it, fetches the weather at its
//! coordinates, validates that too and merges in the recipes stored for the
//! city. Recipe endpoints create and delete recipes after checking the city
//! exists upstream.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod store;
pub mod upstream;
pub mod validate;
pub mod web;

// Re-export core types for public API
pub use config::GatewayConfig;
pub use error::{ApiError, GatewayError};
pub use handlers::AppState;
pub use models::{CityInfo, CityInfosResponse, Recipe, WeatherPrediction};
pub use store::RecipeStore;
pub use upstream::{CityDataProvider, UpstreamClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
