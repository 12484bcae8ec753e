//! Data models for the gateway
//!
//! This module contains the domain models organized by concern:
//! - City: validated city insights
//! - Weather: today/tomorrow temperature predictions
//! - Recipe: locally stored recipes and their request/response shapes
//! - Info: the aggregated document returned by the info endpoint

pub mod city;
pub mod info;
pub mod recipe;
pub mod weather;

// Re-export all public types for convenient access
pub use city::{CityInfo, Coordinates};
pub use info::CityInfosResponse;
pub use recipe::{CreateRecipeRequest, Recipe, RecipeView};
pub use weather::{ForecastDay, TemperatureRange, WeatherEntry, WeatherPrediction};
