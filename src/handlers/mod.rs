//! HTTP handlers for the city endpoints

use std::sync::Arc;

use crate::Result;
use crate::store::RecipeStore;
use crate::upstream::CityDataProvider;

pub mod info;
pub mod recipes;

// Anything that goes in here must be a handle that can be cloned per request.
// The underlying state itself is shared.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecipeStore>,
    pub upstream: Arc<dyn CityDataProvider>,
}

impl AppState {
    pub fn new(store: Arc<RecipeStore>, upstream: Arc<dyn CityDataProvider>) -> Self {
        Self { store, upstream }
    }

    /// Confirm the city exists upstream. The payload itself is not validated.
    pub(crate) async fn ensure_city_exists(&self, city_id: &str) -> Result<()> {
        self.upstream.fetch_city_info(city_id).await.map(|_| ())
    }
}
