//! Aggregated city document served by the info endpoint

use serde::{Deserialize, Serialize};

use super::{CityInfo, Recipe, RecipeView, WeatherEntry, WeatherPrediction};

/// Response of `GET /cities/{cityId}/infos`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityInfosResponse {
    pub coordinates: [f64; 2],
    pub population: u64,
    pub known_for: Vec<String>,
    pub weather_predictions: [WeatherEntry; 2],
    pub recipes: Vec<RecipeView>,
}

impl CityInfosResponse {
    /// Merge validated upstream data with the city's local recipes
    #[must_use]
    pub fn assemble(city: CityInfo, weather: &WeatherPrediction, recipes: &[Recipe]) -> Self {
        Self {
            coordinates: city.coordinates.as_pair(),
            population: city.population,
            known_for: city.known_for,
            weather_predictions: weather.entries(),
            recipes: recipes.iter().map(RecipeView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, TemperatureRange};
    use serde_json::json;

    #[test]
    fn test_assemble_output_contract() {
        let city = CityInfo {
            coordinates: Coordinates::new(45.75, 4.85),
            population: 513_275,
            known_for: vec!["gastronomy".to_string(), "silk".to_string()],
        };
        let weather = WeatherPrediction {
            today: TemperatureRange { min: 8.0, max: 17.5 },
            tomorrow: TemperatureRange { min: 9.0, max: 19.0 },
        };
        let recipes = vec![Recipe {
            id: 1,
            content: "Quenelles with Nantua sauce".to_string(),
            city_id: "lyon".to_string(),
        }];

        let response = CityInfosResponse::assemble(city, &weather, &recipes);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "coordinates": [45.75, 4.85],
                "population": 513275,
                "knownFor": ["gastronomy", "silk"],
                "weatherPredictions": [
                    { "when": "today", "min": 8.0, "max": 17.5 },
                    { "when": "tomorrow", "min": 9.0, "max": 19.0 }
                ],
                "recipes": [{ "id": 1, "content": "Quenelles with Nantua sauce" }]
            })
        );
    }
}
