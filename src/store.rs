//! In-memory recipe store
//!
//! Recipes live for the lifetime of the process. Ids start at 1, strictly
//! increase and are never handed out twice, even after a deletion.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::Result;
use crate::error::GatewayError;
use crate::models::Recipe;

struct StoreInner {
    next_id: u64,
    // Ordered by id, which is also insertion order.
    recipes: BTreeMap<u64, Recipe>,
}

pub struct RecipeStore {
    inner: Mutex<StoreInner>,
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                next_id: 1,
                recipes: BTreeMap::new(),
            }),
        }
    }

    // Every operation completes under a single lock acquisition and the guard
    // never crosses an await point.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a new recipe under the next free id and returns it.
    #[tracing::instrument(name = "add_recipe", level = "debug", skip(self, content))]
    pub fn add(&self, city_id: &str, content: &str) -> Recipe {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let recipe = Recipe {
            id,
            content: content.to_string(),
            city_id: city_id.to_string(),
        };
        inner.recipes.insert(id, recipe.clone());
        tracing::debug!(id, "Recipe stored");
        recipe
    }

    pub fn get_by_id(&self, id: u64) -> Option<Recipe> {
        self.lock().recipes.get(&id).cloned()
    }

    /// All recipes of a city, in insertion order.
    pub fn get_by_city_id(&self, city_id: &str) -> Vec<Recipe> {
        self.lock()
            .recipes
            .values()
            .filter(|recipe| recipe.city_id == city_id)
            .cloned()
            .collect()
    }

    /// Removes a recipe. Returns whether anything was removed.
    #[tracing::instrument(name = "delete_recipe", level = "debug", skip(self))]
    pub fn delete_by_id(&self, id: u64) -> bool {
        self.lock().recipes.remove(&id).is_some()
    }

    /// Removes a recipe only if it belongs to `city_id`. The lookup and the
    /// removal share one lock, so concurrent deletes of the same id see exactly
    /// one success.
    #[tracing::instrument(name = "delete_city_recipe", level = "debug", skip(self))]
    pub fn delete_for_city(&self, id: u64, city_id: &str) -> Result<Recipe> {
        let mut inner = self.lock();
        match inner.recipes.get(&id) {
            None => Err(GatewayError::not_found("Recipe not found")),
            Some(recipe) if recipe.city_id != city_id => {
                Err(GatewayError::not_found("Recipe not found for this city"))
            }
            Some(_) => inner
                .recipes
                .remove(&id)
                .ok_or_else(|| GatewayError::not_found("Recipe not found")),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let store = RecipeStore::new();
        let first = store.add("paris", "Croque monsieur");
        let second = store.add("lyon", "Salade lyonnaise");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = RecipeStore::new();
        let first = store.add("paris", "Croque monsieur");
        let second = store.add("paris", "Soupe a l'oignon");

        assert!(store.delete_by_id(second.id));
        assert!(store.delete_by_id(first.id));
        assert!(store.is_empty());

        let third = store.add("paris", "Paris-Brest pastry");
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_get_by_id() {
        let store = RecipeStore::new();
        let recipe = store.add("nice", "Salade nicoise");

        assert_eq!(store.get_by_id(recipe.id), Some(recipe));
        assert_eq!(store.get_by_id(42), None);
    }

    #[test]
    fn test_get_by_city_id_filters_and_keeps_order() {
        let store = RecipeStore::new();
        store.add("paris", "Croque monsieur");
        store.add("lyon", "Salade lyonnaise");
        store.add("paris", "Soupe a l'oignon");

        let paris: Vec<u64> = store
            .get_by_city_id("paris")
            .iter()
            .map(|recipe| recipe.id)
            .collect();
        assert_eq!(paris, vec![1, 3]);
        assert!(store.get_by_city_id("marseille").is_empty());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let store = RecipeStore::new();
        let recipe = store.add("paris", "Croque monsieur");

        assert!(!store.delete_by_id(99));
        assert!(store.delete_by_id(recipe.id));
        assert!(!store.delete_by_id(recipe.id));
    }

    #[test]
    fn test_delete_for_city_checks_owner() {
        let store = RecipeStore::new();
        let recipe = store.add("paris", "Croque monsieur");

        let err = store.delete_for_city(recipe.id, "lyon").unwrap_err();
        assert_eq!(err.user_message(), "Recipe not found for this city");
        assert_eq!(store.len(), 1);

        assert_eq!(store.delete_for_city(recipe.id, "paris").unwrap(), recipe);
        let err = store.delete_for_city(recipe.id, "paris").unwrap_err();
        assert_eq!(err.user_message(), "Recipe not found");
    }

    #[test]
    fn test_concurrent_deletes_remove_once() {
        let store = std::sync::Arc::new(RecipeStore::new());
        let recipe = store.add("paris", "Croque monsieur");
        let barrier = std::sync::Arc::new(std::sync::Barrier::new(8));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    store.delete_for_city(recipe.id, "paris").is_ok()
                })
            })
            .collect();

        let removed = workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .filter(|removed| *removed)
            .count();
        assert_eq!(removed, 1);
        assert!(store.is_empty());
    }
}
