use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use std::collections::BTreeSet;
use std::fmt::Display;

pub const FAVORITES_KEY: &str = "cc_favs";

/// Favorited service ids, persisted as a JSON array of strings.
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    ids: BTreeSet<String>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load the persisted set. Missing or corrupt data yields an empty set.
    pub fn open(storage: S) -> Self {
        let ids = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => parse_favorites(&raw),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!("Could not read favorites, starting empty: {}", e);
                BTreeSet::new()
            }
        };
        tracing::debug!("Loaded {} favorites", ids.len());
        Self { storage, ids }
    }

    pub fn is_favorite(&self, id: impl Display) -> bool {
        self.ids.contains(&normalize_id(id))
    }

    /// Flip membership and persist the whole set before returning the new
    /// state. On a failed write the in-memory set keeps the new state.
    pub fn toggle_favorite(&mut self, id: impl Display) -> Result<bool> {
        let key = normalize_id(id);
        let now_favorite = if self.ids.remove(&key) {
            false
        } else {
            self.ids.insert(key.clone());
            true
        };

        let payload = serde_json::to_string(&self.ids)?;
        self.storage.set(FAVORITES_KEY, &payload)?;

        tracing::debug!("Favorite {} -> {}", key, now_favorite);
        Ok(now_favorite)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// `5`, `5.0` and `" 5 "` all become `"5"`.
pub fn normalize_id(id: impl Display) -> String {
    id.to_string().trim().to_string()
}

fn parse_favorites(raw: &str) -> BTreeSet<String> {
    match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(values) => values
            .iter()
            .filter_map(|value| match value {
                serde_json::Value::String(s) => Some(normalize_id(s)),
                serde_json::Value::Number(n) => Some(match n.as_f64() {
                    Some(f) if n.as_i64().is_none() && n.as_u64().is_none() => normalize_id(f),
                    _ => normalize_id(n),
                }),
                _ => None,
            })
            .filter(|id| !id.is_empty())
            .collect(),
        Err(e) => {
            tracing::warn!("Stored favorites are corrupt, starting empty: {}", e);
            BTreeSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;

    #[test]
    fn test_toggle_round_trip() {
        let mut favorites = FavoritesStore::open(MemoryStorage::new());
        assert!(!favorites.is_favorite(5));

        assert!(favorites.toggle_favorite(5).unwrap());
        assert!(favorites.is_favorite(5));

        assert!(!favorites.toggle_favorite(5).unwrap());
        assert!(!favorites.is_favorite(5));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_numeric_and_string_ids_collide() {
        let mut favorites = FavoritesStore::open(MemoryStorage::new());
        assert!(favorites.toggle_favorite("5").unwrap());
        assert!(favorites.is_favorite(5));
        assert!(favorites.is_favorite(5.0));
        assert!(!favorites.toggle_favorite(5).unwrap());
        assert!(!favorites.is_favorite("5"));
    }

    #[test]
    fn test_toggle_persists_immediately() {
        let storage = MemoryStorage::new();
        let mut favorites = FavoritesStore::open(storage.clone());
        favorites.toggle_favorite(2).unwrap();
        favorites.toggle_favorite(10).unwrap();

        assert_eq!(
            storage.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["10","2"]"#)
        );

        let reopened = FavoritesStore::open(storage);
        assert!(reopened.is_favorite("2"));
        assert!(reopened.is_favorite(10));
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn test_corrupt_storage_is_empty() {
        let storage = MemoryStorage::new();
        storage.set(FAVORITES_KEY, "{not json").unwrap();
        let favorites = FavoritesStore::open(storage);
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_legacy_numeric_entries_are_normalized() {
        let storage = MemoryStorage::new();
        storage.set(FAVORITES_KEY, r#"[1, "2", 3.0, null]"#).unwrap();
        let favorites = FavoritesStore::open(storage);
        assert_eq!(favorites.ids().collect::<Vec<_>>(), vec!["1", "2", "3"]);
    }
}
