use crate::core::favorites::FavoritesStore;
use crate::core::query::query;
use crate::core::render::{render_card, CardView};
use crate::domain::model::{FilterSpec, ServiceId};
use crate::domain::ports::{CatalogStore, KeyValueStore};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// What the display region should show after a refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Cards(Vec<CardView>),
    NoMatches,
    LoadFailed { message: String },
}

/// Presentation layer that mounts a [`ViewState`], replacing whatever was
/// shown before.
pub trait Presenter {
    fn mount(&mut self, state: &ViewState);
}

/// Drives fetch -> query -> render for each filter/search/sort change.
pub struct ViewController<C: CatalogStore, S: KeyValueStore> {
    catalog: C,
    favorites: FavoritesStore<S>,
    latest: AtomicU64,
}

impl<C: CatalogStore, S: KeyValueStore> ViewController<C, S> {
    pub fn new(catalog: C, favorites: FavoritesStore<S>) -> Self {
        Self {
            catalog,
            favorites,
            latest: AtomicU64::new(0),
        }
    }

    /// Run one refresh cycle. Returns `None` when a later refresh started
    /// while this one was waiting on the catalog.
    pub async fn refresh(&self, spec: &FilterSpec) -> Option<ViewState> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!("Refresh #{} from {}", ticket, self.catalog.describe());
        let fetched = self.catalog.fetch(spec).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Refresh #{} superseded, dropping result", ticket);
            return None;
        }

        let state = match fetched {
            Ok(records) => {
                let results = query(&records, spec);
                if results.is_empty() {
                    ViewState::NoMatches
                } else {
                    let term = spec.search_term();
                    ViewState::Cards(
                        results
                            .iter()
                            .map(|r| render_card(r, term, self.favorites.is_favorite(&r.id)))
                            .collect(),
                    )
                }
            }
            Err(e) => {
                tracing::error!("Error fetching services: {}", e);
                ViewState::LoadFailed {
                    message: e.user_friendly_message(),
                }
            }
        };
        Some(state)
    }

    /// Refresh and mount the result unless it was superseded.
    pub async fn render<P: Presenter>(&self, spec: &FilterSpec, presenter: &mut P) -> bool {
        match self.refresh(spec).await {
            Some(state) => {
                presenter.mount(&state);
                true
            }
            None => false,
        }
    }

    /// Single card for the detail view.
    pub async fn show(&self, id: &ServiceId) -> Result<Option<CardView>> {
        let record = self.catalog.get(id).await?;
        Ok(record.map(|r| render_card(&r, None, self.favorites.is_favorite(&r.id))))
    }

    pub fn toggle_favorite(&mut self, id: &ServiceId) -> Result<bool> {
        self.favorites.toggle_favorite(id)
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::domain::model::{ServiceRecord, SortMode};
    use crate::utils::error::CatalogError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct FixedCatalog {
        records: Vec<ServiceRecord>,
    }

    #[async_trait]
    impl CatalogStore for FixedCatalog {
        async fn fetch(&self, _spec: &FilterSpec) -> Result<Vec<ServiceRecord>> {
            Ok(self.records.clone())
        }

        fn describe(&self) -> String {
            "fixed catalog".to_string()
        }
    }

    struct BrokenCatalog;

    #[async_trait]
    impl CatalogStore for BrokenCatalog {
        async fn fetch(&self, _spec: &FilterSpec) -> Result<Vec<ServiceRecord>> {
            Err(CatalogError::ApiError {
                status: 500,
                message: "boom".to_string(),
            })
        }

        fn describe(&self) -> String {
            "broken catalog".to_string()
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        mounted: Vec<ViewState>,
    }

    impl Presenter for RecordingPresenter {
        fn mount(&mut self, state: &ViewState) {
            self.mounted.push(state.clone());
        }
    }

    fn sample_records() -> Vec<ServiceRecord> {
        serde_json::from_value(json!([
            {"id": 1, "title": "Room Cleaning", "description": "Daily hostel room cleaning service",
             "category": "Household", "university": "UG", "price": 30},
            {"id": 2, "title": "Tutoring", "description": "Maths tutoring for SHS students",
             "category": "Education", "university": "KNUST", "price": 50}
        ]))
        .unwrap()
    }

    fn controller() -> ViewController<FixedCatalog, MemoryStorage> {
        ViewController::new(
            FixedCatalog {
                records: sample_records(),
            },
            FavoritesStore::open(MemoryStorage::new()),
        )
    }

    fn card_titles(state: &ViewState) -> Vec<String> {
        match state {
            ViewState::Cards(cards) => cards.iter().map(|c| c.title.clone()).collect(),
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_sorts_and_renders() {
        let state = controller()
            .refresh(&FilterSpec::new().with_sort(SortMode::PriceHighLow))
            .await
            .unwrap();
        assert_eq!(card_titles(&state), vec!["Tutoring", "Room Cleaning"]);
    }

    #[tokio::test]
    async fn test_refresh_filters_by_category() {
        let state = controller()
            .refresh(&FilterSpec::new().with_category("Education"))
            .await
            .unwrap();
        assert_eq!(card_titles(&state), vec!["Tutoring"]);
    }

    #[tokio::test]
    async fn test_search_term_is_highlighted() {
        let state = controller()
            .refresh(&FilterSpec::new().with_search("tutor"))
            .await
            .unwrap();
        match state {
            ViewState::Cards(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].title_html, "<mark>Tutor</mark>ing");
            }
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_results_render_placeholder() {
        let mut presenter = RecordingPresenter::default();
        let ctrl = controller();
        assert!(
            ctrl.render(&FilterSpec::new().with_category("Catering"), &mut presenter)
                .await
        );

        let empty = ViewController::new(
            FixedCatalog { records: vec![] },
            FavoritesStore::open(MemoryStorage::new()),
        );
        assert!(empty.render(&FilterSpec::new(), &mut presenter).await);

        assert_eq!(presenter.mounted, vec![ViewState::NoMatches, ViewState::NoMatches]);
    }

    #[tokio::test]
    async fn test_fetch_failure_renders_error_placeholder() {
        let ctrl = ViewController::new(BrokenCatalog, FavoritesStore::open(MemoryStorage::new()));
        let state = ctrl.refresh(&FilterSpec::new()).await.unwrap();
        assert_eq!(
            state,
            ViewState::LoadFailed {
                message: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_favorites_flow_into_cards() {
        let mut ctrl = controller();
        assert!(ctrl.toggle_favorite(&ServiceId::from(2)).unwrap());

        let state = ctrl.refresh(&FilterSpec::new()).await.unwrap();
        match state {
            ViewState::Cards(cards) => {
                assert!(!cards[0].is_favorite);
                assert!(cards[1].is_favorite);
            }
            other => panic!("expected cards, got {:?}", other),
        }

        let card = ctrl.show(&ServiceId::new("2")).await.unwrap().unwrap();
        assert!(card.is_favorite);
        assert!(ctrl.show(&ServiceId::from(99)).await.unwrap().is_none());
    }

    struct GatedCatalog {
        gate: Arc<Notify>,
        records: Vec<ServiceRecord>,
    }

    #[async_trait]
    impl CatalogStore for GatedCatalog {
        async fn fetch(&self, spec: &FilterSpec) -> Result<Vec<ServiceRecord>> {
            // 第一個請求等待放行，模擬慢速回應
            if spec.search_term() == Some("slow") {
                self.gate.notified().await;
            }
            Ok(self.records.clone())
        }

        fn describe(&self) -> String {
            "gated catalog".to_string()
        }
    }

    #[tokio::test]
    async fn test_superseded_refresh_is_dropped() {
        let gate = Arc::new(Notify::new());
        let ctrl = ViewController::new(
            GatedCatalog {
                gate: Arc::clone(&gate),
                records: sample_records(),
            },
            FavoritesStore::open(MemoryStorage::new()),
        );

        let slow_spec = FilterSpec::new().with_search("slow");
        let fast_spec = FilterSpec::new();
        let slow = ctrl.refresh(&slow_spec);
        let fast = async {
            let state = ctrl.refresh(&fast_spec).await;
            gate.notify_one();
            state
        };

        let (slow_state, fast_state) = tokio::join!(slow, fast);
        assert!(slow_state.is_none());
        assert_eq!(card_titles(&fast_state.unwrap()).len(), 2);
    }
}
