pub mod facets;
pub mod favorites;
pub mod highlight;
pub mod query;
pub mod render;
pub mod theme;
pub mod view;

pub use crate::domain::model::{FilterSpec, NewService, ServiceId, ServiceRecord, SortMode};
pub use crate::domain::ports::{CatalogStore, KeyValueStore};
pub use crate::utils::error::Result;
