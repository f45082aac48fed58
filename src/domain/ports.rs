use crate::domain::model::{FilterSpec, ServiceId, ServiceRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of catalog snapshots.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch the current snapshot. `spec` is a hint: remote stores may filter
    /// server-side, local ones return everything and leave it to the query engine.
    async fn fetch(&self, spec: &FilterSpec) -> Result<Vec<ServiceRecord>>;

    async fn get(&self, id: &ServiceId) -> Result<Option<ServiceRecord>> {
        let records = self.fetch(&FilterSpec::default()).await?;
        Ok(records.into_iter().find(|record| &record.id == id))
    }

    fn describe(&self) -> String;
}

#[async_trait]
impl<T: CatalogStore + ?Sized> CatalogStore for Box<T> {
    async fn fetch(&self, spec: &FilterSpec) -> Result<Vec<ServiceRecord>> {
        (**self).fetch(spec).await
    }

    async fn get(&self, id: &ServiceId) -> Result<Option<ServiceRecord>> {
        (**self).get(id).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Synchronous string key/value persistence for client-side state
/// (favorites, theme).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
