use crate::domain::model::{decode_catalog, FilterSpec, ServiceRecord};
use crate::domain::ports::CatalogStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Catalog read from a JSON array on disk. Filtering happens client-side.
#[derive(Debug, Clone)]
pub struct StaticFileCatalog {
    path: PathBuf,
}

impl StaticFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogStore for StaticFileCatalog {
    async fn fetch(&self, _spec: &FilterSpec) -> Result<Vec<ServiceRecord>> {
        tracing::debug!("Reading catalog file: {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        let json: serde_json::Value = serde_json::from_slice(&bytes)?;
        let records = decode_catalog(json)?;
        tracing::debug!("Loaded {} services from file", records.len());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
