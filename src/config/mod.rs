#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{AppConfig, CatalogSourceKind};

use crate::adapters::{HttpCatalog, LocalStorage, StaticFileCatalog};
use crate::domain::ports::CatalogStore;
use crate::utils::error::Result;

/// Pick the catalog adapter named by `catalog.source`.
pub fn build_catalog(config: &AppConfig) -> Result<Box<dyn CatalogStore>> {
    let catalog: Box<dyn CatalogStore> = match config.catalog.source {
        CatalogSourceKind::Static => Box::new(StaticFileCatalog::new(&config.catalog.path)),
        CatalogSourceKind::Http => {
            Box::new(HttpCatalog::new(&config.catalog.endpoint, config.timeout())?)
        }
    };
    tracing::debug!("Catalog source: {}", catalog.describe());
    Ok(catalog)
}

pub fn open_storage(config: &AppConfig) -> LocalStorage {
    LocalStorage::new(&config.storage.data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_catalog_follows_source() {
        let mut config = AppConfig::default();
        assert!(build_catalog(&config).unwrap().describe().starts_with("file "));

        config.catalog.source = CatalogSourceKind::Http;
        assert_eq!(
            build_catalog(&config).unwrap().describe(),
            "endpoint http://127.0.0.1:3000/services"
        );
    }
}
