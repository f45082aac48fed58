pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod present;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{build_catalog, open_storage, AppConfig};

pub use adapters::{HttpCatalog, LocalStorage, MemoryStorage, StaticFileCatalog};
pub use core::favorites::FavoritesStore;
pub use core::highlight::{escape_html, highlight};
pub use core::query::query;
pub use core::render::{render_card, CardView};
pub use core::theme::ThemeStore;
pub use core::view::{Presenter, ViewController, ViewState};
pub use present::{HtmlPresenter, TextPresenter};
pub use domain::model::{FilterSpec, NewService, Price, ServiceId, ServiceRecord, SortMode, Theme};
pub use domain::ports::{CatalogStore, KeyValueStore};
pub use utils::error::{CatalogError, Result};
