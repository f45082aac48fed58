// Adapters layer: concrete implementations of the domain ports (catalog sources, client storage).

pub mod http;
pub mod static_file;
pub mod storage;

pub use http::{DeleteConfirmation, HttpCatalog};
pub use static_file::StaticFileCatalog;
pub use storage::{LocalStorage, MemoryStorage};
