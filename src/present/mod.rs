//! Presentation layer: turns a [`ViewState`] into something a user sees.

pub mod html;
pub mod text;

pub use html::HtmlPresenter;
pub use text::TextPresenter;

pub use crate::core::view::{Presenter, ViewState};

pub const NO_MATCHES_MESSAGE: &str = "No services match your filters.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load services.";
