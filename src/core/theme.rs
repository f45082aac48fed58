use crate::domain::model::Theme;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;

pub const THEME_KEY: &str = "cc_theme";

pub struct ThemeStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persisted theme; anything unreadable counts as light.
    pub fn current(&self) -> Theme {
        match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) if raw.trim() == "dark" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(e) => {
                tracing::warn!("Could not read theme preference: {}", e);
                Theme::Light
            }
        }
    }

    pub fn set(&self, theme: Theme) -> Result<()> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle(&self) -> Result<Theme> {
        let next = self.current().toggled();
        self.set(next)?;
        Ok(next)
    }
}
