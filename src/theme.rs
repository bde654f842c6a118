use crate::logger;
use crate::store::KeyValueStore;
use anyhow::Result;

pub const THEME_KEY: &str = "deepo_theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Persisted form: "" for the default, "light" for the alternate.
    pub fn as_stored(self) -> &'static str {
        match self {
            Theme::Dark => "",
            Theme::Light => "light",
        }
    }

    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Theme::Light => egui_phosphor::regular::SUN,
            Theme::Dark => egui_phosphor::regular::MOON,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }
}

pub struct ThemeStore<S: KeyValueStore> {
    store: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn load(store: S) -> Self {
        let current = Theme::from_stored(store.get(THEME_KEY).as_deref());
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme and persists it. The in-memory theme flips even if the write fails.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.current = self.current.toggled();
        logger::log(&format!("Theme -> {:?}", self.current));
        self.store.set(THEME_KEY, self.current.as_stored())?;
        Ok(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::MemoryStore;

    #[test]
    fn test_absent_value_means_default() {
        let themes = ThemeStore::load(MemoryStore::default());
        assert_eq!(themes.current(), Theme::Dark);
    }

    #[test]
    fn test_stored_light_is_restored() {
        let mut mem = MemoryStore::default();
        mem.set(THEME_KEY, "light").unwrap();
        assert_eq!(ThemeStore::load(mem).current(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists_both_ways() {
        let mut themes = ThemeStore::load(MemoryStore::default());
        assert_eq!(themes.toggle().unwrap(), Theme::Light);
        assert_eq!(themes.store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(themes.current().glyph(), egui_phosphor::regular::SUN);

        assert_eq!(themes.toggle().unwrap(), Theme::Dark);
        assert_eq!(themes.store.get(THEME_KEY).as_deref(), Some(""));
        assert_eq!(themes.current().glyph(), egui_phosphor::regular::MOON);
    }

    #[test]
    fn test_unknown_value_is_default() {
        assert_eq!(Theme::from_stored(Some("sepia")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("")), Theme::Dark);
    }
}
