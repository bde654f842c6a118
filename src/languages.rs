//! Language directory and the two search-filtered language pickers.

use serde::{Deserialize, Serialize};

pub const AUTO: &str = "auto";
pub const DEFAULT_TARGET: &str = "fr";

const NAMES: &[(&str, &str)] = &[
    ("auto", "Détection auto"),
    ("fr", "Français"),
    ("en", "Anglais"),
    ("es", "Espagnol"),
    ("de", "Allemand"),
    ("it", "Italien"),
    ("ar", "Arabe"),
];

/// Display name for a language code; unknown codes are shown as-is.
pub fn lang_name(code: &str) -> &str {
    NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Body of `GET /api/languages`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDirectory {
    #[serde(default)]
    pub source: Vec<String>,
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(default)]
    pub defaults: LanguageDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self { source_lang: AUTO.to_string(), target_lang: DEFAULT_TARGET.to_string() }
    }
}

impl Selection {
    /// Adopts the service defaults, keeping current values for missing fields.
    pub fn apply_defaults(&mut self, defaults: &LanguageDefaults) {
        if let Some(s) = defaults.source.as_deref().filter(|s| !s.is_empty()) {
            self.source_lang = s.to_string();
        }
        if let Some(t) = defaults.target.as_deref().filter(|t| !t.is_empty()) {
            self.target_lang = t.to_string();
        }
    }

    pub fn get(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_lang,
            Side::Target => &self.target_lang,
        }
    }

    pub fn set(&mut self, side: Side, code: &str) {
        match side {
            Side::Source => self.source_lang = code.to_string(),
            Side::Target => self.target_lang = code.to_string(),
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
    }
}

/// One picker: candidates, live search query and open flag.
#[derive(Debug, Clone, Default)]
pub struct LanguageSelector {
    candidates: Vec<String>,
    pub query: String,
    open: bool,
}

impl LanguageSelector {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates, query: String::new(), open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Case-insensitive substring match on display name or code, original order kept.
    pub fn filtered(&self) -> Vec<&str> {
        filter_codes(&self.candidates, &self.query)
    }
}

pub fn filter_codes<'a>(candidates: &'a [String], query: &str) -> Vec<&'a str> {
    let q = query.trim().to_lowercase();
    candidates
        .iter()
        .map(String::as_str)
        .filter(|code| {
            q.is_empty()
                || lang_name(code).to_lowercase().contains(&q)
                || code.to_lowercase().contains(&q)
        })
        .collect()
}

/// Source and target pickers; at most one is open at a time.
#[derive(Debug, Clone, Default)]
pub struct LanguagePickers {
    pub source: LanguageSelector,
    pub target: LanguageSelector,
}

impl LanguagePickers {
    pub fn from_directory(dir: &LanguageDirectory) -> Self {
        Self {
            source: LanguageSelector::new(dir.source.clone()),
            target: LanguageSelector::new(dir.target.clone()),
        }
    }

    pub fn get(&self, side: Side) -> &LanguageSelector {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut LanguageSelector {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }

    pub fn open_side(&self) -> Option<Side> {
        if self.source.open {
            Some(Side::Source)
        } else if self.target.open {
            Some(Side::Target)
        } else {
            None
        }
    }

    /// Opens `side` with an empty query, or closes it if it was already open.
    pub fn toggle(&mut self, side: Side) {
        let was_open = self.get(side).open;
        self.close_all();
        if was_open {
            return;
        }
        let picker = self.get_mut(side);
        picker.open = true;
        picker.query.clear();
    }

    pub fn close_all(&mut self) {
        self.source.open = false;
        self.target.open = false;
    }

    /// Closes both pickers and hands back the chosen code for the controller.
    pub fn pick(&mut self, side: Side, code: &str) -> (Side, String) {
        self.close_all();
        crate::logger::log(&format!("Picker {:?}: picked {}", side, code));
        (side, code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lang_name_fallback() {
        assert_eq!(lang_name("fr"), "Français");
        assert_eq!(lang_name("auto"), "Détection auto");
        assert_eq!(lang_name("pt"), "pt");
    }

    #[test]
    fn test_filter_by_code() {
        let pool = codes(&["fr", "en", "de"]);
        assert_eq!(filter_codes(&pool, "fr"), vec!["fr"]);
    }

    #[test]
    fn test_filter_by_display_name_case_insensitive() {
        let pool = codes(&["fr", "en", "de", "es"]);
        assert_eq!(filter_codes(&pool, "ALLEM"), vec!["de"]);
        assert_eq!(filter_codes(&pool, "  esp "), vec!["es"]);
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let pool = codes(&["it", "ar", "fr"]);
        assert_eq!(filter_codes(&pool, ""), vec!["it", "ar", "fr"]);
        assert_eq!(filter_codes(&pool, "   "), vec!["it", "ar", "fr"]);
    }

    #[test]
    fn test_pickers_are_mutually_exclusive() {
        let mut pickers = LanguagePickers::default();
        pickers.toggle(Side::Source);
        assert_eq!(pickers.open_side(), Some(Side::Source));

        pickers.toggle(Side::Target);
        assert!(!pickers.source.is_open());
        assert_eq!(pickers.open_side(), Some(Side::Target));

        pickers.toggle(Side::Target);
        assert_eq!(pickers.open_side(), None);
    }

    #[test]
    fn test_opening_resets_query_and_pick_closes() {
        let mut pickers = LanguagePickers::from_directory(&LanguageDirectory {
            source: codes(&["auto", "en"]),
            target: codes(&["fr", "en"]),
            defaults: LanguageDefaults::default(),
        });
        pickers.target.query = "stale".to_string();
        pickers.toggle(Side::Target);
        assert!(pickers.target.query.is_empty());

        let (side, code) = pickers.pick(Side::Target, "en");
        assert_eq!((side, code.as_str()), (Side::Target, "en"));
        assert_eq!(pickers.open_side(), None);
    }

    #[test]
    fn test_directory_defaults() {
        let dir: LanguageDirectory = serde_json::from_str(
            r#"{"source":["auto","en"],"target":["fr","en"],"defaults":{"source":"auto","target":"fr"}}"#,
        )
        .unwrap();
        let mut sel = Selection::default();
        sel.apply_defaults(&dir.defaults);
        assert_eq!(sel, Selection { source_lang: "auto".into(), target_lang: "fr".into() });

        let partial: LanguageDirectory = serde_json::from_str(r#"{"source":[],"target":[],"defaults":{"target":"de"}}"#).unwrap();
        sel.apply_defaults(&partial.defaults);
        assert_eq!(sel.source_lang, "auto");
        assert_eq!(sel.target_lang, "de");
    }
}
