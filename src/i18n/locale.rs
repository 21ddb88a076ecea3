use std::sync::Arc;

use crate::{
    foundation::error::SiteResult,
    i18n::preference::{LANGUAGE_KEY, PreferenceStore},
    i18n::table::{Language, TranslationTable},
};

/// Fade-out time before the language swaps; fade-in takes the same time after it.
pub const FADE_HALF_MS: f64 = 150.0;

/// Cross-fade shown while the page switches language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanguageTransition {
    pub from: Language,
    pub to: Language,
}

impl LanguageTransition {
    pub const DURATION_MS: f64 = 2.0 * FADE_HALF_MS;

    /// Content opacity `elapsed_ms` after the switch was requested.
    pub fn opacity_at(&self, elapsed_ms: f64) -> f64 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 || elapsed_ms >= Self::DURATION_MS {
            return 1.0;
        }
        if elapsed_ms < FADE_HALF_MS {
            1.0 - elapsed_ms / FADE_HALF_MS
        } else {
            (elapsed_ms - FADE_HALF_MS) / FADE_HALF_MS
        }
    }

    /// Language the content should show at `elapsed_ms`.
    pub fn language_at(&self, elapsed_ms: f64) -> Language {
        if elapsed_ms < FADE_HALF_MS {
            self.from
        } else {
            self.to
        }
    }

    pub fn is_transitioning(&self, elapsed_ms: f64) -> bool {
        (0.0..Self::DURATION_MS).contains(&elapsed_ms)
    }
}

/// Active language plus its strings.
#[derive(Clone, Debug)]
pub struct Locale {
    language: Language,
    table: Arc<TranslationTable>,
}

impl Locale {
    pub fn new(language: Language, table: Arc<TranslationTable>) -> Self {
        Self { language, table }
    }

    /// Restore the saved choice, falling back to French when absent or unrecognized.
    pub fn load(store: &dyn PreferenceStore, table: Arc<TranslationTable>) -> Self {
        let language = store
            .get(LANGUAGE_KEY)
            .and_then(|code| Language::from_code(code.trim()))
            .unwrap_or_default();
        Self { language, table }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn translate(&self, key: &str) -> String {
        self.table.translate(self.language, key)
    }

    /// Switch and persist. Returns the fade to play, or `None` when `lang` is already active.
    pub fn set_language(
        &mut self,
        lang: Language,
        store: &dyn PreferenceStore,
    ) -> SiteResult<Option<LanguageTransition>> {
        if lang == self.language {
            return Ok(None);
        }
        store.set(LANGUAGE_KEY, lang.code())?;
        let transition = LanguageTransition {
            from: self.language,
            to: lang,
        };
        tracing::debug!(from = %transition.from, to = %transition.to, "language changed");
        self.language = lang;
        Ok(Some(transition))
    }

    pub fn toggle(&mut self, store: &dyn PreferenceStore) -> SiteResult<Option<LanguageTransition>> {
        self.set_language(self.language.toggled(), store)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/i18n/locale.rs"]
mod tests;
