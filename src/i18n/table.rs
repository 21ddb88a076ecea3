use std::sync::{Arc, LazyLock};

use serde_json::Value;

use crate::foundation::error::{SiteError, SiteResult};

const BUILTIN_JSON: &str = include_str!("../../assets/translations.json");

static BUILTIN: LazyLock<Arc<TranslationTable>> = LazyLock::new(|| {
    match TranslationTable::from_json(BUILTIN_JSON) {
        Ok(t) => Arc::new(t),
        Err(err) => {
            tracing::error!(error = %err, "embedded translations failed to parse");
            Arc::new(TranslationTable::empty())
        }
    }
});

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "fr" => Some(Self::Fr),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Fr => Self::En,
            Self::En => Self::Fr,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
            .ok_or_else(|| SiteError::validation(format!("unknown language '{s}' (expected fr|en)")))
    }
}

/// Nested string table for every supported language.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationTable {
    fr: Value,
    en: Value,
}

impl TranslationTable {
    /// Shared copy of the table bundled with the crate.
    pub fn builtin() -> Arc<TranslationTable> {
        Arc::clone(&BUILTIN)
    }

    pub fn empty() -> Self {
        Self {
            fr: Value::Object(Default::default()),
            en: Value::Object(Default::default()),
        }
    }

    /// Parse `{"fr": {...}, "en": {...}}`.
    pub fn from_json(s: &str) -> SiteResult<Self> {
        let mut root: Value = serde_json::from_str(s)?;
        let mut take = |lang: Language| -> SiteResult<Value> {
            match root.get_mut(lang.code()).map(Value::take) {
                Some(v @ Value::Object(_)) => Ok(v),
                Some(_) => Err(SiteError::validation(format!(
                    "translations for '{lang}' must be an object"
                ))),
                None => Err(SiteError::validation(format!(
                    "translations for '{lang}' are missing"
                ))),
            }
        };
        let fr = take(Language::Fr)?;
        let en = take(Language::En)?;
        Ok(Self { fr, en })
    }

    fn root(&self, lang: Language) -> &Value {
        match lang {
            Language::Fr => &self.fr,
            Language::En => &self.en,
        }
    }

    /// Raw node at a dotted path. Numeric segments index arrays.
    pub fn get(&self, lang: Language, key: &str) -> Option<&Value> {
        key.split('.').try_fold(self.root(lang), |node, seg| match node {
            Value::Object(map) => map.get(seg),
            Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    pub fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        self.get(lang, key).and_then(Value::as_str)
    }

    /// Resolved string, or `key` itself when the path is missing or not a string.
    pub fn translate(&self, lang: Language, key: &str) -> String {
        match self.lookup(lang, key) {
            Some(s) => s.to_owned(),
            None => {
                tracing::trace!(lang = lang.code(), key, "translation missing");
                key.to_owned()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/i18n/table.rs"]
mod tests;
