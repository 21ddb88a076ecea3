use super::*;

fn small() -> TranslationTable {
    TranslationTable::from_json(
        r#"{
            "fr": {"nav": {"home": "Accueil"}, "list": ["zéro", {"deep": "profond"}], "n": 3},
            "en": {"nav": {"home": "Home"}, "list": ["zero", {"deep": "deep"}], "n": 3}
        }"#,
    )
    .unwrap()
}

#[test]
fn language_codes_round_trip() {
    for lang in Language::ALL {
        assert_eq!(Language::from_code(lang.code()), Some(lang));
        assert_eq!(lang.toggled().toggled(), lang);
    }
    assert_eq!(Language::default(), Language::Fr);
    assert_eq!(Language::from_code("de"), None);
    assert!("de".parse::<Language>().is_err());
    assert_eq!("en".parse::<Language>().unwrap(), Language::En);
    assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
}

#[test]
fn dotted_keys_resolve_per_language() {
    let t = small();
    assert_eq!(t.translate(Language::Fr, "nav.home"), "Accueil");
    assert_eq!(t.translate(Language::En, "nav.home"), "Home");
}

#[test]
fn numeric_segments_index_arrays() {
    let t = small();
    assert_eq!(t.translate(Language::Fr, "list.0"), "zéro");
    assert_eq!(t.translate(Language::En, "list.1.deep"), "deep");
    assert_eq!(t.translate(Language::En, "list.9"), "list.9");
}

#[test]
fn missing_or_non_string_returns_key() {
    let t = small();
    assert_eq!(t.translate(Language::Fr, "nav.missing"), "nav.missing");
    assert_eq!(t.translate(Language::Fr, "nav"), "nav");
    assert_eq!(t.translate(Language::Fr, "n"), "n");
    assert_eq!(t.translate(Language::Fr, "nav.home.extra"), "nav.home.extra");
    assert_eq!(t.translate(Language::Fr, ""), "");
}

#[test]
fn translate_is_idempotent() {
    let t = small();
    let once = t.translate(Language::En, "nav.home");
    assert_eq!(t.translate(Language::En, "nav.home"), once);
}

#[test]
fn from_json_requires_both_languages() {
    assert!(TranslationTable::from_json(r#"{"fr": {}}"#).is_err());
    assert!(TranslationTable::from_json(r#"{"fr": {}, "en": "x"}"#).is_err());
    let err = TranslationTable::from_json("not json").unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));
}

#[test]
fn builtin_table_covers_site_sections() {
    let t = TranslationTable::builtin();
    assert_eq!(t.translate(Language::Fr, "nav.home"), "Accueil");
    assert_eq!(t.translate(Language::En, "nav.home"), "Home");
    assert_eq!(
        t.translate(Language::En, "hero.rotatingWords.1"),
        "Modern applications tailored to real needs"
    );
    assert_eq!(
        t.translate(Language::Fr, "services.services.0.title"),
        "Présences Digitales"
    );
    assert_eq!(
        t.translate(Language::Fr, "contactForm.validation.emailInvalid"),
        "Format d'email invalide"
    );
    assert!(t.get(Language::En, "contactForm.subjects").is_some_and(|v| v.is_array()));
}
