use super::*;
use crate::i18n::preference::MemoryStore;

fn table() -> Arc<TranslationTable> {
    TranslationTable::builtin()
}

#[test]
fn load_defaults_to_french() {
    let store = MemoryStore::new();
    assert_eq!(Locale::load(&store, table()).language(), Language::Fr);

    store.set(LANGUAGE_KEY, "de").unwrap();
    assert_eq!(Locale::load(&store, table()).language(), Language::Fr);

    store.set(LANGUAGE_KEY, "en").unwrap();
    assert_eq!(Locale::load(&store, table()).language(), Language::En);
}

#[test]
fn set_same_language_is_a_no_op() {
    let store = MemoryStore::new();
    let mut locale = Locale::new(Language::Fr, table());
    assert_eq!(locale.set_language(Language::Fr, &store).unwrap(), None);
    assert_eq!(store.get(LANGUAGE_KEY), None);
}

#[test]
fn set_language_persists_and_reports_fade() {
    let store = MemoryStore::new();
    let mut locale = Locale::new(Language::Fr, table());
    let tr = locale.set_language(Language::En, &store).unwrap().unwrap();
    assert_eq!(tr.from, Language::Fr);
    assert_eq!(tr.to, Language::En);
    assert_eq!(locale.language(), Language::En);
    assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("en"));
    assert_eq!(locale.translate("nav.home"), "Home");
}

#[test]
fn toggle_twice_restores_language() {
    let store = MemoryStore::new();
    let mut locale = Locale::load(&store, table());
    let before = locale.translate("hero.cta");
    locale.toggle(&store).unwrap();
    assert_ne!(locale.translate("hero.cta"), before);
    locale.toggle(&store).unwrap();
    assert_eq!(locale.language(), Language::Fr);
    assert_eq!(locale.translate("hero.cta"), before);
    assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("fr"));
}

#[test]
fn transition_fades_out_swaps_then_fades_in() {
    let tr = LanguageTransition {
        from: Language::Fr,
        to: Language::En,
    };
    assert_eq!(tr.opacity_at(0.0), 1.0);
    assert!((tr.opacity_at(75.0) - 0.5).abs() < 1e-12);
    assert_eq!(tr.opacity_at(150.0), 0.0);
    assert!((tr.opacity_at(225.0) - 0.5).abs() < 1e-12);
    assert_eq!(tr.opacity_at(300.0), 1.0);

    assert_eq!(tr.language_at(149.0), Language::Fr);
    assert_eq!(tr.language_at(150.0), Language::En);

    assert!(tr.is_transitioning(0.0));
    assert!(tr.is_transitioning(299.0));
    assert!(!tr.is_transitioning(300.0));
}
