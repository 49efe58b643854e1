use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_article_app::config::AppConfig;
use tui_article_app::internal::models::Article;
use tui_article_app::internal::search;
use tui_article_app::internal::theme_pref::{MemoryPreferenceStore, PreferenceStore, ThemeMode};
use tui_article_app::internal::ui::app::{Action, App};

fn article(id: u32, title: &str, content: &str, tags: &[&str]) -> Article {
    Article {
        id,
        title: title.to_string(),
        author: "Test Author".to_string(),
        date: "Jan 1, 2024".to_string(),
        excerpt: None,
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn sample_articles() -> Vec<Article> {
    vec![
        article(
            1,
            "CSS Grid Basics",
            "Tracks and lines.\n\nNamed areas make layouts readable.",
            &["css", "layout"],
        ),
        article(
            2,
            "JS Closures",
            "Functions capture their lexical scope.\n\nPrivate state falls out for free.",
            &["javascript"],
        ),
    ]
}

fn app_with_sample() -> App {
    App::with_articles(
        AppConfig::default(),
        Box::new(MemoryPreferenceStore::with_mode(ThemeMode::Light)),
        sample_articles(),
    )
}

#[test]
fn searching_css_returns_exactly_the_grid_article_case_insensitively() {
    let articles = sample_articles();
    let result = search::filter(&articles, "css");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].title, "CSS Grid Basics");

    // Same result regardless of the term's casing.
    let upper = search::filter(&articles, "CSS");
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].id, result[0].id);
}

#[test]
fn searching_python_triggers_the_no_results_state() {
    let mut app = app_with_sample();

    // Before any search: the empty-filter state is not "no results".
    assert!(!app.is_no_results());
    assert_eq!(app.visible_indices().len(), 2);

    app.search_input = "python".to_string();
    assert!(app.visible_indices().is_empty());
    assert!(app.is_no_results());
}

#[test]
fn opening_an_article_mounts_the_overlay_with_paragraph_structure() {
    let mut app = app_with_sample();

    app.handle_action(Action::OpenSelected);
    let opened = app.opened_article().expect("overlay should be mounted");
    assert_eq!(opened.id, 1);

    let paragraphs: Vec<&str> = opened.paragraphs().collect();
    assert_eq!(
        paragraphs,
        vec!["Tracks and lines.", "Named areas make layouts readable."]
    );
}

#[test]
fn dismissing_the_overlay_returns_to_the_list_with_the_term_unchanged() {
    let mut app = app_with_sample();

    // Type the search the way a user would.
    app.handle_key_event(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE));
    for c in "closures".chars() {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

    app.handle_action(Action::OpenSelected);
    assert_eq!(app.opened_article().map(|a| a.id), Some(2));

    app.handle_action(Action::Dismiss);
    assert!(app.opened_article().is_none());
    assert_eq!(app.search_input, "closures");
    assert_eq!(app.visible_indices(), vec![1]);
}

#[test]
fn toggling_theme_twice_restores_the_initial_persisted_state() {
    let store = std::rc::Rc::new(MemoryPreferenceStore::with_mode(ThemeMode::Dark));
    let mut app = App::with_articles(
        AppConfig::default(),
        Box::new(store.clone()),
        sample_articles(),
    );

    let initial = app.theme_preference.mode();
    app.handle_action(Action::ToggleTheme);
    app.handle_action(Action::ToggleTheme);

    assert_eq!(app.theme_preference.mode(), initial);
    assert_eq!(store.read(), Some(initial));
    assert_eq!(store.writes(), 2);
}
