use anyhow::Result;
use std::path::Path;

use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use ratatui::widgets::ListState;

use crate::config::AppConfig;
use crate::internal::models::Article;
use crate::internal::notification::Notification;
use crate::internal::search::FilterCache;
use crate::internal::share::{self, ShareTarget};
use crate::internal::theme_pref::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ThemeMode, ThemePreference,
};
use crate::utils::theme_loader::{self, TuiTheme};

/// Input modes for the UI.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Search,
}

/// Actions/messages sent through the app action channel.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    OpenSelected,
    Dismiss,
    ScrollDetailUp,
    ScrollDetailDown,
    ToggleTheme,
    ClearSearch,
    OpenShareMenu,
    ShareMenuPrev,
    ShareMenuNext,
    ShareSelected,
    CloseShareMenu,
}

/// Main application state: the single owner of the session.
///
/// All transitions run to completion on the event loop; the filtered view of
/// the store is memoized in `filter` and keyed on the search term.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub articles: Vec<Article>,
    pub list_state: ListState,
    /// Index into `articles` of the article shown in the detail overlay.
    pub opened: Option<usize>,
    pub detail_scroll: usize,
    pub input_mode: InputMode,
    pub search_input: String,
    pub filter: FilterCache,
    pub theme_preference: ThemePreference,
    pub theme: TuiTheme,
    /// Selected entry of the share menu while it is open.
    pub share_menu: Option<usize>,
    pub notification: Option<Notification>,
    pub config: AppConfig,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new() -> Self {
        let config = AppConfig::load();

        let preference_store: Box<dyn PreferenceStore> = match FilePreferenceStore::in_config_dir()
        {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::error!("Falling back to in-memory theme preference: {}", e);
                Box::new(MemoryPreferenceStore::default())
            }
        };

        Self::with_articles(config, preference_store, crate::store::articles().to_vec())
    }

    /// Build an app over an explicit article set and preference store.
    /// `new` delegates here; tests inject fixed articles and an in-memory
    /// store.
    pub fn with_articles(
        config: AppConfig,
        preference_store: Box<dyn PreferenceStore>,
        articles: Vec<Article>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let theme_preference = ThemePreference::initialize(preference_store);
        let theme = Self::palette_for(&config, theme_preference.mode());

        let mut list_state = ListState::default();
        if !articles.is_empty() {
            list_state.select(Some(0));
        }

        tracing::info!(
            articles = articles.len(),
            mode = %theme_preference.mode(),
            "App initialized"
        );

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            articles,
            list_state,
            opened: None,
            detail_scroll: 0,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            filter: FilterCache::new(),
            theme_preference,
            theme,
            share_menu: None,
            notification: None,
            config,
            action_tx,
            action_rx,
        }
    }

    fn palette_for(config: &AppConfig, mode: ThemeMode) -> TuiTheme {
        let configured = config.theme_file.trim();
        if !configured.is_empty() {
            match theme_loader::load_theme(Path::new(configured), mode) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::error!("Failed to load theme file '{}': {}", configured, e);
                }
            }
        }
        theme_loader::embedded_theme(mode)
    }

    /// Set an info notification
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::info(message));
    }

    /// Set an error notification
    #[allow(dead_code)]
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::error(message));
    }

    /// Indices into `articles` of the records visible under the current
    /// search term, in store order.
    pub fn visible_indices(&mut self) -> Vec<usize> {
        self.filter
            .indices(&self.articles, &self.search_input)
            .to_vec()
    }

    /// True only when a search is active and it matched nothing. Distinct
    /// from the empty-store or no-search states.
    pub fn is_no_results(&mut self) -> bool {
        !self.search_input.is_empty() && self.visible_indices().is_empty()
    }

    /// The article mounted in the detail overlay, if any.
    pub fn opened_article(&self) -> Option<&Article> {
        self.opened.and_then(|index| self.articles.get(index))
    }

    /// Map the list cursor (an index into the displayed, filtered rows) back
    /// to the underlying store index.
    fn selected_article_index(&mut self) -> Option<usize> {
        let visible = self.visible_indices();
        let cursor = self.list_state.selected()?;
        visible.get(cursor).copied()
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        let mut event_interval = tokio::time::interval(std::time::Duration::from_millis(16));

        loop {
            // Auto-dismiss expired notifications
            if let Some(notification) = &self.notification
                && notification.should_dismiss()
            {
                self.notification = None;
            }

            tui.draw(|f| super::view::draw(self, f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    // Check for terminal events
                    if event::poll(std::time::Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                            && key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                            }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_input(key),
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') => {
                // Ignore / in search mode (it's the key that enters search mode)
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.reset_selection();
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.reset_selection();
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                // Cancel search - clear and exit
                self.search_input.clear();
                self.reset_selection();
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) {
        // The share menu traps input while open.
        if self.share_menu.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    let _ = self.action_tx.send(Action::CloseShareMenu);
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    let _ = self.action_tx.send(Action::ShareMenuNext);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    let _ = self.action_tx.send(Action::ShareMenuPrev);
                }
                KeyCode::Enter => {
                    let _ = self.action_tx.send(Action::ShareSelected);
                }
                _ => {}
            }
            return;
        }

        // Detail overlay keys
        if self.opened.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    let _ = self.action_tx.send(Action::Dismiss);
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    let _ = self.action_tx.send(Action::ScrollDetailDown);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    let _ = self.action_tx.send(Action::ScrollDetailUp);
                }
                KeyCode::Char('s') => {
                    let _ = self.action_tx.send(Action::OpenShareMenu);
                }
                KeyCode::Char('t') => {
                    let _ = self.action_tx.send(Action::ToggleTheme);
                }
                _ => {}
            }
            return;
        }

        // List view keys
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Quit);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let _ = self.action_tx.send(Action::NavigateDown);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let _ = self.action_tx.send(Action::NavigateUp);
            }
            KeyCode::Enter => {
                let _ = self.action_tx.send(Action::OpenSelected);
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char('C') => {
                if !self.search_input.is_empty() {
                    let _ = self.action_tx.send(Action::ClearSearch);
                }
            }
            KeyCode::Char('t') => {
                let _ = self.action_tx.send(Action::ToggleTheme);
            }
            _ => {}
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NavigateUp => self.select_prev(),
            Action::NavigateDown => self.select_next(),
            Action::OpenSelected => {
                if let Some(index) = self.selected_article_index() {
                    self.opened = Some(index);
                    self.detail_scroll = 0;
                }
            }
            Action::Dismiss => {
                // Back to the list; the search term is untouched.
                self.opened = None;
                self.detail_scroll = 0;
                self.share_menu = None;
            }
            Action::ScrollDetailUp => {
                if self.detail_scroll > 0 {
                    self.detail_scroll -= 1;
                }
            }
            Action::ScrollDetailDown => {
                self.detail_scroll += 1;
            }
            Action::ToggleTheme => {
                // Persist and apply in one step so the displayed and stored
                // values cannot diverge.
                let mode = self.theme_preference.toggle();
                self.theme = Self::palette_for(&self.config, mode);
                self.notify_info(format!("Theme: {}", mode));
            }
            Action::ClearSearch => {
                self.search_input.clear();
                self.reset_selection();
            }
            Action::OpenShareMenu => {
                if self.opened.is_some() {
                    self.share_menu = Some(0);
                }
            }
            Action::ShareMenuPrev => {
                if let Some(selected) = self.share_menu {
                    let len = ShareTarget::ALL.len();
                    self.share_menu = Some((selected + len - 1) % len);
                }
            }
            Action::ShareMenuNext => {
                if let Some(selected) = self.share_menu {
                    self.share_menu = Some((selected + 1) % ShareTarget::ALL.len());
                }
            }
            Action::ShareSelected => {
                if let (Some(index), Some(menu_index)) = (self.opened, self.share_menu)
                    && let Some(article) = self.articles.get(index)
                {
                    let target = ShareTarget::ALL[menu_index];
                    let url = share::article_url(&self.config.site.base_url, &article.title);
                    share::share(target, &article.title, &url);

                    let message = match target {
                        ShareTarget::CopyLink => "Link copied".to_string(),
                        other => format!("Opening {}...", other),
                    };
                    self.share_menu = None;
                    self.notify_info(message);
                } else {
                    self.share_menu = None;
                }
            }
            Action::CloseShareMenu => {
                self.share_menu = None;
            }
        }
    }

    fn reset_selection(&mut self) {
        let any_visible = !self.visible_indices().is_empty();
        self.list_state.select(any_visible.then_some(0));
    }

    fn select_next(&mut self) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= visible.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
