//! Application state management for citycast
//!
//! This module contains the dashboard's UI state, handling keyboard input and
//! turning it into [`Action`]s that the event loop executes against the
//! [`Session`].

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::cli::StartupConfig;
use crate::data::Location;
use crate::session::Session;

/// Application state enum representing what keyboard input currently drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Browsing the dashboard
    Dashboard,
    /// Typing into the search box
    Searching,
    /// Typing a new favorite
    AddingFavorite,
}

/// Work requested by a key press that needs the network
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Resolve a city name and load its forecast
    Search(String),
    /// Load the forecast for a location picked from the suggestions
    Load(Location),
    /// Fetch suggestions for the search box
    Suggest(String),
    /// Reload the active location
    Reload,
}

/// Severity of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown at the bottom of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Main application struct managing UI state around a session
pub struct App {
    /// Current input mode
    pub state: AppState,
    /// Session data and handlers
    pub session: Session,
    /// Text being typed in the search or favorite prompt
    pub input: String,
    /// Suggestions for the search box
    pub suggestions: Vec<Location>,
    /// Highlighted suggestion, if any
    pub suggestion_index: Option<usize>,
    /// Highlighted favorite
    pub favorite_index: usize,
    /// Last status message
    pub status: Option<Status>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Action waiting for the event loop to run it
    pub pending: Option<Action>,
}

impl App {
    /// Creates a new App from the startup configuration
    pub fn new(config: StartupConfig) -> Self {
        let mut app = Self::with_session(Session::new(config.session));
        if let Some(city) = config.initial_city {
            app.pending = Some(Action::Search(city));
        }
        app
    }

    /// Creates a new App around an existing session
    pub fn with_session(session: Session) -> Self {
        Self {
            state: AppState::Dashboard,
            session,
            input: String::new(),
            suggestions: Vec::new(),
            suggestion_index: None,
            favorite_index: 0,
            status: None,
            show_help: false,
            should_quit: false,
            pending: None,
        }
    }

    /// Whether a network action is waiting to run
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs the pending action, if any, and records the outcome in `status`
    pub async fn run_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };
        debug!(?action, "Running action");

        match action {
            Action::Search(city) => {
                let result = self.session.search(&city).await;
                self.finish_load(result);
            }
            Action::Load(location) => {
                let result = self.session.load_location(location).await;
                self.finish_load(result);
            }
            Action::Reload => {
                if let Some(location) = self.session.location().cloned() {
                    let result = self.session.load_location(location).await;
                    self.finish_load(result);
                }
            }
            Action::Suggest(text) => {
                self.suggestions = self.session.suggest(&text).await;
                if self.suggestions.is_empty() {
                    self.suggestion_index = None;
                    self.status = Some(Status::info("No suggestions"));
                } else {
                    self.suggestion_index = Some(0);
                    self.status = None;
                }
            }
        }
    }

    fn finish_load(&mut self, result: Result<(), crate::session::SearchError>) {
        self.status = match result {
            Ok(()) => self
                .session
                .location()
                .map(|l| Status::info(format!("Showing {}", l.display_name))),
            Err(e) => Some(Status::error(e.to_string())),
        };
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `/` or `s`: Open the search box
    /// - `a`: Add a favorite
    /// - `Up`/`k`, `Down`/`j`: Move through favorites
    /// - `Enter`: Search the highlighted favorite
    /// - `Left`/`h`, `Right`/`l`: Change the day shown in the hourly chart
    /// - `c`: Clear the dashboard
    /// - `r`: Reload the current city
    /// - `u`: Toggle metric/imperial units
    /// - `t`: Toggle light/dark theme
    /// - `?`: Toggle help
    /// - `q` or `Esc`: Quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        // Ignore input while an action is in flight
        if self.is_busy() {
            return;
        }

        match self.state {
            AppState::Dashboard => self.handle_dashboard_key(key_event),
            AppState::Searching => self.handle_search_key(key_event),
            AppState::AddingFavorite => self.handle_favorite_key(key_event),
        }
    }

    fn handle_dashboard_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.open_prompt(AppState::Searching);
            }
            KeyCode::Char('a') => {
                self.open_prompt(AppState::AddingFavorite);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_favorite_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_favorite_down();
            }
            KeyCode::Enter => {
                if let Some(city) = self.session.favorites().get(self.favorite_index) {
                    self.pending = Some(Action::Search(city.clone()));
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.session.previous_day();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.session.next_day();
            }
            KeyCode::Char('c') => {
                self.session.clear();
                self.status = Some(Status::info("Cleared"));
            }
            KeyCode::Char('r') => {
                if self.session.location().is_some() {
                    self.pending = Some(Action::Reload);
                }
            }
            KeyCode::Char('u') => {
                self.session.toggle_units();
            }
            KeyCode::Char('t') => {
                self.session.toggle_theme();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.close_prompt();
            }
            KeyCode::Enter => {
                let picked = self
                    .suggestion_index
                    .and_then(|i| self.suggestions.get(i))
                    .cloned();
                self.pending = Some(match picked {
                    Some(location) => Action::Load(location),
                    None => Action::Search(self.input.trim().to_string()),
                });
                self.close_prompt();
            }
            KeyCode::Tab => {
                if !self.input.trim().is_empty() {
                    self.pending = Some(Action::Suggest(self.input.trim().to_string()));
                }
            }
            KeyCode::Down => {
                self.move_suggestion(1);
            }
            KeyCode::Up => {
                self.move_suggestion(-1);
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.reset_suggestions();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.reset_suggestions();
            }
            _ => {}
        }
    }

    fn handle_favorite_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.close_prompt();
            }
            KeyCode::Enter => {
                let name = self.input.trim().to_string();
                self.status = if self.session.add_favorite(&name) {
                    Some(Status::info(format!("Added {} to favorites", name)))
                } else if name.is_empty() {
                    None
                } else {
                    Some(Status::info(format!("{} is already a favorite", name)))
                };
                self.close_prompt();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn open_prompt(&mut self, state: AppState) {
        self.input.clear();
        self.reset_suggestions();
        self.state = state;
    }

    fn close_prompt(&mut self) {
        self.input.clear();
        self.reset_suggestions();
        self.state = AppState::Dashboard;
    }

    fn reset_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_index = None;
    }

    /// Moves the suggestion highlight by `delta`, wrapping at both ends
    fn move_suggestion(&mut self, delta: isize) {
        let count = self.suggestions.len();
        if count == 0 {
            return;
        }
        let current = self.suggestion_index.unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(count as isize);
        self.suggestion_index = Some(next as usize);
    }

    /// Moves the favorite highlight up, wrapping to bottom if at top
    fn move_favorite_up(&mut self) {
        let count = self.session.favorites().len();
        if count == 0 {
            return;
        }
        if self.favorite_index == 0 {
            self.favorite_index = count - 1;
        } else {
            self.favorite_index -= 1;
        }
    }

    /// Moves the favorite highlight down, wrapping to top if at bottom
    fn move_favorite_down(&mut self) {
        let count = self.session.favorites().len();
        if count == 0 {
            return;
        }
        self.favorite_index = (self.favorite_index + 1) % count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Units;
    use crate::session::Theme;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::with_session(Session::default())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
    }

    fn location(name: &str) -> Location {
        Location {
            latitude: 1.0,
            longitude: 2.0,
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_initial_state_is_dashboard() {
        let app = app();
        assert_eq!(app.state, AppState::Dashboard);
        assert!(!app.should_quit);
        assert!(app.pending.is_none());
        assert!(app.status.is_none());
    }

    #[test]
    fn test_new_with_initial_city_queues_search() {
        let config = StartupConfig {
            initial_city: Some("Lahore".to_string()),
            ..Default::default()
        };
        let app = App::new(config);
        assert_eq!(app.pending, Some(Action::Search("Lahore".to_string())));
        assert!(app.is_busy());
    }

    #[test]
    fn test_q_and_esc_quit_from_dashboard() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = self::app();
        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_slash_opens_search() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('/')));
        assert_eq!(app.state, AppState::Searching);
    }

    #[test]
    fn test_typing_in_search_does_not_trigger_shortcuts() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('s')));
        type_text(&mut app, "quetta");
        assert_eq!(app.input, "quetta");
        assert!(!app.should_quit);
        assert_eq!(app.state, AppState::Searching);
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, "Lahorx");
        app.handle_key(key_event(KeyCode::Backspace));
        type_text(&mut app, "e");
        assert_eq!(app.input, "Lahore");
    }

    #[test]
    fn test_enter_in_search_queues_search() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, " Lahore ");
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.pending, Some(Action::Search("Lahore".to_string())));
        assert_eq!(app.state, AppState::Dashboard);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_esc_in_search_cancels() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, "Lah");
        app.handle_key(key_event(KeyCode::Esc));

        assert_eq!(app.state, AppState::Dashboard);
        assert!(app.pending.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tab_queues_suggestions() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('/')));
        app.handle_key(key_event(KeyCode::Tab));
        assert!(app.pending.is_none(), "Blank input should not fetch suggestions");

        type_text(&mut app, "Lah");
        app.handle_key(key_event(KeyCode::Tab));
        assert_eq!(app.pending, Some(Action::Suggest("Lah".to_string())));
        assert_eq!(app.state, AppState::Searching);
    }

    #[test]
    fn test_enter_with_suggestion_loads_location() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, "Lah");
        app.suggestions = vec![location("Lahore, Pakistan"), location("Lahore, United States")];
        app.suggestion_index = Some(0);

        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.suggestion_index, Some(1));
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.suggestion_index, Some(0));
        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.suggestion_index, Some(1));

        app.handle_key(key_event(KeyCode::Enter));
        assert_eq!(
            app.pending,
            Some(Action::Load(location("Lahore, United States")))
        );
        assert!(app.suggestions.is_empty());
    }

    #[test]
    fn test_typing_resets_suggestions() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('/')));
        app.suggestions = vec![location("Lahore, Pakistan")];
        app.suggestion_index = Some(0);
        type_text(&mut app, "x");
        assert!(app.suggestions.is_empty());
        assert!(app.suggestion_index.is_none());
    }

    #[test]
    fn test_favorite_navigation_wraps() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.favorite_index, 3);
        app.handle_key(key_event(KeyCode::Char('j')));
        assert_eq!(app.favorite_index, 0);
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.favorite_index, 1);
        app.handle_key(key_event(KeyCode::Char('k')));
        assert_eq!(app.favorite_index, 0);
    }

    #[test]
    fn test_enter_searches_highlighted_favorite() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Enter));
        assert_eq!(app.pending, Some(Action::Search("Lahore".to_string())));
    }

    #[test]
    fn test_add_favorite_flow() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('a')));
        assert_eq!(app.state, AppState::AddingFavorite);
        type_text(&mut app, "Multan");
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.state, AppState::Dashboard);
        assert_eq!(
            app.session.favorites().last().map(String::as_str),
            Some("Multan")
        );
        assert_eq!(app.status, Some(Status::info("Added Multan to favorites")));
    }

    #[test]
    fn test_add_duplicate_favorite_reports_it() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('a')));
        type_text(&mut app, "Karachi");
        app.handle_key(key_event(KeyCode::Enter));
        assert_eq!(app.session.favorites().len(), 4);
        assert_eq!(
            app.status,
            Some(Status::info("Karachi is already a favorite"))
        );
    }

    #[test]
    fn test_clear_key() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('c')));
        assert!(app.session.location().is_none());
        assert_eq!(app.status, Some(Status::info("Cleared")));
    }

    #[test]
    fn test_reload_without_location_does_nothing() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('r')));
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_preference_keys() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('u')));
        app.handle_key(key_event(KeyCode::Char('t')));
        assert_eq!(app.session.units, Units::Imperial);
        assert_eq!(app.session.theme, Theme::Dark);
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = app();
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Char('c')));
        assert!(app.status.is_none(), "Keys should be ignored while help is shown");

        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_quit, "q should only close the help overlay");
    }

    #[test]
    fn test_keys_ignored_while_busy() {
        let mut app = app();
        app.pending = Some(Action::Search("Lahore".to_string()));
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_run_pending_blank_search_reports_not_found() {
        let mut app = app();
        app.pending = Some(Action::Search("  ".to_string()));
        app.run_pending().await;

        assert!(app.pending.is_none());
        assert_eq!(
            app.status,
            Some(Status::error(
                "City not found. Try another name or check spelling."
            ))
        );
    }

    #[tokio::test]
    async fn test_run_pending_without_action_is_noop() {
        let mut app = app();
        app.run_pending().await;
        assert!(app.status.is_none());
    }
}
