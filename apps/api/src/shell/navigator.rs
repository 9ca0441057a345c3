//! Navigation Controller: owns the current `PageState` and keeps the
//! browser history in step with it.

use serde::Serialize;
use tracing::debug;

use crate::shell::guard::{guard, AuthState};
use crate::shell::page::{Page, PageParams, PageState};
use crate::shell::registry::{page_to_path, path_to_page};

/// The URL history the controller writes to.
pub trait History {
    /// Adds an entry, so back-navigation returns to the previous page.
    fn push(&mut self, path: &str);

    /// Rewrites the current entry in place.
    fn replace(&mut self, path: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "path", rename_all = "snake_case")]
pub enum HistoryEntry {
    Push(String),
    Replace(String),
}

/// History that records the operations so they can be replayed by a client.
#[derive(Debug, Clone, Default)]
pub struct RecordedHistory {
    pub entries: Vec<HistoryEntry>,
}

impl History for RecordedHistory {
    fn push(&mut self, path: &str) {
        self.entries.push(HistoryEntry::Push(path.to_string()));
    }

    fn replace(&mut self, path: &str) {
        self.entries.push(HistoryEntry::Replace(path.to_string()));
    }
}

/// What a single navigation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationOutcome {
    pub requested: Page,
    pub state: PageState,
    pub path: String,
    /// The guard substituted a different page for the requested one.
    pub redirected: bool,
    /// In-app navigation starts the new page at the top; back/forward keeps
    /// the browser's remembered position.
    pub reset_scroll: bool,
}

pub struct Navigator<H: History> {
    state: PageState,
    history: H,
}

impl<H: History> Navigator<H> {
    /// Starts on the landing page.
    pub fn new(history: H) -> Self {
        Self::with_state(PageState::landing(), history)
    }

    pub fn with_state(state: PageState, history: H) -> Self {
        Self { state, history }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    #[cfg(test)]
    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn into_history(self) -> H {
        self.history
    }

    /// In-app navigation: guard, commit, push the new path.
    pub fn navigate(&mut self, page: Page, params: PageParams, auth: AuthState) -> NavigationOutcome {
        let safe_page = guard(page, auth);
        self.state = PageState::new(safe_page, params);

        let path = page_to_path(&self.state);
        self.history.push(&path);

        debug!("navigate {} -> {} ({path})", page.as_str(), safe_page.as_str());
        NavigationOutcome {
            requested: page,
            state: self.state,
            path,
            redirected: safe_page != page,
            reset_scroll: true,
        }
    }

    /// Back/forward navigation or a direct URL load. Unknown paths land on the
    /// landing page. The guard applies here too; whenever the committed page's
    /// path differs from the one in the URL bar the entry is replaced.
    pub fn on_external_navigation(&mut self, path: &str, auth: AuthState) -> NavigationOutcome {
        let target = path_to_page(path).unwrap_or_else(PageState::landing);
        let safe_page = guard(target.page, auth);
        self.state = PageState::new(safe_page, target.params);

        let canonical = page_to_path(&self.state);
        if canonical != path {
            self.history.replace(&canonical);
        }

        debug!("external {path} -> {} ({canonical})", safe_page.as_str());
        NavigationOutcome {
            requested: target.page,
            state: self.state,
            path: canonical,
            redirected: safe_page != target.page,
            reset_scroll: false,
        }
    }
}
