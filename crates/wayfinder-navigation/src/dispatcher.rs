//! Navigation dispatcher
//!
//! One dispatch turns a path into a page selection:
//! 1. Empty path → not-found
//! 2. Match against the top-level pattern (`/:page`)
//! 3. No match → replace the path with the default route and raise a
//!    popstate, which brings us back here once
//! 4. Match → highlight the menu entry and select the page, handing the
//!    remaining tail to it for its own sub-routing
//!
//! Dispatch is synchronous and returns only after the hosts are updated.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use wayfinder_route::{Route, RoutePattern};

use crate::event::{EventSink, NavigationEvent};
use crate::history::History;
use crate::menu::MenuHost;
use crate::page::{PageHost, PageRegistry, PageSelection};
use crate::state::{NavState, NavigationState};

/// Pattern every top-level path is matched against
pub const TOP_LEVEL_PATTERN: &str = "/:page";

/// Capture holding the page name
pub const PAGE_PARAM: &str = "page";

/// What a single dispatch decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A page (possibly not-found) was selected
    Selected(PageSelection),
    /// The path was replaced with this one; a popstate is on its way
    Redirected(String),
}

/// Collaborators the dispatcher writes to
#[derive(Clone)]
pub struct Hosts {
    pub pages: Arc<dyn PageHost>,
    pub menu: Arc<dyn MenuHost>,
    pub history: Arc<dyn History>,
    pub events: Arc<dyn EventSink>,
}

pub struct NavigationDispatcher {
    pattern: RoutePattern,
    default_route: String,
    registry: PageRegistry,
    hosts: Hosts,
    state: Arc<RwLock<NavigationState>>,
}

impl NavigationDispatcher {
    pub fn new(registry: PageRegistry, default_route: impl Into<String>, hosts: Hosts) -> Self {
        Self {
            pattern: RoutePattern::parse(TOP_LEVEL_PATTERN),
            default_route: default_route.into(),
            registry,
            hosts,
            state: Arc::new(RwLock::new(NavigationState::new())),
        }
    }

    /// Use a different top-level pattern. It should capture `:page`;
    /// without it every match resolves to not-found.
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = RoutePattern::parse(pattern);
        self
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn default_route(&self) -> &str {
        &self.default_route
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    /// Snapshot of the current navigation state
    pub fn state(&self) -> NavigationState {
        self.state.read().clone()
    }

    /// Dispatch whatever path the history currently holds
    /// (initial bootstrap and popstate)
    pub fn dispatch_current(&self) -> Dispatch {
        let path = self.hosts.history.current_path();
        self.dispatch(Some(&path))
    }

    /// Interpret `path` and apply the result to the hosts
    pub fn dispatch(&self, path: Option<&str>) -> Dispatch {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            tracing::debug!("Dispatch without a path");
            return Dispatch::Selected(self.apply(None, self.registry.not_found()));
        };

        let route = Route::from_pattern(self.pattern.clone(), path);
        let page = route.param(PAGE_PARAM).filter(|page| !page.is_empty());

        // An empty page segment (e.g. "/") is treated like a miss
        let Some(page) = page.filter(|_| route.active()) else {
            return self.redirect(path);
        };

        self.hosts.menu.set_selected(page);

        let selection = self.registry.resolve(page, route.tail());
        Dispatch::Selected(self.apply(Some(path), selection))
    }

    /// Show a page directly, without looking at the path (bad-route events)
    pub fn show(&self, page: &str) -> PageSelection {
        let selection = self.registry.resolve(page, None);
        self.apply(None, selection)
    }

    fn redirect(&self, path: &str) -> Dispatch {
        let target = NavState::Redirecting(self.default_route.clone());

        if !self.state.read().state.can_transition_to(&target) {
            tracing::warn!(
                path = %path,
                default_route = %self.default_route,
                "Default route does not match, showing not-found"
            );
            return Dispatch::Selected(self.apply(Some(path), self.registry.not_found()));
        }

        tracing::info!(from = %path, to = %self.default_route, "Redirecting unmatched path");

        self.transition(target, Some(path), None);

        // History first, so listeners of the event see the new path
        self.hosts.history.replace_state(&self.default_route);
        self.hosts.events.emit(NavigationEvent::PopState);

        Dispatch::Redirected(self.default_route.clone())
    }

    fn apply(&self, path: Option<&str>, selection: PageSelection) -> PageSelection {
        let next = if self.registry.is_not_found(&selection) {
            NavState::NotFound
        } else {
            NavState::Matched(selection.page.clone())
        };

        self.transition(next, path, Some(selection.clone()));
        self.hosts.pages.select_page(&selection);

        tracing::info!(page = %selection.page, tail = ?selection.tail, "Selected page");

        selection
    }

    fn transition(&self, next: NavState, path: Option<&str>, selection: Option<PageSelection>) {
        let mut state = self.state.write();

        tracing::debug!(from = %state.state, to = %next, "Navigation state transition");

        state.state = next;
        state.path = path.map(str::to_string);
        if selection.is_some() {
            state.selection = selection;
        }
        state.updated_at = Utc::now();
    }
}

impl Clone for NavigationDispatcher {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            default_route: self.default_route.clone(),
            registry: self.registry.clone(),
            hosts: self.hosts.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryKind, MemoryHistory};
    use crate::page::NOT_FOUND_PAGE;
    use crate::testing::{RecordingEvents, RecordingMenu, RecordingPages};

    struct Fixture {
        dispatcher: NavigationDispatcher,
        pages: Arc<RecordingPages>,
        menu: Arc<RecordingMenu>,
        history: MemoryHistory,
        events: Arc<RecordingEvents>,
    }

    fn fixture(default_route: &str) -> Fixture {
        let pages = Arc::new(RecordingPages::default());
        let menu = Arc::new(RecordingMenu::default());
        let history = MemoryHistory::new("/");
        let events = Arc::new(RecordingEvents::default());

        let hosts = Hosts {
            pages: pages.clone(),
            menu: menu.clone(),
            history: Arc::new(history.clone()),
            events: events.clone(),
        };
        let registry = PageRegistry::new(["cards", "patients"]);
        let dispatcher = NavigationDispatcher::new(registry, default_route, hosts);

        Fixture {
            dispatcher,
            pages,
            menu,
            history,
            events,
        }
    }

    /// Deliver recorded popstates the way the event loop would
    fn drain_popstates(f: &Fixture) -> usize {
        let mut delivered = 0;
        loop {
            let events = f.events.take();
            if events.is_empty() {
                return delivered;
            }
            for event in events {
                if event == NavigationEvent::PopState {
                    f.dispatcher.dispatch_current();
                    delivered += 1;
                }
            }
        }
    }

    #[test]
    fn test_matched_page() {
        let f = fixture("/cards/");
        let result = f.dispatcher.dispatch(Some("/patients/42"));

        assert_eq!(
            result,
            Dispatch::Selected(PageSelection::new("patients", Some("/42".to_string())))
        );
        assert_eq!(*f.menu.selected.lock(), vec!["patients"]);
        assert_eq!(f.pages.last().unwrap().page, "patients");

        let state = f.dispatcher.state();
        assert_eq!(state.state, NavState::Matched("patients".to_string()));
        assert_eq!(state.path.as_deref(), Some("/patients/42"));
        assert_eq!(state.tail(), Some("/42"));
        assert!(f.history.entries().is_empty());
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let f = fixture("/cards/");

        f.dispatcher.dispatch(None);
        assert_eq!(f.pages.last().unwrap().page, NOT_FOUND_PAGE);

        f.dispatcher.dispatch(Some(""));
        assert_eq!(f.pages.selections.lock().len(), 2);
        assert_eq!(f.dispatcher.state().state, NavState::NotFound);
        assert!(f.history.entries().is_empty());
        assert!(f.menu.selected.lock().is_empty());
    }

    #[test]
    fn test_unknown_page_is_not_found() {
        let f = fixture("/cards/");
        let result = f.dispatcher.dispatch(Some("/xyz"));

        assert_eq!(
            result,
            Dispatch::Selected(PageSelection::new(NOT_FOUND_PAGE, None))
        );
        // The menu still reflects what was asked for
        assert_eq!(*f.menu.selected.lock(), vec!["xyz"]);
        assert_eq!(f.dispatcher.state().state, NavState::NotFound);
    }

    #[test]
    fn test_redirect_once_then_match() {
        let f = fixture("/cards/");

        let result = f.dispatcher.dispatch(Some("/"));
        assert_eq!(result, Dispatch::Redirected("/cards/".to_string()));
        assert!(f.pages.selections.lock().is_empty());
        assert_eq!(
            f.dispatcher.state().state,
            NavState::Redirecting("/cards/".to_string())
        );

        assert_eq!(drain_popstates(&f), 1);

        assert_eq!(f.history.count(HistoryKind::Replace), 1);
        assert_eq!(f.history.current_path(), "/cards/");
        assert_eq!(f.pages.last().unwrap().page, "cards");
        assert_eq!(
            f.dispatcher.state().state,
            NavState::Matched("cards".to_string())
        );
    }

    #[test]
    fn test_relative_path_redirects() {
        let f = fixture("/patients/");
        assert_eq!(
            f.dispatcher.dispatch(Some("cards")),
            Dispatch::Redirected("/patients/".to_string())
        );
        drain_popstates(&f);
        assert_eq!(f.pages.last().unwrap().page, "patients");
    }

    #[test]
    fn test_broken_default_route_does_not_loop() {
        let f = fixture("nowhere");

        assert!(matches!(
            f.dispatcher.dispatch(Some("/")),
            Dispatch::Redirected(_)
        ));
        assert_eq!(drain_popstates(&f), 1);

        assert_eq!(f.history.count(HistoryKind::Replace), 1);
        assert_eq!(f.pages.last().unwrap().page, NOT_FOUND_PAGE);
        assert_eq!(f.dispatcher.state().state, NavState::NotFound);
    }

    #[test]
    fn test_show_bypasses_path() {
        let f = fixture("/cards/");
        f.dispatcher.dispatch(Some("/cards"));

        let selection = f.dispatcher.show("patients");
        assert_eq!(selection, PageSelection::new("patients", None));
        assert_eq!(f.dispatcher.state().path, None);

        let selection = f.dispatcher.show("nope");
        assert_eq!(selection.page, NOT_FOUND_PAGE);
        // Menu only follows path dispatches
        assert_eq!(*f.menu.selected.lock(), vec!["cards"]);
    }

    #[test]
    fn test_nested_sub_route_from_tail() {
        let f = fixture("/cards/");
        let Dispatch::Selected(selection) = f.dispatcher.dispatch(Some("/cards/123/edit")) else {
            panic!("Expected a selection");
        };

        let tail = selection.tail.unwrap();
        let card = Route::new("/:id", &tail);
        assert_eq!(card.param("id"), Some("123"));
        assert_eq!(card.sub_route("/:action").param("action"), Some("edit"));
    }

    #[test]
    fn test_custom_pattern() {
        let f = fixture("/app/cards");
        let dispatcher = f.dispatcher.clone().with_pattern("/app/:page");
        assert_eq!(dispatcher.pattern().as_str(), "/app/:page");

        assert_eq!(
            dispatcher.dispatch(Some("/app/cards")),
            Dispatch::Selected(PageSelection::new("cards", None))
        );
        assert!(matches!(
            dispatcher.dispatch(Some("/cards")),
            Dispatch::Redirected(_)
        ));
    }
}
