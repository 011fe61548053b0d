//! Wayfinder Navigation
//!
//! Keeps the visible page in step with the browser path:
//! - `NavigationDispatcher` matches a path against `/:page`, selects the page
//!   and redirects unmatched paths to the default route
//! - `Menu` intercepts SPA links, pushing history and raising a popstate
//!   instead of letting the browser reload
//! - `History`, `PageHost`, `MenuHost` and `EventSink` are the seams to
//!   whatever actually renders and owns the browser state

mod dispatcher;
mod error;
mod event;
mod history;
mod menu;
mod page;
mod state;

#[cfg(test)]
mod testing;

pub use dispatcher::{Dispatch, Hosts, NavigationDispatcher, PAGE_PARAM, TOP_LEVEL_PATTERN};
pub use error::NavigationError;
pub use event::{DrawerAction, DrawerSide, EventSink, NavigationEvent};
pub use history::{History, HistoryEntry, HistoryKind, MemoryHistory};
pub use menu::{DisplayMode, LinkActivation, Menu, MenuHost, MenuItem};
pub use page::{PageHost, PageRegistry, PageSelection, NOT_FOUND_PAGE};
pub use state::{NavState, NavigationState};

pub type Result<T> = std::result::Result<T, NavigationError>;
