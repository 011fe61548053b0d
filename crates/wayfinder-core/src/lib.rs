//! Wayfinder Core
//!
//! Application shell for a single-page app. Browser-side events arrive as
//! `NavigationEvent`s on one channel and are applied one at a time: routing,
//! menu selection, drawers and the loading indicator all hang off `App`.

mod app;
mod config;
mod error;
mod layout;

pub use app::{App, AppHosts};
pub use config::Config;
pub use error::CoreError;
pub use layout::{Drawers, LayoutHost};

// Re-export core components
pub use wayfinder_navigation::{
    Dispatch, DisplayMode, DrawerAction, DrawerSide, EventSink, History, HistoryEntry,
    HistoryKind, LinkActivation, MemoryHistory, Menu, MenuHost, MenuItem, NavState,
    NavigationDispatcher, NavigationError, NavigationEvent, NavigationState, PageHost,
    PageRegistry, PageSelection, NOT_FOUND_PAGE,
};
pub use wayfinder_route::{match_route, Route, RouteMatch, RoutePattern};
pub use wayfinder_sync::{AsyncMutex, LoadingCounter, LoadingIndicator, MutexGuard};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
