//! Navigation State Machine
//!
//! ```text
//! Unrouted
//!   ↓ bootstrap / popstate / bad-route
//! Matched(page) ⇄ NotFound
//!   ↓ unmatched path
//! Redirecting(target)
//!   ↓ popstate for target
//! Matched(page) | NotFound
//! ```
//!
//! There is no terminal state. Two redirects in a row are refused so a
//! default route that does not match cannot loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::page::PageSelection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "target", rename_all = "lowercase")]
pub enum NavState {
    /// Nothing dispatched yet
    Unrouted,
    /// A known page is showing
    Matched(String),
    /// Path was replaced with this target; waiting for its popstate
    Redirecting(String),
    /// The fallback page is showing
    NotFound,
}

impl NavState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: &NavState) -> bool {
        match (self, target) {
            // Nothing leads back to the initial state
            (NavState::Unrouted, NavState::Unrouted) => true,
            (_, NavState::Unrouted) => false,
            // A redirect must be resolved before another one is issued
            (NavState::Redirecting(_), NavState::Redirecting(_)) => false,
            _ => true,
        }
    }

    /// Page currently shown, if any
    pub fn page(&self) -> Option<&str> {
        match self {
            NavState::Matched(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavState::Unrouted => "unrouted",
            NavState::Matched(_) => "matched",
            NavState::Redirecting(_) => "redirecting",
            NavState::NotFound => "not-found",
        }
    }
}

impl std::fmt::Display for NavState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavState::Matched(target) | NavState::Redirecting(target) => {
                write!(f, "{}({})", self.as_str(), target)
            }
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

/// Snapshot of what the dispatcher last decided
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationState {
    pub state: NavState,
    /// Last path handed to dispatch (None for direct page selection)
    pub path: Option<String>,
    /// Last page handed to the page host
    pub selection: Option<PageSelection>,
    pub updated_at: DateTime<Utc>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            state: NavState::Unrouted,
            path: None,
            selection: None,
            updated_at: Utc::now(),
        }
    }

    /// Sub-route tail consumed by the selected page
    pub fn tail(&self) -> Option<&str> {
        self.selection.as_ref()?.tail.as_deref()
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
