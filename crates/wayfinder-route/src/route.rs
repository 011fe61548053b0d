//! Route evaluation
//!
//! `Route` pairs a pattern with a path and is evaluated once, on
//! construction. Changing either input produces a new `Route`; nothing is
//! recomputed behind the caller's back.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::pattern::RoutePattern;

/// Outcome of matching one path against one pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    active: bool,
    data: BTreeMap<String, String>,
    tail: String,
}

impl RouteMatch {
    pub(crate) fn new(active: bool, data: BTreeMap<String, String>, tail: String) -> Self {
        Self { active, data, tail }
    }

    /// A match that never activates, used when there is nothing to match
    pub fn inactive() -> Self {
        Self::new(false, BTreeMap::new(), String::new())
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Captured values, or `None` when the match is not active
    pub fn data(&self) -> Option<&BTreeMap<String, String>> {
        self.active.then_some(&self.data)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.data()?.get(name).map(String::as_str)
    }

    /// Unmatched remainder with a leading `/`.
    ///
    /// `None` when inactive or when the pattern consumed the whole path.
    pub fn tail(&self) -> Option<String> {
        if !self.active || self.tail.is_empty() {
            None
        } else {
            Some(format!("/{}", self.tail))
        }
    }
}

/// Match `path` against `pattern`
pub fn match_route(pattern: &str, path: &str) -> RouteMatch {
    RoutePattern::parse(pattern).match_path(path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pattern: RoutePattern,
    path: String,
    result: RouteMatch,
}

impl Route {
    pub fn new(pattern: &str, path: &str) -> Self {
        Self::from_pattern(RoutePattern::parse(pattern), path)
    }

    pub fn from_pattern(pattern: RoutePattern, path: &str) -> Self {
        let result = pattern.match_path(path);
        Self {
            pattern,
            path: path.to_string(),
            result,
        }
    }

    /// Same path, different pattern
    pub fn with_pattern(&self, pattern: &str) -> Self {
        Self::new(pattern, &self.path)
    }

    /// Same pattern, different path
    pub fn with_path(&self, path: &str) -> Self {
        Self::from_pattern(self.pattern.clone(), path)
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn result(&self) -> &RouteMatch {
        &self.result
    }

    pub fn active(&self) -> bool {
        self.result.active()
    }

    pub fn data(&self) -> Option<&BTreeMap<String, String>> {
        self.result.data()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.result.param(name)
    }

    pub fn tail(&self) -> Option<String> {
        self.result.tail()
    }

    /// Route the tail of this route through another pattern.
    ///
    /// An inactive parent yields an inactive child; an active parent with
    /// nothing left over matches the child against the empty path.
    pub fn sub_route(&self, pattern: &str) -> Route {
        if !self.active() {
            return Route {
                pattern: RoutePattern::parse(pattern),
                path: String::new(),
                result: RouteMatch::inactive(),
            };
        }

        let tail = self.tail().unwrap_or_default();
        Route::new(pattern, &tail)
    }
}
