//! Pages
//!
//! The set of pages is fixed when the registry is built. Anything outside it
//! resolves to the not-found page.

use serde::{Deserialize, Serialize};

/// Reserved fallback page, always available
pub const NOT_FOUND_PAGE: &str = "not-found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSelection {
    /// Page identifier
    pub page: String,
    /// Unconsumed path for the page's own sub-routing
    pub tail: Option<String>,
}

impl PageSelection {
    pub fn new(page: impl Into<String>, tail: Option<String>) -> Self {
        Self {
            page: page.into(),
            tail,
        }
    }
}

/// Whatever switches the visible content
pub trait PageHost: Send + Sync {
    fn select_page(&self, selection: &PageSelection);
}

#[derive(Debug, Clone)]
pub struct PageRegistry {
    pages: Vec<String>,
    not_found: String,
}

impl PageRegistry {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            not_found: NOT_FOUND_PAGE.to_string(),
        }
    }

    pub fn with_not_found(mut self, page: impl Into<String>) -> Self {
        self.not_found = page.into();
        self
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn not_found_page(&self) -> &str {
        &self.not_found
    }

    pub fn contains(&self, name: &str) -> bool {
        name == self.not_found || self.pages.iter().any(|p| p == name)
    }

    pub fn is_not_found(&self, selection: &PageSelection) -> bool {
        selection.page == self.not_found
    }

    pub fn not_found(&self) -> PageSelection {
        PageSelection::new(self.not_found.clone(), None)
    }

    /// Exact-match `name` against the known pages; unknown names (and their
    /// tail) fall through to not-found
    pub fn resolve(&self, name: &str, tail: Option<String>) -> PageSelection {
        if self.pages.iter().any(|p| p == name) {
            PageSelection::new(name, tail)
        } else {
            self.not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_page() {
        let registry = PageRegistry::new(["cards", "patients"]);
        let selection = registry.resolve("cards", Some("/123".to_string()));
        assert_eq!(selection.page, "cards");
        assert_eq!(selection.tail.as_deref(), Some("/123"));
    }

    #[test]
    fn test_resolve_unknown_page() {
        let registry = PageRegistry::new(["cards", "patients"]);
        let selection = registry.resolve("xyz", Some("/1".to_string()));
        assert_eq!(selection, PageSelection::new(NOT_FOUND_PAGE, None));
        assert!(registry.is_not_found(&selection));

        // Match is exact
        assert!(registry.is_not_found(&registry.resolve("Cards", None)));
    }

    #[test]
    fn test_custom_not_found() {
        let registry = PageRegistry::new(["cards"]).with_not_found("missing");
        assert!(registry.contains("missing"));
        assert!(!registry.contains(NOT_FOUND_PAGE));
        assert_eq!(registry.resolve("nope", None).page, "missing");
    }
}
