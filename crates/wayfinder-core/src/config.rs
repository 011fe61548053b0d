//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use wayfinder_navigation::{
    DisplayMode, MenuItem, NOT_FOUND_PAGE, PAGE_PARAM, TOP_LEVEL_PATTERN,
};
use wayfinder_route::RoutePattern;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where unmatched paths are redirected. Falls back to the first
    /// navigation item's href.
    pub default_route: Option<String>,
    /// Top-level pattern; must capture `:page`
    pub route_pattern: String,
    /// Page shown for unknown page names
    pub not_found_page: String,
    /// Navigation entries, which also define the known pages
    pub navigation: Vec<MenuItem>,
    /// Initial menu layout: stack, flex or tab
    pub display_mode: String,
    /// Origin relative hrefs are resolved against
    pub base_url: String,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;

        tracing::info!(
            path = %path.as_ref().display(),
            pages = config.navigation.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Reject values that would only surface later as misbehavior
    pub fn validate(&self) -> Result<()> {
        self.display_mode.parse::<DisplayMode>()?;

        let pattern = RoutePattern::parse(&self.route_pattern);
        if !pattern.capture_names().contains(&PAGE_PARAM) {
            return Err(CoreError::Config(format!(
                "route pattern {:?} does not capture :page",
                self.route_pattern
            )));
        }

        if self.default_route.is_none() && self.navigation.is_empty() {
            return Err(CoreError::Config(
                "no default route and no navigation items to fall back on".to_string(),
            ));
        }

        if self.not_found_page.is_empty() {
            return Err(CoreError::Config("not-found page cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn default_route(&self) -> String {
        self.default_route
            .clone()
            .or_else(|| self.navigation.first().map(|item| item.href.clone()))
            .unwrap_or_else(|| "/".to_string())
    }

    /// Known page identifiers
    pub fn pages(&self) -> Vec<String> {
        self.navigation.iter().map(|item| item.name.clone()).collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_route: None,
            route_pattern: TOP_LEVEL_PATTERN.to_string(),
            not_found_page: NOT_FOUND_PAGE.to_string(),
            navigation: vec![
                MenuItem::new("cards", "Cards", "library_books", "/cards/").spa(),
                MenuItem::new("patients", "Patients", "face", "/patients/").spa(),
            ],
            display_mode: "stack".to_string(),
            base_url: "http://localhost/".to_string(),
        }
    }
}
