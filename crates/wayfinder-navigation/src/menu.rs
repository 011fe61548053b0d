//! Navigation menu
//!
//! Holds the navigation items, tracks which one is selected and intercepts
//! activation of items flagged `spa`: instead of a full page load the target
//! is pushed onto history and a popstate is raised.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::error::NavigationError;
use crate::event::{EventSink, NavigationEvent};
use crate::history::History;
use crate::Result;

/// Base that relative hrefs are resolved against
const DEFAULT_BASE: &str = "http://localhost/";

/// Whatever shows which navigation entry is current
pub trait MenuHost: Send + Sync {
    fn set_selected(&self, name: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub label: String,
    pub icon: String,
    pub href: String,
    #[serde(default)]
    pub selected: bool,
    /// Handled client-side instead of by a full page load
    #[serde(default)]
    pub spa: bool,
}

impl MenuItem {
    pub fn new(name: &str, label: &str, icon: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            href: href.to_string(),
            selected: false,
            spa: false,
        }
    }

    /// Mark as client-side navigation
    pub fn spa(mut self) -> Self {
        self.spa = true;
        self
    }
}

/// How the menu lays out its items.
///
/// Modes are cumulative: `flex` builds on `stack`, `tab` on `flex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Hidden
    None,
    Stack,
    Flex,
    Tab,
}

impl DisplayMode {
    /// Style layers applied for this mode, base first
    pub fn layers(&self) -> &'static [&'static str] {
        match self {
            DisplayMode::None => &[],
            DisplayMode::Stack => &["stack"],
            DisplayMode::Flex => &["stack", "flex"],
            DisplayMode::Tab => &["stack", "flex", "tab"],
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, DisplayMode::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::None => "none",
            DisplayMode::Stack => "stack",
            DisplayMode::Flex => "flex",
            DisplayMode::Tab => "tab",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Only the three visible modes may be requested by name; hiding the menu is
/// done with `Menu::hide`.
impl std::str::FromStr for DisplayMode {
    type Err = NavigationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "stack" => Ok(DisplayMode::Stack),
            "flex" => Ok(DisplayMode::Flex),
            "tab" => Ok(DisplayMode::Tab),
            _ => Err(NavigationError::InvalidDisplayMode(s.to_string())),
        }
    }
}

/// Result of activating a menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkActivation {
    /// Handled client-side; history now holds this path
    Intercepted(String),
    /// Not an SPA link; the browser should load this href itself
    FullNavigation(String),
}

pub struct Menu {
    items: Arc<RwLock<Vec<MenuItem>>>,
    display_mode: Arc<RwLock<DisplayMode>>,
    base: Url,
    history: Arc<dyn History>,
    events: Arc<dyn EventSink>,
}

impl Menu {
    pub fn new(history: Arc<dyn History>, events: Arc<dyn EventSink>) -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            display_mode: Arc::new(RwLock::new(DisplayMode::None)),
            base: Url::parse(DEFAULT_BASE).expect("default base URL is valid"),
            history,
            events,
        }
    }

    /// Resolve relative hrefs against `base` instead of the default origin
    pub fn with_base(mut self, base: &str) -> Result<Self> {
        self.base = Url::parse(base).map_err(|source| NavigationError::InvalidHref {
            href: base.to_string(),
            source,
        })?;
        Ok(self)
    }

    pub fn add_item(&self, item: MenuItem) {
        tracing::debug!(name = %item.name, href = %item.href, spa = item.spa, "Added menu item");
        self.items.write().push(item);
    }

    pub fn items(&self) -> Vec<MenuItem> {
        self.items.read().clone()
    }

    pub fn item(&self, name: &str) -> Option<MenuItem> {
        self.items.read().iter().find(|i| i.name == name).cloned()
    }

    pub fn selected_item(&self) -> Option<MenuItem> {
        self.items.read().iter().find(|i| i.selected).cloned()
    }

    /// Mark `name` as the only selected entry. Unknown names clear the
    /// selection.
    pub fn select(&self, name: &str) {
        let mut found = false;
        for item in self.items.write().iter_mut() {
            item.selected = item.name == name;
            found |= item.selected;
        }

        if !found {
            tracing::debug!(name = %name, "No menu item to select");
        }
    }

    /// Path part of an item's href, resolved against the base
    pub fn resolve_href(&self, href: &str) -> Result<String> {
        let url = self
            .base
            .join(href)
            .map_err(|source| NavigationError::InvalidHref {
                href: href.to_string(),
                source,
            })?;
        Ok(url.path().to_string())
    }

    /// Activate (click) the entry called `name`.
    ///
    /// SPA entries push their path onto history, then raise a popstate, then
    /// become selected. Other entries are left to the browser.
    pub fn activate(&self, name: &str) -> Result<LinkActivation> {
        let item = self
            .item(name)
            .ok_or_else(|| NavigationError::UnknownMenuItem(name.to_string()))?;

        if !item.spa {
            return Ok(LinkActivation::FullNavigation(item.href));
        }

        let path = self.resolve_href(&item.href)?;

        self.history.push_state(&path);
        self.events.emit(NavigationEvent::PopState);
        self.select(&item.name);

        tracing::info!(name = %item.name, path = %path, "Intercepted SPA link");

        Ok(LinkActivation::Intercepted(path))
    }

    pub fn display_mode(&self) -> DisplayMode {
        *self.display_mode.read()
    }

    /// Switch layout by name; anything but stack/flex/tab is a
    /// configuration error
    pub fn set_display_mode(&self, mode: &str) -> Result<DisplayMode> {
        let mode: DisplayMode = mode.parse()?;
        *self.display_mode.write() = mode;
        Ok(mode)
    }

    pub fn hide(&self) {
        *self.display_mode.write() = DisplayMode::None;
    }
}

impl MenuHost for Menu {
    fn set_selected(&self, name: &str) {
        self.select(name);
    }
}

impl Clone for Menu {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            display_mode: Arc::clone(&self.display_mode),
            base: self.base.clone(),
            history: Arc::clone(&self.history),
            events: Arc::clone(&self.events),
        }
    }
}
