//! Navigation events
//!
//! The only signals the router exchanges with the rest of the application:
//! - `PopState`: the visible path changed, re-derive everything from it
//! - `BadRoute`: show a given page without re-reading the path
//! - `DrawerToggle`: open/close a layout drawer
//! - `LoadingStart` / `LoadingEnd`: loading indicator reference counting

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::NavigationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail", rename_all = "kebab-case")]
pub enum NavigationEvent {
    PopState,
    BadRoute(String),
    DrawerToggle {
        which: DrawerSide,
        #[serde(default)]
        action: DrawerAction,
    },
    LoadingStart,
    LoadingEnd,
    /// Stop the event loop
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerSide {
    Left,
    Right,
}

impl DrawerSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawerSide::Left => "left",
            DrawerSide::Right => "right",
        }
    }
}

impl std::fmt::Display for DrawerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DrawerSide {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(DrawerSide::Left),
            "right" => Ok(DrawerSide::Right),
            _ => Err(NavigationError::InvalidDrawerSide(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerAction {
    Add,
    Remove,
    #[default]
    Toggle,
}

impl DrawerAction {
    /// New open/closed state given the current one
    pub fn apply(&self, open: bool) -> bool {
        match self {
            DrawerAction::Add => true,
            DrawerAction::Remove => false,
            DrawerAction::Toggle => !open,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DrawerAction::Add => "add",
            DrawerAction::Remove => "remove",
            DrawerAction::Toggle => "toggle",
        }
    }
}

impl std::fmt::Display for DrawerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DrawerAction {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(DrawerAction::Add),
            "remove" => Ok(DrawerAction::Remove),
            "toggle" => Ok(DrawerAction::Toggle),
            _ => Err(NavigationError::InvalidDrawerAction(s.to_string())),
        }
    }
}

/// Where navigation events are raised
pub trait EventSink: Send + Sync {
    fn emit(&self, event: NavigationEvent);
}

impl EventSink for UnboundedSender<NavigationEvent> {
    fn emit(&self, event: NavigationEvent) {
        if let Err(e) = self.send(event) {
            tracing::warn!(event = ?e.0, "Event loop closed, dropping navigation event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drawer_side() {
        assert_eq!("left".parse::<DrawerSide>().unwrap(), DrawerSide::Left);
        assert_eq!("right".parse::<DrawerSide>().unwrap(), DrawerSide::Right);
        assert!(matches!(
            "top".parse::<DrawerSide>(),
            Err(NavigationError::InvalidDrawerSide(s)) if s == "top"
        ));
    }

    #[test]
    fn test_drawer_action_apply() {
        assert!(DrawerAction::Add.apply(false));
        assert!(DrawerAction::Add.apply(true));
        assert!(!DrawerAction::Remove.apply(true));
        assert!(DrawerAction::Toggle.apply(false));
        assert!(!DrawerAction::Toggle.apply(true));
        assert!("flip".parse::<DrawerAction>().is_err());
    }

    #[test]
    fn test_event_json_shape() {
        let event: NavigationEvent =
            serde_json::from_str(r#"{"type":"drawer-toggle","detail":{"which":"right"}}"#)
                .unwrap();
        assert_eq!(
            event,
            NavigationEvent::DrawerToggle {
                which: DrawerSide::Right,
                action: DrawerAction::Toggle,
            }
        );

        let json = serde_json::to_string(&NavigationEvent::BadRoute("not-found".into())).unwrap();
        assert_eq!(json, r#"{"type":"bad-route","detail":"not-found"}"#);
    }

    #[tokio::test]
    async fn test_channel_sink() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.emit(NavigationEvent::PopState);
        assert_eq!(rx.recv().await, Some(NavigationEvent::PopState));

        drop(rx);
        // Closed loop is logged, not a panic
        tx.emit(NavigationEvent::PopState);
    }
}
