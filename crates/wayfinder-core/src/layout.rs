//! Drawer state
//!
//! Two side drawers and the modal backdrop behind them. The backdrop is
//! shown whenever any drawer is open.

use parking_lot::RwLock;
use std::sync::Arc;

use wayfinder_navigation::{DrawerAction, DrawerSide};

/// Whatever opens and closes the layout drawers
pub trait LayoutHost: Send + Sync {
    fn toggle_drawer(&self, which: DrawerSide, action: DrawerAction);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DrawerState {
    left: bool,
    right: bool,
}

#[derive(Default)]
pub struct Drawers {
    state: Arc<RwLock<DrawerState>>,
}

impl Drawers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, which: DrawerSide) -> bool {
        let state = self.state.read();
        match which {
            DrawerSide::Left => state.left,
            DrawerSide::Right => state.right,
        }
    }

    pub fn modal_shown(&self) -> bool {
        let state = self.state.read();
        state.left || state.right
    }

    pub fn open(&self, which: DrawerSide) {
        self.toggle_drawer(which, DrawerAction::Add);
    }

    pub fn close(&self, which: DrawerSide) {
        self.toggle_drawer(which, DrawerAction::Remove);
    }

    pub fn close_all(&self) {
        self.close(DrawerSide::Left);
        self.close(DrawerSide::Right);
    }
}

impl LayoutHost for Drawers {
    fn toggle_drawer(&self, which: DrawerSide, action: DrawerAction) {
        let mut state = self.state.write();
        let drawer = match which {
            DrawerSide::Left => &mut state.left,
            DrawerSide::Right => &mut state.right,
        };
        *drawer = action.apply(*drawer);

        tracing::debug!(which = %which, action = %action, open = *drawer, "Drawer toggled");
    }
}

impl Clone for Drawers {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_actions() {
        let drawers = Drawers::new();
        assert!(!drawers.modal_shown());

        drawers.toggle_drawer(DrawerSide::Right, DrawerAction::Toggle);
        assert!(drawers.is_open(DrawerSide::Right));
        assert!(drawers.modal_shown());

        drawers.toggle_drawer(DrawerSide::Right, DrawerAction::Add);
        assert!(drawers.is_open(DrawerSide::Right));

        drawers.toggle_drawer(DrawerSide::Right, DrawerAction::Toggle);
        assert!(!drawers.is_open(DrawerSide::Right));
        assert!(!drawers.modal_shown());
    }

    #[test]
    fn test_modal_follows_any_drawer() {
        let drawers = Drawers::new();
        drawers.open(DrawerSide::Left);
        drawers.open(DrawerSide::Right);
        drawers.close(DrawerSide::Left);
        assert!(drawers.modal_shown());

        drawers.close_all();
        assert!(!drawers.modal_shown());
        assert!(!drawers.is_open(DrawerSide::Left));
    }
}
