//! Recording hosts for unit tests

use parking_lot::Mutex;

use crate::event::{EventSink, NavigationEvent};
use crate::menu::MenuHost;
use crate::page::{PageHost, PageSelection};

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingEvents {
    pub fn take(&self) -> Vec<NavigationEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for RecordingEvents {
    fn emit(&self, event: NavigationEvent) {
        self.events.lock().push(event);
    }
}

#[derive(Default)]
pub struct RecordingPages {
    pub selections: Mutex<Vec<PageSelection>>,
}

impl RecordingPages {
    pub fn last(&self) -> Option<PageSelection> {
        self.selections.lock().last().cloned()
    }
}

impl PageHost for RecordingPages {
    fn select_page(&self, selection: &PageSelection) {
        self.selections.lock().push(selection.clone());
    }
}

#[derive(Default)]
pub struct RecordingMenu {
    pub selected: Mutex<Vec<String>>,
}

impl MenuHost for RecordingMenu {
    fn set_selected(&self, name: &str) {
        self.selected.lock().push(name.to_string());
    }
}
