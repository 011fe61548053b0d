//! Application shell
//!
//! Translates browser events into explicit calls:
//! - popstate → dispatch the current history path, close the right drawer
//! - bad-route → show the named page directly
//! - drawer toggle → layout host
//! - loading start/end → loading counter
//!
//! Events are applied one at a time in arrival order.

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use wayfinder_navigation::{
    Dispatch, DrawerAction, DrawerSide, EventSink, History, Hosts, LinkActivation, Menu,
    NavigationDispatcher, NavigationEvent, PageHost, PageRegistry, PageSelection,
};
use wayfinder_sync::{LoadingCounter, LoadingIndicator};

use crate::config::Config;
use crate::error::CoreError;
use crate::layout::LayoutHost;
use crate::Result;

/// Outside pieces the shell drives
#[derive(Clone)]
pub struct AppHosts {
    pub history: Arc<dyn History>,
    pub pages: Arc<dyn PageHost>,
    pub layout: Arc<dyn LayoutHost>,
    pub loading: Arc<dyn LoadingIndicator>,
}

pub struct App {
    config: Config,
    history: Arc<dyn History>,
    layout: Arc<dyn LayoutHost>,
    menu: Menu,
    dispatcher: NavigationDispatcher,
    loading: LoadingCounter,
    events: UnboundedSender<NavigationEvent>,
}

impl App {
    /// Build the shell. The receiver must be handed to `run` (or `drain`)
    /// for events to be applied.
    pub fn new(
        config: Config,
        hosts: AppHosts,
    ) -> Result<(Self, UnboundedReceiver<NavigationEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let events: Arc<dyn EventSink> = Arc::new(tx.clone());

        let menu = Menu::new(hosts.history.clone(), events.clone()).with_base(&config.base_url)?;
        for item in &config.navigation {
            menu.add_item(item.clone());
        }
        menu.set_display_mode(&config.display_mode)?;

        let registry = PageRegistry::new(config.pages()).with_not_found(&config.not_found_page);
        let dispatcher = NavigationDispatcher::new(
            registry,
            config.default_route(),
            Hosts {
                pages: hosts.pages,
                menu: Arc::new(menu.clone()),
                history: hosts.history.clone(),
                events,
            },
        )
        .with_pattern(&config.route_pattern);

        tracing::info!(
            default_route = %dispatcher.default_route(),
            pages = ?dispatcher.registry().pages(),
            "Application shell ready"
        );

        Ok((
            Self {
                config,
                history: hosts.history,
                layout: hosts.layout,
                menu,
                dispatcher,
                loading: LoadingCounter::new(hosts.loading),
                events: tx,
            },
            rx,
        ))
    }

    /// Initial routing from whatever path the page was loaded with
    pub fn bootstrap(&self) -> Dispatch {
        let path = self.history.current_path();
        tracing::info!(path = %path, "Bootstrapping navigation");
        self.dispatcher.dispatch(Some(&path))
    }

    /// Raise an event for the loop to apply
    pub fn send(&self, event: NavigationEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| CoreError::EventLoopClosed)
    }

    /// Sender for components that raise events themselves
    pub fn event_sender(&self) -> UnboundedSender<NavigationEvent> {
        self.events.clone()
    }

    /// Click on a navigation entry
    pub fn activate_link(&self, name: &str) -> Result<LinkActivation> {
        Ok(self.menu.activate(name)?)
    }

    /// Main menu button: open the drawer holding the navigation
    pub fn open_main_menu(&self) {
        self.layout.toggle_drawer(DrawerSide::Right, DrawerAction::Add);
    }

    /// Apply one event. Returns false once the loop should stop.
    pub async fn handle(&self, event: NavigationEvent) -> bool {
        tracing::debug!(event = ?event, "Handling navigation event");

        match event {
            NavigationEvent::PopState => {
                self.dispatcher.dispatch_current();
                self.layout
                    .toggle_drawer(DrawerSide::Right, DrawerAction::Remove);
            }
            NavigationEvent::BadRoute(page) => {
                self.show(&page);
            }
            NavigationEvent::DrawerToggle { which, action } => {
                self.layout.toggle_drawer(which, action);
            }
            NavigationEvent::LoadingStart => self.loading.start().await,
            NavigationEvent::LoadingEnd => self.loading.end().await,
            NavigationEvent::Shutdown => {
                tracing::info!("Navigation loop shutting down");
                return false;
            }
        }

        true
    }

    /// Apply events until `Shutdown` arrives or every sender is gone
    pub async fn run(&self, mut events: UnboundedReceiver<NavigationEvent>) {
        while let Some(event) = events.recv().await {
            if !self.handle(event).await {
                break;
            }
        }
    }

    /// Apply everything already queued, including events raised while doing
    /// so. Returns the number of events applied.
    pub async fn drain(&self, events: &mut UnboundedReceiver<NavigationEvent>) -> usize {
        let mut applied = 0;
        while let Ok(event) = events.try_recv() {
            applied += 1;
            if !self.handle(event).await {
                break;
            }
        }
        applied
    }

    /// Show a page without consulting the path
    pub fn show(&self, page: &str) -> PageSelection {
        self.dispatcher.show(page)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn dispatcher(&self) -> &NavigationDispatcher {
        &self.dispatcher
    }

    pub fn loading(&self) -> &LoadingCounter {
        &self.loading
    }
}
