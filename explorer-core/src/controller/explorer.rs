//! ``src/controller/explorer.rs``
//! ============================================================================
//! # `ExplorerController`: the single owner of navigation, search and datasets
//!
//! The view layer holds one `ExplorerController`, calls `initialize` once,
//! forwards user intents to it, drains `next_event` into `handle_event`, and
//! asks for a fresh `render_plan` whenever something changed. All collaborator
//! calls run as spawned tasks that report back through the controller's own
//! event channel, so state is only mutated from the owner's task.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::controller::actions::Action;
use crate::controller::events::ControllerEvent;
use crate::controller::search_controller::SearchController;
use crate::model::dataset_store::DatasetStore;
use crate::model::entries::Section;
use crate::model::navigation::DirectoryNavigator;
use crate::model::view_mode::ViewMode;
use crate::service::{FileService, fetch_section};
use crate::view::projector::{RenderPlan, project};

/// Lifecycle of the background name index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexStatus {
    #[default]
    NotStarted,
    Building,
    Ready,
    Failed,
}

pub struct ExplorerController {
    service: Arc<dyn FileService>,
    navigator: DirectoryNavigator,
    search: SearchController,
    store: DatasetStore,
    view_mode: ViewMode,
    route: String,
    list_compact_threshold: usize,
    index_status: IndexStatus,
    events_tx: UnboundedSender<ControllerEvent>,
    events_rx: UnboundedReceiver<ControllerEvent>,
    action_tx: UnboundedSender<Action>,
}

impl ExplorerController {
    /// Routing requests go out on `action_tx`.
    #[must_use]
    pub fn new(service: Arc<dyn FileService>, config: &Config, action_tx: UnboundedSender<Action>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let navigator = DirectoryNavigator::new();

        Self {
            search: SearchController::new(Arc::clone(&service), events_tx.clone(), &config.search),
            service,
            route: navigator.current_directory().to_string(),
            navigator,
            store: DatasetStore::new(),
            view_mode: config.view.default_mode,
            list_compact_threshold: config.view.list_compact_threshold,
            index_status: IndexStatus::NotStarted,
            events_tx,
            events_rx,
            action_tx,
        }
    }

    /// Start the index build and fetch every section.
    pub fn initialize(&mut self) {
        info!(marker = "CONTROLLER_INIT", "initializing explorer controller");
        self.build_index();
        self.refresh_all();
    }

    /// Rebuild the name index in the background. Failure is logged only.
    pub fn build_index(&mut self) {
        self.index_status = IndexStatus::Building;
        let service = Arc::clone(&self.service);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = service.build_index().await;
            let _ = events.send(ControllerEvent::IndexBuilt(result));
        });
    }

    /// Re-fetch one section. An older fetch for the same section still in
    /// flight will be ignored when it lands.
    pub fn refresh(&mut self, section: Section) {
        let generation = self.store.begin_fetch(section);
        let service = Arc::clone(&self.service);
        let events = self.events_tx.clone();

        debug!(
            marker = "DATASET_FETCH",
            operation_type = section.operation(),
            generation,
            "refreshing {}",
            section.title()
        );

        tokio::spawn(async move {
            let result = fetch_section(service.as_ref(), section).await;
            let _ = events.send(ControllerEvent::DatasetFetched {
                section,
                generation,
                result,
            });
        });
    }

    pub fn refresh_all(&mut self) {
        for section in Section::ALL {
            self.refresh(section);
        }
    }

    /* --------------------------- navigation --------------------------- */

    /// Free-form directory input; never rejected.
    pub fn set_directory(&mut self, raw: &str) -> &str {
        self.navigator.set_directory(raw)
    }

    pub fn home(&mut self) -> bool {
        match self.navigator.home() {
            Some(target) => {
                self.navigate(target);
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) -> bool {
        match self.navigator.back() {
            Some(target) => {
                self.navigate(target);
                true
            }
            None => false,
        }
    }

    /// Switch to a route chosen by the user (sidebar, keyboard shortcut).
    pub fn open_route(&mut self, route: &str) {
        let directory = self.navigator.set_directory(route).to_string();
        self.navigate(directory);
    }

    fn navigate(&mut self, target: String) {
        info!(
            marker = "NAVIGATE",
            operation_type = "navigation",
            "navigating to {}",
            target
        );
        self.route.clone_from(&target);
        if self.action_tx.send(Action::Navigate(target)).is_err() {
            debug!("action channel closed; navigation not forwarded");
        }
    }

    /* ----------------------------- search ----------------------------- */

    pub fn on_search_input(&mut self, text: &str) {
        self.search.on_input(text);
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn show_more_results(&mut self) -> bool {
        self.search.show_more()
    }

    /* ---------------------------- view mode --------------------------- */

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            debug!(marker = "VIEW_MODE", "view mode {} -> {}", self.view_mode, mode);
            self.view_mode = mode;
        }
    }

    pub fn cycle_view_mode(&mut self) -> ViewMode {
        self.set_view_mode(self.view_mode.next());
        self.view_mode
    }

    /* ----------------------------- events ----------------------------- */

    /// Next settled timer or collaborator call. The controller keeps a
    /// sender alive, so this only returns `None` if the channel is closed
    /// from outside.
    pub async fn next_event(&mut self) -> Option<ControllerEvent> {
        self.events_rx.recv().await
    }

    /// Apply an event. Returns `true` when a redraw is needed.
    pub fn handle_event(&mut self, event: ControllerEvent) -> bool {
        match event {
            ControllerEvent::Search(event) => self.search.handle(event),
            ControllerEvent::DatasetFetched {
                section,
                generation,
                result,
            } => self.store.complete_fetch(section, generation, result),
            ControllerEvent::IndexBuilt(result) => {
                match result {
                    Ok(()) => {
                        self.index_status = IndexStatus::Ready;
                        info!(marker = "INDEX_READY", operation_type = "build_index", "index ready");
                    }
                    Err(err) => {
                        self.index_status = IndexStatus::Failed;
                        warn!(
                            marker = "INDEX_FAILED",
                            operation_type = "build_index",
                            "Failed to build index: {}",
                            err
                        );
                    }
                }
                true
            }
        }
    }

    /// Stop the debounce timer and ignore everything still in flight.
    pub fn shutdown(&mut self) {
        self.search.shutdown();
        self.store.abandon_fetches();
        info!(marker = "CONTROLLER_SHUTDOWN", "explorer controller shut down");
    }

    /* ---------------------------- accessors --------------------------- */

    #[must_use]
    pub fn render_plan(&self) -> RenderPlan<'_> {
        project(self.view_mode, &self.route, &self.store, self.list_compact_threshold)
    }

    #[must_use]
    pub const fn search(&self) -> &SearchController {
        &self.search
    }

    #[must_use]
    pub const fn navigator(&self) -> &DirectoryNavigator {
        &self.navigator
    }

    #[must_use]
    pub const fn store(&self) -> &DatasetStore {
        &self.store
    }

    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    #[must_use]
    pub const fn index_status(&self) -> IndexStatus {
        self.index_status
    }
}

impl Drop for ExplorerController {
    fn drop(&mut self) {
        self.search.shutdown();
    }
}
