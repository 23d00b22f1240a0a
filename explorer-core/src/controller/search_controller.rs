//! ``src/controller/search_controller.rs``
//! ============================================================================
//! # `SearchController`: debounced, sequence-checked file-name search
//!
//! Keystrokes update the query text at once and arm a single trailing
//! debounce timer. When the timer fires the query is dispatched with a fresh
//! request sequence; a response is applied only if its sequence is still the
//! latest one issued. Clearing the box (or shutting down) retires the
//! in-flight sequence so a late response cannot bring old results back.

use std::sync::Arc;

use compact_str::CompactString;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace, warn};

use crate::config::SearchConfig;
use crate::error::AppError;
use crate::controller::events::{ControllerEvent, SearchEvent};
use crate::model::entries::FileEntry;
use crate::search::ranker::{DisplayResult, ResultWindow, format_search_results, result_window};
use crate::service::FileService;
use crate::util::debounce::{DebounceConfig, Debouncer, Fired};

/// Observable search state. Mutated only by [`SearchController`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query_text: CompactString,

    /// Hits as the service returned them; no order is assumed.
    pub result_set: Vec<FileEntry>,

    /// True only while the latest dispatched query is outstanding.
    pub is_searching: bool,

    /// Banner text for the last failed query
    pub error: Option<String>,

    /// "Show more" was requested for the current result set
    pub show_all: bool,
}

pub struct SearchController {
    service: Arc<dyn FileService>,
    events: UnboundedSender<ControllerEvent>,
    debouncer: Debouncer<String, ControllerEvent>,
    state: SearchState,
    ranked: Vec<DisplayResult>,

    /// Sequence of the most recently issued (or retired) request
    issued: u64,

    display_limit: usize,
    max_path_len: usize,
}

fn due(fired: Fired<String>) -> ControllerEvent {
    ControllerEvent::Search(SearchEvent::Due(fired))
}

impl SearchController {
    #[must_use]
    pub fn new(
        service: Arc<dyn FileService>,
        events: UnboundedSender<ControllerEvent>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            service,
            debouncer: Debouncer::new(DebounceConfig::with_delay(config.debounce), events.clone(), due),
            events,
            state: SearchState::default(),
            ranked: Vec::new(),
            issued: 0,
            display_limit: config.display_limit,
            max_path_len: config.max_path_len,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Ranked and annotated hits for the current result set.
    #[must_use]
    pub fn ranked(&self) -> &[DisplayResult] {
        &self.ranked
    }

    /// The capped slice currently on screen.
    #[must_use]
    pub fn window(&self) -> ResultWindow<'_> {
        result_window(&self.ranked, self.display_limit, self.state.show_all)
    }

    /// A dispatch is scheduled but its quiet period has not elapsed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Must be called from within a Tokio runtime.
    pub fn on_input(&mut self, text: &str) {
        self.state.query_text = CompactString::from(text);

        let query = text.trim();
        if query.is_empty() {
            trace!("blank search input, clearing");
            self.debouncer.cancel();
            self.reset_results();
            return;
        }

        let generation = self.debouncer.submit(query.to_string());
        trace!(generation, "search input {:?}", query);
    }

    /// Empty the box and drop everything pending or in flight.
    pub fn clear(&mut self) {
        self.state.query_text.clear();
        self.debouncer.cancel();
        self.reset_results();
        debug!(marker = "SEARCH_CLEARED", "search cleared");
    }

    /// Reveal hits beyond the display cap. No-op when nothing is hidden.
    pub fn show_more(&mut self) -> bool {
        if self.state.show_all || self.window().hidden == 0 {
            return false;
        }
        self.state.show_all = true;
        true
    }

    /// Apply a search event. Returns `true` when visible state changed.
    pub fn handle(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Due(fired) => {
                if !self.debouncer.accept(fired.generation) {
                    return false;
                }
                self.dispatch(fired.value);
                true
            }
            SearchEvent::Settled {
                sequence,
                query,
                result,
            } => self.settle(sequence, &query, result),
        }
    }

    /// Stop the timer and ignore anything still in flight.
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.retire();
    }

    fn dispatch(&mut self, query: String) {
        self.issued += 1;
        self.state.is_searching = true;

        let sequence = self.issued;
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        debug!(
            marker = "SEARCH_DISPATCH",
            operation_type = "search_files",
            sequence,
            "searching for {:?}",
            query
        );

        tokio::spawn(async move {
            let result = service.search_files(&query).await;
            let _ = events.send(SearchEvent::Settled { sequence, query, result }.into());
        });
    }

    fn settle(
        &mut self,
        sequence: u64,
        query: &str,
        result: Result<Vec<FileEntry>, AppError>,
    ) -> bool {
        if sequence != self.issued {
            debug!(
                marker = "SEARCH_STALE_RESPONSE",
                sequence,
                latest = self.issued,
                "discarding response for {:?}",
                query
            );
            return false;
        }

        self.state.is_searching = false;
        self.state.show_all = false;
        match result {
            Ok(hits) => {
                debug!(
                    marker = "SEARCH_SETTLED",
                    sequence,
                    hits = hits.len(),
                    "search for {:?} settled",
                    query
                );
                self.ranked = format_search_results(&hits, query, self.max_path_len);
                self.state.result_set = hits;
                self.state.error = None;
            }
            Err(err) => {
                warn!(
                    marker = "SEARCH_FAILED",
                    operation_type = "search_files",
                    "search for {:?} failed: {}",
                    query,
                    err
                );
                self.ranked.clear();
                self.state.result_set.clear();
                self.state.error = Some(err.user_message());
            }
        }
        true
    }

    fn reset_results(&mut self) {
        self.retire();
        self.ranked.clear();
        self.state.result_set.clear();
        self.state.error = None;
        self.state.show_all = false;
    }

    fn retire(&mut self) {
        if self.state.is_searching {
            self.issued += 1;
            self.state.is_searching = false;
            debug!(marker = "SEARCH_RETIRED", sequence = self.issued, "in-flight search retired");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::scripted::{ScriptedService, hit};
    use std::time::Duration;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn controller(service: &Arc<ScriptedService>) -> (SearchController, UnboundedReceiver<ControllerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service: Arc<dyn FileService> = service.clone();
        (SearchController::new(service, tx, &SearchConfig::default()), rx)
    }

    async fn step(ctl: &mut SearchController, rx: &mut UnboundedReceiver<ControllerEvent>) -> bool {
        match rx.recv().await.expect("controller event") {
            ControllerEvent::Search(event) => ctl.handle(event),
            other => panic!("unexpected event {other:?}"),
        }
    }

    fn names(ctl: &SearchController) -> Vec<&str> {
        ctl.ranked().iter().map(|r| r.entry.file_name.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn burst_dispatches_only_the_last_query() {
        let service = ScriptedService::new();
        service.answer("abc", Ok(vec![hit("abc.txt")]));
        let (mut ctl, mut rx) = controller(&service);

        ctl.on_input("a");
        tokio::time::advance(Duration::from_millis(100)).await;
        ctl.on_input("ab");
        tokio::time::advance(Duration::from_millis(100)).await;
        ctl.on_input("abc");
        assert_eq!(ctl.state().query_text.as_str(), "abc");

        assert!(step(&mut ctl, &mut rx).await);
        assert!(ctl.state().is_searching);
        assert!(step(&mut ctl, &mut rx).await);

        assert_eq!(service.searches(), vec!["abc"]);
        assert!(!ctl.state().is_searching);
        assert_eq!(names(&ctl), vec!["abc.txt"]);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_never_replaces_newer_results() {
        let service = ScriptedService::new();
        service.gate("first");
        service.answer("first", Ok(vec![hit("first.txt")]));
        service.answer("second", Ok(vec![hit("second.txt")]));
        let (mut ctl, mut rx) = controller(&service);

        ctl.on_input("first");
        assert!(step(&mut ctl, &mut rx).await);

        ctl.on_input("second");
        assert!(step(&mut ctl, &mut rx).await);
        assert!(step(&mut ctl, &mut rx).await);
        assert_eq!(names(&ctl), vec!["second.txt"]);

        service.release("first");
        assert!(!step(&mut ctl, &mut rx).await);
        assert_eq!(names(&ctl), vec!["second.txt"]);
        assert_eq!(ctl.state().result_set.len(), 1);
        assert!(!ctl.state().is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_clears_synchronously() {
        let service = ScriptedService::new();
        let (mut ctl, mut rx) = controller(&service);

        ctl.on_input("abc");
        assert!(ctl.is_pending());
        ctl.on_input("   ");

        assert!(!ctl.is_pending());
        assert!(!ctl.state().is_searching);
        assert!(ctl.state().result_set.is_empty());
        assert_eq!(ctl.state().error, None);
        assert_eq!(ctl.state().query_text.as_str(), "   ");

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert!(service.searches().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_shows_banner_and_keeps_query() {
        let service = ScriptedService::new();
        service.answer("boom", Err(AppError::search_failed("boom", "index offline")));
        let (mut ctl, mut rx) = controller(&service);

        ctl.on_input("boom");
        step(&mut ctl, &mut rx).await;
        step(&mut ctl, &mut rx).await;

        assert_eq!(ctl.state().error.as_deref(), Some("Search failed: index offline"));
        assert_eq!(ctl.state().query_text.as_str(), "boom");
        assert!(ctl.state().result_set.is_empty());
        assert!(!ctl.state().is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn success_after_failure_clears_the_banner() {
        let service = ScriptedService::new();
        service.answer("bad", Err(AppError::search_failed("bad", "nope")));
        service.answer("good", Ok(vec![hit("good.md")]));
        let (mut ctl, mut rx) = controller(&service);

        ctl.on_input("bad");
        step(&mut ctl, &mut rx).await;
        step(&mut ctl, &mut rx).await;
        assert!(ctl.state().error.is_some());

        ctl.on_input("good");
        step(&mut ctl, &mut rx).await;
        step(&mut ctl, &mut rx).await;
        assert_eq!(ctl.state().error, None);
        assert_eq!(names(&ctl), vec!["good.md"]);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_during_flight_discards_the_response() {
        let service = ScriptedService::new();
        service.gate("slow");
        service.answer("slow", Ok(vec![hit("slow.bin")]));
        let (mut ctl, mut rx) = controller(&service);

        ctl.on_input("slow");
        step(&mut ctl, &mut rx).await;
        assert!(ctl.state().is_searching);

        ctl.clear();
        assert!(!ctl.state().is_searching);
        assert!(ctl.state().query_text.is_empty());

        service.release("slow");
        assert!(!step(&mut ctl, &mut rx).await);
        assert!(ctl.state().result_set.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn query_is_trimmed_and_results_are_ranked() {
        let service = ScriptedService::new();
        service.answer("abc", Ok(vec![hit("abc.txt"), hit("xabcx"), hit("ABC")]));
        let (mut ctl, mut rx) = controller(&service);

        ctl.on_input("  abc ");
        step(&mut ctl, &mut rx).await;
        step(&mut ctl, &mut rx).await;

        assert_eq!(service.searches(), vec!["abc"]);
        assert_eq!(names(&ctl), vec!["ABC", "abc.txt", "xabcx"]);
        let raw: Vec<&str> = ctl.state().result_set.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(raw, vec!["abc.txt", "xabcx", "ABC"]);
    }

    #[tokio::test(start_paused = true)]
    async fn show_more_reveals_the_rest() {
        let service = ScriptedService::new();
        let hits = (0..25).map(|i| hit(&format!("file{i:02}"))).collect();
        service.answer("file", Ok(hits));
        let (mut ctl, mut rx) = controller(&service);

        ctl.on_input("file");
        step(&mut ctl, &mut rx).await;
        step(&mut ctl, &mut rx).await;

        assert_eq!(ctl.window().visible.len(), 10);
        assert_eq!(ctl.window().hidden, 15);
        assert!(ctl.show_more());
        assert_eq!(ctl.window().visible.len(), 25);
        assert!(!ctl.show_more());
    }
}
