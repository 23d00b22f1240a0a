//! src/controller/events.rs
//! ============================================================================
//! # Controller events
//!
//! Everything that settles asynchronously (debounce timers, collaborator
//! calls) reports back as a `ControllerEvent` on one unbounded channel. The
//! owner drains that channel on a single task, so state is only ever mutated
//! in one place.

use crate::error::AppError;
use crate::model::dataset_store::FetchPayload;
use crate::model::entries::{FileEntry, Section};
use crate::util::debounce::Fired;

#[derive(Debug)]
pub enum SearchEvent {
    /// Quiet period elapsed for this (trimmed) query.
    Due(Fired<String>),

    /// A dispatched query came back.
    Settled {
        sequence: u64,
        query: String,
        result: Result<Vec<FileEntry>, AppError>,
    },
}

#[derive(Debug)]
pub enum ControllerEvent {
    Search(SearchEvent),

    DatasetFetched {
        section: Section,
        generation: u64,
        result: Result<FetchPayload, AppError>,
    },

    IndexBuilt(Result<(), AppError>),
}

impl From<SearchEvent> for ControllerEvent {
    fn from(event: SearchEvent) -> Self {
        Self::Search(event)
    }
}
