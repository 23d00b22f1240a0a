//! ``src/model/dataset_store.rs``
//! ============================================================================
//! # `DatasetStore`: last fetched snapshot per section
//!
//! One slot per [`Section`]. Every fetch replaces a slot wholesale; a failed
//! fetch leaves the previous snapshot in place. Slots are independent, and
//! each carries its own fetch generation so an older refresh of the same
//! section settling late cannot overwrite a newer one.

use tracing::{debug, warn};

use crate::error::AppError;
use crate::model::entries::{DatasetItem, DiskEntry, FileEntry, Section};

/// Raw collaborator answer for one section.
#[derive(Debug, Clone)]
pub enum FetchPayload {
    Disks(Vec<DiskEntry>),
    Files(Vec<FileEntry>),
}

impl FetchPayload {
    fn into_items(self) -> Vec<DatasetItem> {
        match self {
            Self::Disks(disks) => disks.into_iter().map(DatasetItem::Disk).collect(),
            Self::Files(files) => files.into_iter().map(DatasetItem::File).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetSlot {
    items: Vec<DatasetItem>,

    /// True while the latest fetch for this slot is outstanding.
    pub is_loading: bool,

    /// Last failure, kept for logs and diagnostics only.
    pub last_error: Option<String>,

    /// At least one fetch has succeeded.
    pub loaded: bool,

    generation: u64,
}

impl DatasetSlot {
    #[must_use]
    pub fn items(&self) -> &[DatasetItem] {
        &self.items
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    slots: [DatasetSlot; 4],
}

impl DatasetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn slot(&self, section: Section) -> &DatasetSlot {
        &self.slots[section as usize]
    }

    #[must_use]
    pub fn items(&self, section: Section) -> &[DatasetItem] {
        self.slot(section).items()
    }

    /// Mark a fetch as started and return the generation it must report with.
    pub fn begin_fetch(&mut self, section: Section) -> u64 {
        let slot = &mut self.slots[section as usize];
        slot.generation += 1;
        slot.is_loading = true;
        slot.generation
    }

    /// Apply a settled fetch. Returns `true` when the slot changed.
    pub fn complete_fetch(
        &mut self,
        section: Section,
        generation: u64,
        result: Result<FetchPayload, AppError>,
    ) -> bool {
        let slot = &mut self.slots[section as usize];
        if generation != slot.generation {
            debug!(
                marker = "DATASET_STALE_FETCH",
                section = section.title(),
                generation,
                latest = slot.generation,
                "discarding superseded fetch"
            );
            return false;
        }

        slot.is_loading = false;
        match result {
            Ok(payload) => {
                slot.items = payload.into_items();
                slot.loaded = true;
                slot.last_error = None;
                debug!(
                    marker = "DATASET_REPLACED",
                    section = section.title(),
                    count = slot.items.len(),
                    "dataset replaced"
                );
            }
            Err(err) => {
                warn!(
                    marker = "DATASET_FETCH_FAILED",
                    operation_type = section.operation(),
                    "Error fetching {}: {}",
                    section.title(),
                    err
                );
                slot.last_error = Some(err.to_string());
            }
        }
        true
    }

    /// Forget outstanding fetches; their results will be ignored.
    pub fn abandon_fetches(&mut self) {
        for slot in &mut self.slots {
            slot.generation += 1;
            slot.is_loading = false;
        }
    }
}
