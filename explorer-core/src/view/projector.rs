//! src/view/projector.rs
//! ============================================================
//! Pure projection from `(view mode, route, datasets)` to a
//! `RenderPlan`: which dataset is shown and in what shape.
//!
//! The plan borrows the store's snapshots, so it is built per
//! frame and dropped before the controller is touched again.

use crate::model::dataset_store::DatasetStore;
use crate::model::entries::{DatasetItem, DiskEntry, FileEntry, Section};
use crate::model::view_mode::ViewMode;

/// Item count above which `list` mode switches to compact cards.
pub const DEFAULT_LIST_COMPACT_THRESHOLD: usize = 15;

/// Column layout of a table, picked from the item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSet {
    Files,
    Disks,
}

impl ColumnSet {
    #[must_use]
    pub const fn for_item(item: &DatasetItem) -> Self {
        match item {
            DatasetItem::Disk(_) => Self::Disks,
            DatasetItem::File(_) => Self::Files,
        }
    }

    #[must_use]
    pub const fn for_section(section: Section) -> Self {
        if section.lists_files() { Self::Files } else { Self::Disks }
    }

    #[must_use]
    pub const fn titles(self) -> &'static [&'static str] {
        match self {
            Self::Files => &["Name", "Modified", "Size", "Type"],
            Self::Disks => &["Name", "Kind", "Used", "Available", "Total", "Usage"],
        }
    }
}

/// One card, shaped by what the item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card<'a> {
    Disk(&'a DiskEntry),
    File(&'a FileEntry),
}

impl<'a> From<&'a DatasetItem> for Card<'a> {
    fn from(item: &'a DatasetItem) -> Self {
        match item {
            DatasetItem::Disk(disk) => Self::Disk(disk),
            DatasetItem::File(file) => Self::File(file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    /// Rows of one dataset. `header` is the column strip, if shown.
    Table {
        header: Option<ColumnSet>,
        columns: ColumnSet,
        rows: &'a [DatasetItem],
    },

    /// One card per item.
    Cards(Vec<Card<'a>>),

    /// Compact cards split over two columns.
    CompactColumns {
        left: Vec<Card<'a>>,
        right: Vec<Card<'a>>,
    },

    /// The section has nothing to show.
    Empty(&'static str),

    /// The route names no section.
    NotFound { route: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan<'a> {
    pub mode: ViewMode,
    pub section: Option<Section>,

    /// Title bar, toolbar and borders; off in minimal mode
    pub chrome: bool,

    /// The section's first fetch has not settled yet
    pub loading: bool,

    pub body: Body<'a>,
}

impl RenderPlan<'_> {
    /// Number of dataset items the plan shows.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match &self.body {
            Body::Table { rows, .. } => rows.len(),
            Body::Cards(cards) => cards.len(),
            Body::CompactColumns { left, right } => left.len() + right.len(),
            Body::Empty(_) | Body::NotFound { .. } => 0,
        }
    }
}

fn cards(items: &[DatasetItem]) -> Vec<Card<'_>> {
    items.iter().map(Card::from).collect()
}

/// Build the plan for one frame.
#[must_use]
pub fn project<'a>(
    mode: ViewMode,
    route: &str,
    store: &'a DatasetStore,
    list_compact_threshold: usize,
) -> RenderPlan<'a> {
    let chrome = mode != ViewMode::Minimal;

    let Some(section) = Section::from_route(route) else {
        return RenderPlan {
            mode,
            section: None,
            chrome,
            loading: false,
            body: Body::NotFound {
                route: route.to_string(),
            },
        };
    };

    let slot = store.slot(section);
    let items = slot.items();
    let loading = slot.is_loading && !slot.loaded;

    let body = if items.is_empty() {
        Body::Empty(section.empty_message())
    } else {
        match mode {
            ViewMode::Normal => Body::Table {
                header: section.lists_files().then_some(ColumnSet::Files),
                columns: ColumnSet::for_section(section),
                rows: items,
            },
            ViewMode::Minimal => Body::Table {
                header: None,
                columns: ColumnSet::for_section(section),
                rows: items,
            },
            ViewMode::Grid => Body::Cards(cards(items)),
            ViewMode::List if items.len() > list_compact_threshold => {
                let (left, right) = items.split_at(items.len().div_ceil(2));
                Body::CompactColumns {
                    left: cards(left),
                    right: cards(right),
                }
            }
            ViewMode::List => {
                let columns = ColumnSet::for_item(&items[0]);
                Body::Table {
                    header: Some(columns),
                    columns,
                    rows: items,
                }
            }
        }
    };

    RenderPlan {
        mode,
        section: Some(section),
        chrome,
        loading,
        body,
    }
}
