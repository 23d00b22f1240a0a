pub mod error;

pub mod config;

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod events;
    pub use events::{ControllerEvent, SearchEvent};

    pub mod search_controller;
    pub use search_controller::{SearchController, SearchState};

    pub mod explorer;
    pub use explorer::{ExplorerController, IndexStatus};
}

pub mod model {
    pub mod entries;
    pub use entries::{DatasetItem, DiskEntry, FileEntry, FileType, Section, UsageLevel};

    pub mod view_mode;
    pub use view_mode::ViewMode;

    pub mod navigation;
    pub use navigation::DirectoryNavigator;

    pub mod dataset_store;
    pub use dataset_store::{DatasetStore, FetchPayload};
}

pub mod search {
    pub mod highlight;
    pub use highlight::{HighlightSegment, highlight_match};

    pub mod paths;
    pub use paths::{directory_path, truncate_path};

    pub mod ranker;
    pub use ranker::{DisplayResult, format_search_results, sort_search_results};
}

pub mod service;

pub mod view {
    pub mod icons;

    pub mod theme;

    pub mod projector;
    pub use projector::{Body, RenderPlan, project};

    pub mod ui;
}

pub mod util {
    pub mod debounce;

    pub mod humanize;
}

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use controller::ExplorerController;
