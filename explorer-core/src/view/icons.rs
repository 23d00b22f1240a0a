//! src/view/icons.rs
//! ============================================================================
//! # Dataset Icons (Nerd Fonts)
//!
//! Nerd Font glyphs for disks and the file types a listing can contain.

use crate::model::entries::FileType;

pub const DISK_ICON: &str = "";
pub const FOLDER_ICON: &str = "";
pub const FILE_ICON: &str = "";
pub const SYMLINK_ICON: &str = "";
pub const UNKNOWN_ICON: &str = "";
pub const SEARCH_ICON: &str = "";

#[must_use]
pub const fn for_file_type(file_type: FileType) -> &'static str {
    match file_type {
        FileType::File => FILE_ICON,
        FileType::Directory => FOLDER_ICON,
        FileType::Symlink => SYMLINK_ICON,
        FileType::Unknown => UNKNOWN_ICON,
    }
}
