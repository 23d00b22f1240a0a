//! `src/model/entries.rs`
//! ============================================================
//! Records exchanged with the file/index service and the tagged
//! union the dataset store hands to the view projector.
//!
//! Field names follow the service's wire format (snake_case), so
//! a JSON payload from the service deserializes directly.

use serde::{Deserialize, Serialize};

use crate::util::humanize::human_readable_size;

// ------------------------------------------------------------
// FileType: file, directory, symlink, or unknown.
// ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    File,
    Directory,
    Symlink,
    #[serde(other)]
    Unknown,
}

impl FileType {
    /// Human-readable column label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Directory => "Folder",
            Self::Symlink => "Link",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

// ------------------------------------------------------------
// FileEntry: one listing row or search hit.
// ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file_name: String,

    /// Absolute path; listings may leave it empty, search hits never do
    #[serde(default)]
    pub file_path: String,

    pub file_size: u64,

    /// RFC 3339 timestamp or the sentinel `"Unknown"`
    pub modification_date: String,

    pub formatted_size: String,

    #[serde(default)]
    pub file_type: FileType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl FileEntry {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        file_path: impl Into<String>,
        file_size: u64,
        modification_date: impl Into<String>,
        file_type: FileType,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: file_path.into(),
            file_size,
            modification_date: modification_date.into(),
            formatted_size: human_readable_size(file_size),
            file_type,
            thumbnail: None,
        }
    }
}

// ------------------------------------------------------------
// DiskEntry: one mounted volume.
// ------------------------------------------------------------

/// Disk usage bucket used to colour usage bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    Moderate,
    High,
    Critical,
}

impl UsageLevel {
    #[must_use]
    pub const fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90.. => Self::Critical,
            75.. => Self::High,
            50.. => Self::Moderate,
            _ => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskEntry {
    pub name: String,

    /// "SSD", "HDD", "Removable", ...
    pub kind: String,

    pub total_space: u64,

    pub available_space: u64,

    pub used_space: u64,

    pub formatted_total: String,

    pub formatted_available: String,

    pub formatted_used: String,
}

impl DiskEntry {
    /// Build from raw totals; `used` is derived so `used <= total` holds.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, total: u64, available: u64) -> Self {
        let available = available.min(total);
        let used = total - available;

        Self {
            name: name.into(),
            kind: kind.into(),
            total_space: total,
            available_space: available,
            used_space: used,
            formatted_total: human_readable_size(total),
            formatted_available: human_readable_size(available),
            formatted_used: human_readable_size(used),
        }
    }

    /// Rounded used/total percentage; 0 for a zero-sized disk.
    #[must_use]
    pub fn usage_percentage(&self) -> u8 {
        if self.total_space == 0 {
            return 0;
        }
        let pct = (self.used_space as f64 / self.total_space as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    #[must_use]
    pub fn usage_level(&self) -> UsageLevel {
        UsageLevel::from_percentage(self.usage_percentage())
    }
}

// ------------------------------------------------------------
// DatasetItem: explicit discriminant for the view layer.
// ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetItem {
    Disk(DiskEntry),
    File(FileEntry),
}

impl DatasetItem {
    #[must_use]
    pub const fn is_disk(&self) -> bool {
        matches!(self, Self::Disk(_))
    }

    /// Primary label: disk name or file name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Disk(disk) => &disk.name,
            Self::File(file) => &file.file_name,
        }
    }
}

// ------------------------------------------------------------
// Section: logical dataset behind a route.
// ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Disks,
    Downloads,
    Documents,
    Pictures,
}

impl Section {
    pub const ALL: [Self; 4] = [Self::Disks, Self::Downloads, Self::Documents, Self::Pictures];

    /// Resolve a route case-insensitively. `/` is the disks overview.
    #[must_use]
    pub fn from_route(route: &str) -> Option<Self> {
        let trimmed = route.trim();
        let path = trimmed.trim_end_matches('/');
        if path.is_empty() {
            return trimmed.starts_with('/').then_some(Self::Disks);
        }

        match path.to_ascii_lowercase().as_str() {
            "/disks" => Some(Self::Disks),
            "/downloads" => Some(Self::Downloads),
            "/documents" => Some(Self::Documents),
            "/pictures" => Some(Self::Pictures),
            _ => None,
        }
    }

    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::Disks => "/disks",
            Self::Downloads => "/Downloads",
            Self::Documents => "/Documents",
            Self::Pictures => "/Pictures",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Disks => "Disks",
            Self::Downloads => "Downloads",
            Self::Documents => "Documents",
            Self::Pictures => "Pictures",
        }
    }

    /// Message rendered when the section's dataset is empty.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Disks => "No disks found",
            Self::Downloads => "No downloads available.",
            Self::Documents => "No documents available.",
            Self::Pictures => "No pictures found",
        }
    }

    /// File-listing sections; only these get a column-header strip.
    #[must_use]
    pub const fn lists_files(self) -> bool {
        !matches!(self, Self::Disks)
    }

    /// Service operation name, used in log lines.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::Disks => "list_disks",
            Self::Downloads => "list_downloads",
            Self::Documents => "list_documents",
            Self::Pictures => "list_pictures",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve_case_insensitively() {
        assert_eq!(Section::from_route("/"), Some(Section::Disks));
        assert_eq!(Section::from_route("/disks"), Some(Section::Disks));
        assert_eq!(Section::from_route("/Downloads"), Some(Section::Downloads));
        assert_eq!(Section::from_route("/DOCUMENTS/"), Some(Section::Documents));
        assert_eq!(Section::from_route("/pictures"), Some(Section::Pictures));
        assert_eq!(Section::from_route("/Videos"), None);
        assert_eq!(Section::from_route(""), None);
    }

    #[test]
    fn disk_usage_derives_from_totals() {
        let disk = DiskEntry::new("sda1", "SSD", 1000, 80);
        assert_eq!(disk.used_space, 920);
        assert_eq!(disk.usage_percentage(), 92);
        assert_eq!(disk.usage_level(), UsageLevel::Critical);

        let empty = DiskEntry::new("loop0", "Unknown", 0, 0);
        assert_eq!(empty.usage_percentage(), 0);
        assert_eq!(empty.usage_level(), UsageLevel::Normal);
    }

    #[test]
    fn available_is_clamped_to_total() {
        let disk = DiskEntry::new("odd", "HDD", 100, 250);
        assert_eq!(disk.available_space, 100);
        assert_eq!(disk.used_space, 0);
    }

    #[test]
    fn service_payload_deserializes() {
        let payload = r#"[
            {"file_name":"a.txt","file_size":2048,"modification_date":"Unknown",
             "formatted_size":"2.0 KB","file_path":"/home/u/a.txt","file_type":"file",
             "lower_name":"a.txt"},
            {"file_name":"pipe","file_size":0,"modification_date":"Unknown",
             "formatted_size":"0 B","file_type":"fifo"}
        ]"#;

        let entries: Vec<FileEntry> = serde_json::from_str(payload).expect("valid payload");
        assert_eq!(entries[0].file_type, FileType::File);
        assert_eq!(entries[0].file_path, "/home/u/a.txt");
        assert_eq!(entries[1].file_type, FileType::Unknown);
        assert!(entries[1].file_path.is_empty());
    }

    #[test]
    fn file_type_labels() {
        assert_eq!(FileType::Directory.label(), "Folder");
        assert_eq!(FileType::Symlink.label(), "Link");
        assert_eq!(FileType::Directory.to_string(), "directory");
    }
}
