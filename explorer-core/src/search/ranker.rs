//! Relevance ordering and display annotation for search hits.

use crate::model::entries::FileEntry;
use crate::search::highlight::{Segments, highlight_match};
use crate::search::paths::{directory_path, truncate_path};

/// Coarse relevance bucket; lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RankTier {
    Exact = 0,
    Prefix = 1,
    Other = 2,
}

impl RankTier {
    /// Both arguments must already be lower-cased.
    #[must_use]
    pub fn classify(lower_name: &str, lower_query: &str) -> Self {
        if lower_name == lower_query {
            Self::Exact
        } else if lower_name.starts_with(lower_query) {
            Self::Prefix
        } else {
            Self::Other
        }
    }
}

/// Order hits: exact name match, then prefix match, then the rest; each tier
/// by lower-cased name. Equal keys keep the service's order.
#[must_use]
pub fn sort_search_results(results: &[FileEntry], query: &str) -> Vec<FileEntry> {
    let lower_query = query.trim().to_lowercase();

    let mut keyed: Vec<(RankTier, String, &FileEntry)> = results
        .iter()
        .map(|entry| {
            let lower_name = entry.file_name.to_lowercase();
            (RankTier::classify(&lower_name, &lower_query), lower_name, entry)
        })
        .collect();

    // Vec::sort_by is stable
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    keyed.into_iter().map(|(_, _, entry)| entry.clone()).collect()
}

/// A ranked hit annotated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayResult {
    pub entry: FileEntry,
    pub highlighted_name: Segments,
    pub directory_path: String,
    /// `directory_path` shortened to the configured width
    pub display_directory: String,
}

/// Rank `results` for `query` and annotate every hit.
#[must_use]
pub fn format_search_results(
    results: &[FileEntry],
    query: &str,
    max_path_len: usize,
) -> Vec<DisplayResult> {
    sort_search_results(results, query)
        .into_iter()
        .map(|entry| {
            let directory = directory_path(&entry.file_path);
            DisplayResult {
                highlighted_name: highlight_match(&entry.file_name, query),
                display_directory: truncate_path(&directory, max_path_len),
                directory_path: directory,
                entry,
            }
        })
        .collect()
}

/// The capped slice of ranked results currently shown.
#[derive(Debug, Clone, Copy)]
pub struct ResultWindow<'a> {
    pub visible: &'a [DisplayResult],
    /// Ranked hits behind the "show more" affordance
    pub hidden: usize,
}

/// First `limit` results unless `show_all`; never re-ranks.
#[must_use]
pub fn result_window(ranked: &[DisplayResult], limit: usize, show_all: bool) -> ResultWindow<'_> {
    let shown = if show_all { ranked.len() } else { ranked.len().min(limit) };
    ResultWindow {
        visible: &ranked[..shown],
        hidden: ranked.len() - shown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entries::FileType;

    fn hit(name: &str) -> FileEntry {
        FileEntry::new(name, format!("/data/{name}"), 1, "Unknown", FileType::File)
    }

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.file_name.as_str()).collect()
    }

    #[test]
    fn exact_then_prefix_then_substring() {
        let results = vec![hit("abc.txt"), hit("xabcx"), hit("ABC")];
        let sorted = sort_search_results(&results, "abc");
        assert_eq!(names(&sorted), vec!["ABC", "abc.txt", "xabcx"]);
    }

    #[test]
    fn remaining_tier_is_alphabetical_ignoring_case() {
        let results = vec![hit("zeta-log"), hit("Alpha-log"), hit("beta-LOG"), hit("log")];
        let sorted = sort_search_results(&results, "LOG");
        assert_eq!(names(&sorted), vec!["log", "Alpha-log", "beta-LOG", "zeta-log"]);
    }

    #[test]
    fn equal_keys_keep_service_order() {
        let mut first = hit("Notes");
        first.file_path = "/one/Notes".into();
        let mut second = hit("notes");
        second.file_path = "/two/notes".into();
        let mut third = hit("NOTES");
        third.file_path = "/three/NOTES".into();

        let sorted = sort_search_results(&[first, second, third], "notes");
        let paths: Vec<&str> = sorted.iter().map(|e| e.file_path.as_str()).collect();
        assert_eq!(paths, vec!["/one/Notes", "/two/notes", "/three/NOTES"]);
    }

    #[test]
    fn formatted_results_carry_highlight_and_directory() {
        let results = vec![hit("xabcx")];
        let formatted = format_search_results(&results, "abc", 60);
        let row = &formatted[0];
        assert_eq!(row.directory_path, "/data");
        assert_eq!(row.display_directory, "/data");
        assert_eq!(row.highlighted_name.len(), 3);
        assert!(row.highlighted_name[1].is_match);
    }

    #[test]
    fn window_caps_then_reveals_without_reranking() {
        let results: Vec<FileEntry> = (0..25).map(|i| hit(&format!("file{i:02}"))).collect();
        let ranked = format_search_results(&results, "file", 60);

        let capped = result_window(&ranked, 10, false);
        assert_eq!(capped.visible.len(), 10);
        assert_eq!(capped.hidden, 15);

        let all = result_window(&ranked, 10, true);
        assert_eq!(all.visible.len(), 25);
        assert_eq!(all.hidden, 0);
        assert_eq!(all.visible[..10], capped.visible[..]);
    }
}
