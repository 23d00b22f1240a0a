//! Path helpers for search result rows.

pub const DEFAULT_MAX_PATH_LEN: usize = 60;

const ELLIPSIS: &str = "...";

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Directory part of `file_path`: everything before the last separator.
/// No separator, or one at position 0, means the root.
#[must_use]
pub fn directory_path(file_path: &str) -> String {
    match file_path.rfind(is_separator) {
        Some(idx) if idx > 0 => file_path[..idx].to_string(),
        _ => "/".to_string(),
    }
}

/// Shorten a path for display.
///
/// Paths within `max_len` characters are returned unchanged. Longer ones keep
/// the first segment and the last two (`first/.../d/e`) when that is strictly
/// shorter than `max_len`, otherwise only the tail (`.../d/e`). The tail is
/// never cut, so it may still exceed `max_len`.
#[must_use]
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let len = path.chars().count();
    if len <= max_len {
        return path.to_string();
    }

    let parts: Vec<&str> = path.split(is_separator).collect();
    if parts.len() <= 2 {
        let keep = max_len.saturating_sub(ELLIPSIS.len());
        let tail: String = path.chars().skip(len - keep.min(len)).collect();
        return format!("{ELLIPSIS}{tail}");
    }

    let first = parts[0];
    let last = parts[parts.len() - 2..].join("/");

    let with_first = format!("{first}/{ELLIPSIS}/{last}");
    if with_first.chars().count() < max_len {
        with_first
    } else {
        format!("{ELLIPSIS}/{last}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_prefix_before_last_separator() {
        assert_eq!(directory_path("/home/u/a.txt"), "/home/u");
        assert_eq!(directory_path("C:\\Users\\u\\a.txt"), "C:\\Users\\u");
        assert_eq!(directory_path("/a.txt"), "/");
        assert_eq!(directory_path("a.txt"), "/");
    }

    #[test]
    fn short_paths_are_untouched() {
        assert_eq!(truncate_path("/home/u/a.txt", 60), "/home/u/a.txt");
    }

    #[test]
    fn long_path_keeps_last_two_segments_behind_ellipsis() {
        let path = "/a/b/c/d/e/very-long-name.txt";
        let out = truncate_path(path, 20);
        // The first segment is empty and the last two alone take 20 chars.
        assert_eq!(out, ".../e/very-long-name.txt");
        assert!(out.chars().count() < path.chars().count());
    }

    #[test]
    fn tail_only_when_neither_form_fits() {
        let path = "volume-label-xyz/a/b/c/d/some-directory/file-name-long.txt";
        assert_eq!(truncate_path(path, 20), ".../some-directory/file-name-long.txt");
    }

    #[test]
    fn first_segment_needs_strictly_less_than_max() {
        let path = "home/someone/projects/src/main.rs";
        // "home/.../src/main.rs" is exactly 20 chars.
        assert_eq!(truncate_path(path, 21), "home/.../src/main.rs");
        assert_eq!(truncate_path(path, 20), ".../src/main.rs");
    }

    #[test]
    fn first_segment_kept_when_it_fits() {
        let path = "home/someone/projects/rust/explorer/src/main.rs";
        assert_eq!(truncate_path(path, 30), "home/.../src/main.rs");
    }

    #[test]
    fn tail_only_when_first_segment_is_too_long() {
        let path = "a-really-long-volume-label/x/y/z/src/lib.rs";
        assert_eq!(truncate_path(path, 20), ".../src/lib.rs");
    }

    #[test]
    fn two_segment_paths_keep_the_tail() {
        let out = truncate_path("some-directory/an-extremely-long-file-name.txt", 20);
        assert_eq!(out, "...ong-file-name.txt");
        assert_eq!(out.chars().count(), 20);
    }
}
