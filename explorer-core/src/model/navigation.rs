//! ``src/model/navigation.rs``
//! ============================================================================
//! # `DirectoryNavigator`: current directory plus a one-slot history
//!
//! The navigator only ever remembers a single "previous" directory. `back`
//! swaps to that remembered directory and records the parent of the directory
//! being left, so repeated `back` calls alternate instead of walking further
//! up. Every mutating call that should move the router returns the target
//! path; `None` means nothing to navigate.

use tracing::debug;

pub const ROOT: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNavigator {
    current_directory: String,

    /// Empty means "no history"
    previous_directory: String,
}

impl Default for DirectoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_directory: ROOT.to_string(),
            previous_directory: String::new(),
        }
    }

    #[must_use]
    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    /// `None` when no history has been recorded.
    #[must_use]
    pub fn previous_directory(&self) -> Option<&str> {
        (!self.previous_directory.is_empty()).then_some(self.previous_directory.as_str())
    }

    /// Set the directory from free-form input. Never fails: empty input is the
    /// root and relative input is anchored at the root. History is untouched.
    pub fn set_directory(&mut self, raw: &str) -> &str {
        self.current_directory = normalize_directory(raw);
        debug!(
            marker = "NAV_SET_DIRECTORY",
            operation_type = "navigation",
            "directory set to {}",
            self.current_directory
        );
        &self.current_directory
    }

    /// Jump to the root, remembering where we came from.
    pub fn home(&mut self) -> Option<String> {
        if self.current_directory == ROOT {
            debug!(marker = "NAV_HOME_NOOP", "already at root");
            return None;
        }

        self.previous_directory = std::mem::replace(&mut self.current_directory, ROOT.to_string());
        debug!(
            marker = "NAV_HOME",
            operation_type = "navigation",
            previous = %self.previous_directory,
            "navigated home"
        );
        Some(ROOT.to_string())
    }

    /// Return to the remembered directory and remember the parent of the one
    /// being left.
    pub fn back(&mut self) -> Option<String> {
        if self.previous_directory.is_empty() {
            debug!(marker = "NAV_BACK_NOOP", "no history recorded");
            return None;
        }

        let parent = parent_directory(&self.current_directory);
        let target = std::mem::replace(&mut self.previous_directory, parent);
        self.current_directory.clone_from(&target);

        debug!(
            marker = "NAV_BACK",
            operation_type = "navigation",
            target = %target,
            remembered = %self.previous_directory,
            "navigated back"
        );
        Some(target)
    }
}

/// `""` → `/`, `docs` → `/docs`, `/docs` unchanged.
#[must_use]
pub fn normalize_directory(raw: &str) -> String {
    if raw.is_empty() {
        ROOT.to_string()
    } else if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}

/// Everything before the last `/`; the root when nothing meaningful remains.
#[must_use]
pub fn parent_directory(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) if idx > 0 => path[..idx].to_string(),
        _ => ROOT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_directory_always_yields_absolute_path() {
        let mut nav = DirectoryNavigator::new();
        for raw in ["", "docs", "/docs", "a/b", " ", "//x", "\\win"] {
            assert!(nav.set_directory(raw).starts_with('/'), "input {raw:?}");
        }
        assert_eq!(nav.set_directory(""), "/");
        assert_eq!(nav.set_directory("docs/2024"), "/docs/2024");
        assert_eq!(nav.set_directory("/usr/lib"), "/usr/lib");
        assert_eq!(nav.previous_directory(), None);
    }

    #[test]
    fn home_then_back_round_trips() {
        let mut nav = DirectoryNavigator::new();
        nav.set_directory("/home/user/projects");

        assert_eq!(nav.home().as_deref(), Some("/"));
        assert_eq!(nav.current_directory(), "/");
        assert_eq!(nav.previous_directory(), Some("/home/user/projects"));

        assert_eq!(nav.back().as_deref(), Some("/home/user/projects"));
        assert_eq!(nav.current_directory(), "/home/user/projects");
    }

    #[test]
    fn home_at_root_is_noop() {
        let mut nav = DirectoryNavigator::new();
        assert_eq!(nav.home(), None);
        assert_eq!(nav.previous_directory(), None);
    }

    #[test]
    fn back_without_history_is_noop() {
        let mut nav = DirectoryNavigator::new();
        assert_eq!(nav.back(), None);
        assert_eq!(nav.current_directory(), "/");

        nav.set_directory("/var/log");
        assert_eq!(nav.back(), None);
        assert_eq!(nav.current_directory(), "/var/log");
    }

    // Known limitation: only one level of history is kept. Consecutive
    // back() calls alternate between two directories instead of walking up.
    #[test]
    fn back_history_is_a_single_slot() {
        let mut nav = DirectoryNavigator::new();
        nav.set_directory("/a/b/c");
        nav.home();

        assert_eq!(nav.back().as_deref(), Some("/a/b/c"));
        // Leaving "/" records its parent, which is "/" itself.
        assert_eq!(nav.previous_directory(), Some("/"));

        assert_eq!(nav.back().as_deref(), Some("/"));
        assert_eq!(nav.previous_directory(), Some("/a/b"));

        assert_eq!(nav.back().as_deref(), Some("/a/b"));
        assert_eq!(nav.previous_directory(), Some("/"));
    }

    #[test]
    fn back_to_same_directory_still_swaps_history() {
        let mut nav = DirectoryNavigator::new();
        nav.set_directory("/x/y");
        nav.home();
        nav.set_directory("/x/y");
        assert_eq!(nav.previous_directory(), Some("/x/y"));

        assert_eq!(nav.back().as_deref(), Some("/x/y"));
        assert_eq!(nav.current_directory(), "/x/y");
        assert_eq!(nav.previous_directory(), Some("/x"));
    }

    #[test]
    fn parent_truncates_at_last_separator() {
        assert_eq!(parent_directory("/a/b/c"), "/a/b");
        assert_eq!(parent_directory("/a"), "/");
        assert_eq!(parent_directory("/"), "/");
        assert_eq!(parent_directory("plain"), "/");
    }
}
