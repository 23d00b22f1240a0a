//! Presentation strategy selected by the user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Normal,
    Minimal,
    Grid,
    List,
}

impl ViewMode {
    pub const ALL: [Self; 4] = [Self::Normal, Self::Minimal, Self::Grid, Self::List];

    /// Next mode in selector order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Any mode other than `Normal` is an alternate display mode.
    #[must_use]
    pub const fn is_display_mode(self) -> bool {
        !matches!(self, Self::Normal)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Minimal => "Minimal",
            Self::Grid => "Grid",
            Self::List => "List",
        }
    }

    /// Text of the cycling toolbar button.
    #[must_use]
    pub const fn button_text(self) -> &'static str {
        match self {
            Self::Normal => "Display",
            other => other.label(),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Normal => "normal",
            Self::Minimal => "minimal",
            Self::Grid => "grid",
            Self::List => "list",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "minimal" => Ok(Self::Minimal),
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_wraps_back_to_normal() {
        let mut mode = ViewMode::Normal;
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![ViewMode::Minimal, ViewMode::Grid, ViewMode::List, ViewMode::Normal]
        );
    }

    #[test]
    fn button_text_and_parsing() {
        assert_eq!(ViewMode::Normal.button_text(), "Display");
        assert_eq!(ViewMode::Grid.button_text(), "Grid");
        assert!(!ViewMode::Normal.is_display_mode());
        assert!(ViewMode::List.is_display_mode());
        assert_eq!("LIST".parse::<ViewMode>(), Ok(ViewMode::List));
        assert!("tiles".parse::<ViewMode>().is_err());
    }
}
