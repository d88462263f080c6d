//! Session configuration: board shape and renderer options.
//!
//! The engine never interprets `RenderOptions`; it is carried with the board
//! config so a persisted snapshot restores the table exactly as it looked.

use serde::{Deserialize, Serialize};

/// Visual options handed through to the renderer collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Edge length of one cell sprite, in pixels.
    pub sprite_size: u32,
    /// Font size of the cell number label.
    pub font_size: u32,
    /// Gap between neighboring cell sprites.
    pub spacing: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sprite_size: 48,
            font_size: 12,
            spacing: 12,
        }
    }
}

/// Board shape plus render options; the config half of a session snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Grid column count.
    pub columns: usize,
    /// Total cell count.
    pub total: usize,
    /// Renderer options, carried opaquely.
    #[serde(default)]
    pub render: RenderOptions,
}

impl BoardConfig {
    /// Create a config with default render options.
    #[must_use]
    pub fn new(columns: usize, total: usize) -> Self {
        Self {
            columns,
            total,
            render: RenderOptions::default(),
        }
    }

    /// Set render options.
    #[must_use]
    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Whether this config describes a buildable board.
    ///
    /// `Board::new` requires at least one column and one cell; anything that
    /// accepts a config from outside (deserialized snapshots, reconfiguration
    /// requests) checks this before handing it on.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.columns > 0 && self.total > 0
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(10, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.columns, 10);
        assert_eq!(config.total, 100);
        assert_eq!(config.render.sprite_size, 48);
        assert_eq!(config.render.spacing, 12);
    }

    #[test]
    fn test_serde_defaults_missing_render() {
        let config: BoardConfig = serde_json::from_str(r#"{"columns":5,"total":30}"#).unwrap();
        assert_eq!(config.render, RenderOptions::default());
    }

    #[test]
    fn test_validity_needs_a_nonempty_grid() {
        assert!(BoardConfig::default().is_valid());
        assert!(BoardConfig::new(1, 1).is_valid());
        assert!(!BoardConfig::new(0, 10).is_valid());
        assert!(!BoardConfig::new(10, 0).is_valid());
    }
}
