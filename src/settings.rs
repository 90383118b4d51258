//! Game settings
//!
//! Built once from the command line; nothing is persisted.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected grid configurations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("bricks per row must be at least 1")]
    NoBricksInRow,
    #[error("rows of bricks must be at least 1")]
    NoRows,
    #[error("{0} bricks do not fit in one row")]
    RowTooWide(u32),
    #[error("{0} rows of bricks reach down to the paddle")]
    TooManyRows(u32),
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Bricks in each row
    pub bricks_in_row: u32,
    /// Number of brick rows
    pub rows_of_bricks: u32,
    /// Window width in pixels
    pub window_width: f32,
    /// Window height in pixels
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bricks_in_row: DEFAULT_BRICKS_IN_ROW,
            rows_of_bricks: DEFAULT_ROWS_OF_BRICKS,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
        }
    }
}

impl Settings {
    /// Interpret positional grid arguments.
    ///
    /// No values keeps the defaults, a single value is the number of rows, and
    /// two values are bricks per row followed by rows. Extra values are ignored.
    pub fn from_positional(counts: &[u32]) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        match counts {
            [] => {}
            [rows] => settings.rows_of_bricks = *rows,
            [in_row, rows, ..] => {
                settings.bricks_in_row = *in_row;
                settings.rows_of_bricks = *rows;
            }
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Check the grid fits between the side walls and above the paddle
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.bricks_in_row == 0 {
            return Err(SettingsError::NoBricksInRow);
        }
        if self.rows_of_bricks == 0 {
            return Err(SettingsError::NoRows);
        }
        if self.brick_size().x < 1.0 {
            return Err(SettingsError::RowTooWide(self.bricks_in_row));
        }
        let field_bottom = WALL_THICKNESS + self.rows_of_bricks as f32 * BRICK_HEIGHT;
        if field_bottom >= self.paddle_top() {
            return Err(SettingsError::TooManyRows(self.rows_of_bricks));
        }
        Ok(())
    }

    /// Total bricks spawned per session
    pub fn brick_count(&self) -> u32 {
        self.bricks_in_row * self.rows_of_bricks
    }

    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Brick dimensions (whole pixels wide, filling the space between side walls)
    pub fn brick_size(&self) -> Vec2 {
        let width = ((self.window_width - 2.0 * WALL_THICKNESS) / self.bricks_in_row as f32).floor();
        Vec2::new(width, BRICK_HEIGHT)
    }

    /// Top edge of the user paddle at its baseline
    pub fn paddle_top(&self) -> f32 {
        self.window_height - PADDLE_BASELINE_OFFSET - PADDLE_HEIGHT / 2.0
    }

    /// Vertical position below which a ball counts as lost
    pub fn bottom_bound(&self) -> f32 {
        self.window_height - WALL_THICKNESS
    }
}
