//! Bricker - A breakout game with randomized brick powers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, brick strategies, game loop checks)
//! - `platform`: Window/camera collaborator abstraction
//! - `session`: Fixed timestep driver and play-again handling
//! - `settings`: Grid size and window configuration

pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(test)]
mod testing;

pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 700.0;
    pub const WINDOW_HEIGHT: f32 = 500.0;
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Grid defaults when no arguments are given
    pub const DEFAULT_BRICKS_IN_ROW: u32 = 7;
    pub const DEFAULT_ROWS_OF_BRICKS: u32 = 8;
    pub const BRICK_HEIGHT: f32 = 15.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 700.0;
    /// Used when a paddle is built with zero speed
    pub const PADDLE_DEFAULT_SPEED: f32 = 100.0;
    /// Distance of the user paddle center above the bottom edge
    pub const PADDLE_BASELINE_OFFSET: f32 = 30.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    pub const BALL_SPEED: f32 = 300.0;
    /// Pucks are scaled-down balls
    pub const PUCK_SCALE: f32 = 0.75;

    /// Player lives
    pub const STRIKES: i32 = 3;

    /// Ball contacts a perk paddle survives
    pub const PERK_PADDLE_EXPIRATION: i32 = 4;
    /// Perk state value meaning "no perk paddle live"
    pub const NO_PERK_PADDLE: i32 = 0;

    /// Camera switch states
    pub const CAMERA_OFF: i32 = 0;
    pub const CAMERA_ON: i32 = 1;
    /// Brick hits the camera follows the main ball for
    pub const CAMERA_FOLLOW_HITS: u32 = 4;
    /// Follow camera view size relative to the window
    pub const CAMERA_ZOOM: f32 = 1.2;
}

/// Asset paths handed to the loaders
pub mod assets {
    pub const BALL_IMAGE: &str = "assets/ball.png";
    pub const PUCK_IMAGE: &str = "assets/mockBall.png";
    pub const PADDLE_IMAGE: &str = "assets/paddle.png";
    pub const BRICK_IMAGE: &str = "assets/brick.png";
    pub const HEART_IMAGE: &str = "assets/heart.png";
    pub const BACKGROUND_IMAGE: &str = "assets/DARK_BG2_small.jpeg";
    pub const COLLISION_SOUND: &str = "assets/Bubble5_4.wav";
}

/// Unit direction for an angle measured from +x (y points down the screen)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
