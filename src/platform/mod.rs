//! Platform abstraction layer
//!
//! The simulation talks to the window through the `Window` trait:
//! - Yes/no prompts at the end of a run
//! - Session reset and shutdown
//! - Attaching and detaching the follow camera

use std::io::{self, BufRead, Write as _};

use glam::Vec2;

use crate::sim::EntityId;

/// Camera following an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Entity kept in view
    pub target: EntityId,
    /// Offset from the target's center
    pub offset: Vec2,
    /// World-space area shown
    pub view_size: Vec2,
    /// Window size the view is scaled into
    pub window_size: Vec2,
}

impl Camera {
    /// Zoomed-out view centered on `target`
    pub fn follow(target: EntityId, window_size: Vec2, zoom: f32) -> Self {
        Self {
            target,
            offset: Vec2::ZERO,
            view_size: window_size * zoom,
            window_size,
        }
    }
}

/// Window/session collaborator
pub trait Window {
    /// Ask the player a yes/no question
    fn prompt_yes_no(&mut self, message: &str) -> bool;
    /// Start the game over
    fn reset_session(&mut self);
    /// Shut the game down
    fn close_session(&mut self);
    /// Replace the active camera (`None` restores the fixed view)
    fn set_camera(&mut self, camera: Option<Camera>);
}

/// Window without a display: logs camera changes and reads prompt answers
/// from stdin
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    camera: Option<Camera>,
    closed: bool,
}

impl HeadlessWindow {
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Window for HeadlessWindow {
    fn prompt_yes_no(&mut self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if let Err(e) = io::stdout().flush() {
            log::warn!("Failed to flush prompt: {}", e);
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                log::warn!("Failed to read answer, treating as no: {}", e);
                false
            }
        }
    }

    fn reset_session(&mut self) {
        log::info!("Resetting session");
        self.camera = None;
    }

    fn close_session(&mut self) {
        log::info!("Closing session");
        self.closed = true;
    }

    fn set_camera(&mut self, camera: Option<Camera>) {
        match &camera {
            Some(c) => log::info!("Camera following #{}", c.target),
            None => log::info!("Camera back to fixed view"),
        }
        self.camera = camera;
    }
}
