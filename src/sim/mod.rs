//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by layer, then entity ID)
//! - No rendering or platform dependencies beyond the `Window` trait

pub mod collision;
pub mod counter;
pub mod entity;
pub mod hud;
pub mod objects;
pub mod registry;
pub mod state;
pub mod strategy;
pub mod tick;

pub use collision::{Collision, box_collision, reflect_velocity};
pub use counter::Counter;
pub use entity::{Body, Collider, Entity, FrameContext, Label, Scenery, Sound, Sprite, Tag, TextColor};
pub use hud::{StrikesGraphic, StrikesNumeric, strikes_color};
pub use objects::{Ball, Brick, Paddle, PerkPaddle};
pub use registry::{Commands, EntityId, Layer, Registry};
pub use state::{CameraMode, GameEvent, GamePhase, GameState};
pub use strategy::{CollisionStrategy, StrategyKind};
pub use tick::{Ending, Key, TickInput, TickOutcome, tick};
