//! Game state and session setup
//!
//! Owns the registry, the shared counters and the seeded RNG. Everything that
//! is randomized (strategy choice, ball directions) draws from `rng`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::counter::Counter;
use super::entity::{Body, Entity, Scenery, Sound, Sprite};
use super::hud::{StrikesGraphic, StrikesNumeric};
use super::objects::{Ball, Brick, Paddle, PerkPaddle};
use super::registry::{EntityId, Layer, Registry};
use super::strategy::{CollisionStrategy, StrategyKind};
use crate::assets;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (waiting for the session to reset or close)
    GameOver,
}

/// Follow camera state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Fixed full-window view
    Inactive,
    /// Following the main ball since it had `start` brick hits
    Following { start: u32 },
}

/// Simulation output for the session (audio, logging)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(Sound),
    BrickStruck { kind: StrategyKind },
    StrikeLost { remaining: i32 },
    PerkPaddleExpired,
    CameraAttached,
    CameraDetached,
    Won,
    Lost,
}

/// Complete game state for one session
#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub registry: Registry,
    /// Player lives
    pub strikes: Counter,
    /// Bricks not yet struck
    pub bricks_remaining: Counter,
    /// 0 when no perk paddle is live, else 1 + ball contacts
    pub perk_paddle_state: Counter,
    /// `CAMERA_OFF` / `CAMERA_ON`
    pub camera_switch: Counter,
    pub camera: CameraMode,
    pub phase: GamePhase,
    /// The ball tracked for lives and the follow camera
    pub main_ball: EntityId,
    pub user_paddle: EntityId,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Ball/solid pairs touching at the end of the last tick
    pub(crate) contacts: Vec<(EntityId, EntityId)>,
}

impl GameState {
    /// Build a fresh session: ball, paddle, brick grid, walls and HUD
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            registry: Registry::new(),
            strikes: Counter::new(STRIKES),
            bricks_remaining: Counter::new(0),
            perk_paddle_state: Counter::new(NO_PERK_PADDLE),
            camera_switch: Counter::new(CAMERA_OFF),
            camera: CameraMode::Inactive,
            phase: GamePhase::Playing,
            main_ball: 0,
            user_paddle: 0,
            time_ticks: 0,
            events: Vec::new(),
            contacts: Vec::new(),
        };

        let ball = state.build_ball(Vec2::splat(BALL_SIZE), Sprite(assets::BALL_IMAGE));
        state.main_ball = state.registry.add(Entity::Ball(ball), Layer::Default);

        let window = settings.window_size();
        let mut paddle = state.build_paddle();
        paddle
            .body
            .set_center(Vec2::new(window.x / 2.0, window.y - PADDLE_BASELINE_OFFSET));
        state.user_paddle = state.registry.add(Entity::Paddle(paddle), Layer::Default);

        state.spawn_bricks();
        state.spawn_scenery();
        state.spawn_hud();
        state.registry.flush();

        log::info!(
            "Session ready: seed={}, {}x{} bricks",
            seed,
            settings.bricks_in_row,
            settings.rows_of_bricks
        );
        state
    }

    /// Random downward-facing velocity at the fixed ball speed
    pub fn random_ball_velocity(&mut self) -> Vec2 {
        let angle = self.rng.random::<f32>() * std::f32::consts::PI;
        crate::direction(angle) * BALL_SPEED
    }

    /// Move a ball back to the window center with a fresh random velocity
    pub fn place_ball(&mut self, body: &mut Body) {
        body.set_center(self.settings.window_size() * 0.5);
        body.vel = self.random_ball_velocity();
    }

    /// Put the main ball back in play after a lost strike
    pub fn respawn_main_ball(&mut self) {
        let vel = self.random_ball_velocity();
        let center = self.settings.window_size() * 0.5;
        if let Some(ball) = self.main_ball_mut() {
            ball.body.set_center(center);
            ball.body.vel = vel;
        }
    }

    pub fn main_ball(&self) -> Option<&Ball> {
        self.registry.get(self.main_ball).and_then(Entity::as_ball)
    }

    pub fn main_ball_mut(&mut self) -> Option<&mut Ball> {
        self.registry.get_mut(self.main_ball).and_then(Entity::as_ball_mut)
    }

    /// Number of live perk paddles
    pub fn perk_paddles(&self) -> usize {
        self.registry
            .count_where(|e| matches!(e, Entity::PerkPaddle(_)))
    }

    /// IDs of live bricks
    pub fn bricks(&self) -> Vec<EntityId> {
        self.registry.ids_where(|e| matches!(e, Entity::Brick(_)))
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn build_ball(&mut self, size: Vec2, sprite: Sprite) -> Ball {
        let mut body = Body::new(Vec2::ZERO, size);
        self.place_ball(&mut body);
        Ball::new(body, sprite, Sound(assets::COLLISION_SOUND))
    }

    fn build_paddle(&self) -> Paddle {
        Paddle::new(
            Body::new(Vec2::ZERO, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT)),
            Sprite(assets::PADDLE_IMAGE),
            PADDLE_SPEED,
        )
    }

    fn build_perk_paddle(&self) -> PerkPaddle {
        let mut paddle = self.build_paddle();
        paddle.body.set_center(self.settings.window_size() * 0.5);
        PerkPaddle::new(paddle, self.perk_paddle_state.clone())
    }

    /// Construct the state a strategy of `kind` needs. Pucks and perk
    /// paddles are built now, not when the brick is struck.
    fn build_strategy(&mut self, kind: StrategyKind) -> CollisionStrategy {
        match kind {
            StrategyKind::Basic => CollisionStrategy::Basic,
            StrategyKind::AddStrike => CollisionStrategy::AddStrike,
            StrategyKind::DualBehavior => CollisionStrategy::DualBehavior,
            StrategyKind::ChangeCamera => CollisionStrategy::ChangeCamera {
                camera_switch: self.camera_switch.clone(),
                tracked_ball: self.main_ball,
            },
            StrategyKind::NewPucks => {
                let size = Vec2::splat(BALL_SIZE * PUCK_SCALE);
                let pucks = [
                    self.build_ball(size, Sprite(assets::PUCK_IMAGE)),
                    self.build_ball(size, Sprite(assets::PUCK_IMAGE)),
                ];
                CollisionStrategy::NewPucks { pucks: Some(pucks) }
            }
            StrategyKind::PerkPaddle => CollisionStrategy::PerkPaddle {
                paddle: Some(self.build_perk_paddle()),
                state: self.perk_paddle_state.clone(),
            },
        }
    }

    fn spawn_bricks(&mut self) {
        let brick_size = self.settings.brick_size();
        let mut tally = [0u32; StrategyKind::ALL.len()];

        for row in 0..self.settings.rows_of_bricks {
            for col in 0..self.settings.bricks_in_row {
                let top_left = Vec2::new(
                    WALL_THICKNESS + col as f32 * brick_size.x,
                    WALL_THICKNESS + row as f32 * brick_size.y,
                );
                let kind = StrategyKind::roll(&mut self.rng);
                if let Some(slot) = StrategyKind::ALL.iter().position(|k| *k == kind) {
                    tally[slot] += 1;
                }
                let strategy = self.build_strategy(kind);
                let brick = Brick::new(
                    Body::new(top_left, brick_size),
                    Sprite(assets::BRICK_IMAGE),
                    strategy,
                    self.bricks_remaining.clone(),
                );
                self.registry.add(Entity::Brick(brick), Layer::Default);
            }
        }

        log::debug!(
            "Spawned {} bricks: {:?}",
            self.bricks_remaining.value(),
            StrategyKind::ALL.iter().zip(tally).collect::<Vec<_>>()
        );
    }

    /// Background, solid top/left/right walls and the non-solid bottom strip
    fn spawn_scenery(&mut self) {
        let window = self.settings.window_size();
        let background = Scenery::new(
            Body::new(Vec2::ZERO, window),
            Sprite(assets::BACKGROUND_IMAGE),
        );
        self.registry.add(Entity::Scenery(background), Layer::Background);

        let half = WALL_THICKNESS / 2.0;
        let walls = [
            Body::new(Vec2::new(0.0, -half), Vec2::new(window.x, WALL_THICKNESS)),
            Body::new(Vec2::new(-half, 0.0), Vec2::new(WALL_THICKNESS, window.y)),
            Body::new(Vec2::new(window.x - half, 0.0), Vec2::new(WALL_THICKNESS, window.y)),
        ];
        for wall in walls {
            self.registry.add(Entity::Wall(wall), Layer::Default);
        }

        let bottom = Scenery::new(
            Body::new(
                Vec2::new(0.0, window.y - half),
                Vec2::new(window.x, WALL_THICKNESS),
            ),
            Sprite("wall"),
        );
        self.registry.add(Entity::Scenery(bottom), Layer::Background);
    }

    fn spawn_hud(&mut self) {
        let window = self.settings.window_size();
        let commands = self.registry.commands_mut();

        let graphic = StrikesGraphic::new(
            self.strikes.clone(),
            window,
            Sprite(assets::HEART_IMAGE),
            commands,
        );
        commands.add(Entity::StrikesGraphic(graphic), Layer::Ui);

        let numeric = StrikesNumeric::new(
            self.strikes.clone(),
            Vec2::new(10.0, window.y - 100.0),
            Vec2::splat(20.0),
            commands,
        );
        commands.add(Entity::StrikesNumeric(numeric), Layer::Ui);
    }
}
