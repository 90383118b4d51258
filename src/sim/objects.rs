//! Game objects: balls, paddles and bricks

use glam::Vec2;

use super::collision::{Collision, reflect_velocity};
use super::counter::Counter;
use super::entity::{Body, Collider, FrameContext, Sound, Sprite, Tag};
use super::registry::EntityId;
use super::state::GameEvent;
use super::strategy::{CollisionStrategy, StrategyKind};
use super::tick::{Key, TickInput};
use crate::consts::*;

/// A ball entity (the main ball or a puck)
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Body,
    pub sprite: Sprite,
    collision_sound: Sound,
    /// Brick hits since creation (never reset)
    collision_counter: u32,
}

impl Ball {
    pub fn new(body: Body, sprite: Sprite, collision_sound: Sound) -> Self {
        Self {
            body,
            sprite,
            collision_sound,
            collision_counter: 0,
        }
    }

    pub fn collision_counter(&self) -> u32 {
        self.collision_counter
    }

    /// Bounce off `other`: reflect about the contact normal and play the
    /// collision sound. Only bricks count toward the collision counter.
    pub fn on_collision_enter(
        &mut self,
        other: Collider,
        collision: &Collision,
        events: &mut Vec<GameEvent>,
    ) {
        self.body.vel = reflect_velocity(self.body.vel, collision.normal);
        events.push(GameEvent::Sound(self.collision_sound));
        if other.tag == Tag::Brick {
            self.collision_counter += 1;
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub body: Body,
    pub sprite: Sprite,
    speed: f32,
}

impl Paddle {
    /// A zero `speed` falls back to `PADDLE_DEFAULT_SPEED`
    pub fn new(body: Body, sprite: Sprite, speed: f32) -> Self {
        let speed = if speed == 0.0 { PADDLE_DEFAULT_SPEED } else { speed };
        Self {
            body,
            sprite,
            speed,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set horizontal velocity from the arrow keys (both pressed cancel out)
    pub fn update(&mut self, input: &TickInput) {
        let mut dir = 0.0;
        if input.is_pressed(Key::Left) {
            dir -= 1.0;
        }
        if input.is_pressed(Key::Right) {
            dir += 1.0;
        }
        self.body.vel = Vec2::new(dir * self.speed, 0.0);
    }
}

/// Temporary second paddle granted by a brick
///
/// The shared state counter is 0 while no perk paddle exists; creation bumps
/// it to 1 and every ball contact adds one more until the game loop expires
/// the paddle.
#[derive(Debug, Clone)]
pub struct PerkPaddle {
    pub paddle: Paddle,
    state: Counter,
}

impl PerkPaddle {
    pub fn new(paddle: Paddle, state: Counter) -> Self {
        Self { paddle, state }
    }

    /// Mark the perk paddle as live
    pub fn on_created(&self) {
        self.state.increment();
    }

    /// Count a ball contact. Anything else passes straight through.
    /// Returns whether the contact was counted.
    pub fn on_collision_enter(&mut self, other: Collider) -> bool {
        if other.tag != Tag::Ball {
            return false;
        }
        self.state.increment();
        log::trace!("perk paddle hit, state {}", self.state.value());
        true
    }
}

/// A destructible brick carrying one collision strategy
#[derive(Debug, Clone)]
pub struct Brick {
    pub body: Body,
    pub sprite: Sprite,
    strategy: CollisionStrategy,
    bricks_remaining: Counter,
    struck: bool,
}

impl Brick {
    /// Spawning a brick counts it toward `bricks_remaining`
    pub fn new(
        body: Body,
        sprite: Sprite,
        strategy: CollisionStrategy,
        bricks_remaining: Counter,
    ) -> Self {
        bricks_remaining.increment();
        Self {
            body,
            sprite,
            strategy,
            bricks_remaining,
            struck: false,
        }
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn is_struck(&self) -> bool {
        self.struck
    }

    /// First contact takes the brick off the remaining count and runs its
    /// strategy (which queues its removal). Further contacts before the
    /// removal is applied are ignored.
    pub fn on_collision_enter(&mut self, this: EntityId, other: Collider, ctx: &mut FrameContext<'_>) {
        if self.struck {
            log::trace!("brick #{} already struck, ignoring {:?}", this, other.tag);
            return;
        }
        self.struck = true;
        self.bricks_remaining.decrement();
        ctx.events.push(GameEvent::BrickStruck {
            kind: self.strategy.kind(),
        });
        self.strategy.on_collision(this, other, ctx.commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry::Commands;

    fn ball() -> Ball {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(BALL_SIZE));
        body.vel = Vec2::new(100.0, 200.0);
        Ball::new(body, Sprite("ball.png"), Sound("hit.wav"))
    }

    fn paddle(speed: f32) -> Paddle {
        Paddle::new(
            Body::new(Vec2::ZERO, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT)),
            Sprite("paddle.png"),
            speed,
        )
    }

    #[test]
    fn test_ball_counts_only_brick_hits() {
        let mut ball = ball();
        let mut events = Vec::new();
        let floor = Collision {
            normal: Vec2::new(0.0, -1.0),
            penetration: 1.0,
        };

        ball.on_collision_enter(Collider { id: 7, tag: Tag::Paddle }, &floor, &mut events);
        assert_eq!(ball.collision_counter(), 0);
        assert_eq!(ball.body.vel, Vec2::new(100.0, -200.0));

        ball.on_collision_enter(Collider { id: 8, tag: Tag::Brick }, &floor, &mut events);
        assert_eq!(ball.collision_counter(), 1);
        assert_eq!(ball.body.vel, Vec2::new(100.0, 200.0));

        assert_eq!(events, vec![GameEvent::Sound(Sound("hit.wav")); 2]);
    }

    #[test]
    fn test_ball_reflects_about_diagonal_normal() {
        let mut ball = ball();
        let normal = Vec2::new(-1.0, -1.0).normalize();
        let expected = ball.body.vel - 2.0 * ball.body.vel.dot(normal) * normal;

        let hit = Collision {
            normal,
            penetration: 0.5,
        };
        ball.on_collision_enter(Collider { id: 1, tag: Tag::Wall }, &hit, &mut Vec::new());
        assert!((ball.body.vel - expected).length() < 0.001);
    }

    #[test]
    fn test_paddle_follows_arrow_keys() {
        let mut paddle = paddle(PADDLE_SPEED);

        paddle.update(&TickInput {
            left: true,
            ..Default::default()
        });
        assert_eq!(paddle.body.vel, Vec2::new(-PADDLE_SPEED, 0.0));

        paddle.update(&TickInput {
            right: true,
            ..Default::default()
        });
        assert_eq!(paddle.body.vel, Vec2::new(PADDLE_SPEED, 0.0));

        paddle.update(&TickInput {
            left: true,
            right: true,
            ..Default::default()
        });
        assert_eq!(paddle.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_paddle_zero_speed_uses_default() {
        assert_eq!(paddle(0.0).speed(), PADDLE_DEFAULT_SPEED);
        assert_eq!(paddle(250.0).speed(), 250.0);
    }

    #[test]
    fn test_perk_paddle_counts_only_balls() {
        let state = Counter::new(0);
        let mut perk = PerkPaddle::new(paddle(PADDLE_SPEED), state.clone());
        perk.on_created();
        assert_eq!(state.value(), 1);

        assert!(!perk.on_collision_enter(Collider { id: 3, tag: Tag::Brick }));
        assert!(!perk.on_collision_enter(Collider { id: 4, tag: Tag::Wall }));
        assert_eq!(state.value(), 1);

        assert!(perk.on_collision_enter(Collider { id: 5, tag: Tag::Ball }));
        assert_eq!(state.value(), 2);
    }

    #[test]
    fn test_brick_counts_itself_and_decrements_once() {
        let remaining = Counter::new(0);
        let mut brick = Brick::new(
            Body::new(Vec2::ZERO, Vec2::new(97.0, BRICK_HEIGHT)),
            Sprite("brick.png"),
            CollisionStrategy::Basic,
            remaining.clone(),
        );
        assert_eq!(remaining.value(), 1);

        let input = TickInput::default();
        let mut commands = Commands::default();
        let mut events = Vec::new();
        let mut ctx = FrameContext {
            input: &input,
            commands: &mut commands,
            events: &mut events,
            dt: SIM_DT,
        };
        let ball = Collider { id: 1, tag: Tag::Ball };
        brick.on_collision_enter(9, ball, &mut ctx);
        brick.on_collision_enter(9, ball, &mut ctx);

        assert!(brick.is_struck());
        assert_eq!(remaining.value(), 0);
        assert_eq!(commands.len(), 1);
        assert_eq!(
            events,
            vec![GameEvent::BrickStruck {
                kind: StrategyKind::Basic
            }]
        );
    }
}
