//! Entity model shared by the registry, the strategies and the game loop

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::hud::{StrikesGraphic, StrikesNumeric};
use super::objects::{Ball, Brick, Paddle, PerkPaddle};
use super::registry::{Commands, EntityId};
use super::state::GameEvent;
use super::tick::TickInput;

/// Collider identity used by collision callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Ball,
    Brick,
    Paddle,
    Wall,
    Scenery,
    Hud,
}

/// The other party of a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub id: EntityId,
    pub tag: Tag,
}

/// Image handle (opaque to the simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sprite(pub &'static str);

/// Sound handle (opaque to the simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sound(pub &'static str);

/// Position, size and velocity of a box-shaped entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub top_left: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self {
            top_left,
            size,
            vel: Vec2::ZERO,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.top_left + self.size * 0.5
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.top_left = center - self.size * 0.5;
    }

    /// Advance position by velocity
    pub fn integrate(&mut self, dt: f32) {
        self.top_left += self.vel * dt;
    }
}

/// Passive visual (background, heart symbol, non-colliding bottom wall)
#[derive(Debug, Clone)]
pub struct Scenery {
    pub body: Body,
    pub sprite: Sprite,
}

impl Scenery {
    pub fn new(body: Body, sprite: Sprite) -> Self {
        Self { body, sprite }
    }
}

/// Text tint for HUD labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextColor {
    Green,
    Yellow,
    Red,
}

/// Text visual
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub body: Body,
    pub text: String,
    pub color: TextColor,
}

/// Everything the registry can hold
#[derive(Debug, Clone)]
pub enum Entity {
    Ball(Ball),
    Paddle(Paddle),
    PerkPaddle(PerkPaddle),
    Brick(Brick),
    /// Solid boundary
    Wall(Body),
    Scenery(Scenery),
    Label(Label),
    StrikesGraphic(StrikesGraphic),
    StrikesNumeric(StrikesNumeric),
}

/// Per-tick services handed to entity callbacks
pub struct FrameContext<'a> {
    pub input: &'a TickInput,
    pub commands: &'a mut Commands,
    pub events: &'a mut Vec<GameEvent>,
    pub dt: f32,
}

impl Entity {
    pub fn tag(&self) -> Tag {
        match self {
            Entity::Ball(_) => Tag::Ball,
            Entity::Paddle(_) | Entity::PerkPaddle(_) => Tag::Paddle,
            Entity::Brick(_) => Tag::Brick,
            Entity::Wall(_) => Tag::Wall,
            Entity::Scenery(_) => Tag::Scenery,
            Entity::Label(_) | Entity::StrikesGraphic(_) | Entity::StrikesNumeric(_) => Tag::Hud,
        }
    }

    pub fn body(&self) -> Option<&Body> {
        match self {
            Entity::Ball(ball) => Some(&ball.body),
            Entity::Paddle(paddle) => Some(&paddle.body),
            Entity::PerkPaddle(perk) => Some(&perk.paddle.body),
            Entity::Brick(brick) => Some(&brick.body),
            Entity::Wall(body) => Some(body),
            Entity::Scenery(scenery) => Some(&scenery.body),
            Entity::Label(label) => Some(&label.body),
            Entity::StrikesGraphic(_) | Entity::StrikesNumeric(_) => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut Body> {
        match self {
            Entity::Ball(ball) => Some(&mut ball.body),
            Entity::Paddle(paddle) => Some(&mut paddle.body),
            Entity::PerkPaddle(perk) => Some(&mut perk.paddle.body),
            Entity::Brick(brick) => Some(&mut brick.body),
            Entity::Wall(body) => Some(body),
            Entity::Scenery(scenery) => Some(&mut scenery.body),
            Entity::Label(label) => Some(&mut label.body),
            Entity::StrikesGraphic(_) | Entity::StrikesNumeric(_) => None,
        }
    }

    /// Whether balls bounce off this entity
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            Entity::Paddle(_) | Entity::PerkPaddle(_) | Entity::Brick(_) | Entity::Wall(_)
        )
    }

    /// Paddles the player steers (kept inside the side walls)
    pub fn is_user_controlled(&self) -> bool {
        matches!(self, Entity::Paddle(_) | Entity::PerkPaddle(_))
    }

    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Entity::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_ball_mut(&mut self) -> Option<&mut Ball> {
        match self {
            Entity::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_brick(&self) -> Option<&Brick> {
        match self {
            Entity::Brick(brick) => Some(brick),
            _ => None,
        }
    }

    /// Per-frame update: read input, refresh observers, then move
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        match self {
            Entity::Paddle(paddle) => paddle.update(ctx.input),
            Entity::PerkPaddle(perk) => perk.paddle.update(ctx.input),
            Entity::StrikesGraphic(graphic) => graphic.update(ctx.commands),
            Entity::StrikesNumeric(numeric) => numeric.update(ctx.commands),
            _ => {}
        }
        if let Some(body) = self.body_mut() {
            body.integrate(ctx.dt);
        }
    }

    /// Contact began between this entity and `other`
    pub fn on_collision_enter(
        &mut self,
        this: EntityId,
        other: Collider,
        collision: &Collision,
        ctx: &mut FrameContext<'_>,
    ) {
        match self {
            Entity::Ball(ball) => ball.on_collision_enter(other, collision, ctx.events),
            Entity::PerkPaddle(perk) => {
                perk.on_collision_enter(other);
            }
            Entity::Brick(brick) => brick.on_collision_enter(this, other, ctx),
            _ => {}
        }
    }
}
