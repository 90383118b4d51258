//! Brick collision strategies
//!
//! Every brick is assigned one strategy when it spawns. Whatever else a
//! strategy does, it always queues removal of the struck brick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::counter::Counter;
use super::entity::{Collider, Entity};
use super::objects::{Ball, PerkPaddle};
use super::registry::{Commands, EntityId, Layer};
use crate::consts::*;

/// Strategy variants, without their state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    Basic,
    AddStrike,
    DualBehavior,
    ChangeCamera,
    NewPucks,
    PerkPaddle,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Basic,
        StrategyKind::AddStrike,
        StrategyKind::DualBehavior,
        StrategyKind::ChangeCamera,
        StrategyKind::NewPucks,
        StrategyKind::PerkPaddle,
    ];

    /// Draw a kind over ten equal buckets: one each for the five special
    /// kinds, the remaining half for `Basic`
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..10u32) {
            0 => StrategyKind::NewPucks,
            1 => StrategyKind::PerkPaddle,
            2 => StrategyKind::ChangeCamera,
            3 => StrategyKind::AddStrike,
            4 => StrategyKind::DualBehavior,
            _ => StrategyKind::Basic,
        }
    }
}

/// Collision response attached to a brick
#[derive(Debug, Clone)]
pub enum CollisionStrategy {
    /// Remove the brick
    Basic,
    /// Remove the brick (no extra-life rule yet)
    AddStrike,
    /// Remove the brick (no composition rule yet)
    DualBehavior,
    /// Turn the follow camera on when the tracked ball hits the brick
    ChangeCamera {
        camera_switch: Counter,
        tracked_ball: EntityId,
    },
    /// Release two pucks built when the brick spawned
    NewPucks { pucks: Option<[Ball; 2]> },
    /// Release the perk paddle unless one is already live
    PerkPaddle {
        paddle: Option<PerkPaddle>,
        state: Counter,
    },
}

impl CollisionStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            CollisionStrategy::Basic => StrategyKind::Basic,
            CollisionStrategy::AddStrike => StrategyKind::AddStrike,
            CollisionStrategy::DualBehavior => StrategyKind::DualBehavior,
            CollisionStrategy::ChangeCamera { .. } => StrategyKind::ChangeCamera,
            CollisionStrategy::NewPucks { .. } => StrategyKind::NewPucks,
            CollisionStrategy::PerkPaddle { .. } => StrategyKind::PerkPaddle,
        }
    }

    /// Respond to `other` striking the brick `this`
    pub fn on_collision(&mut self, this: EntityId, other: Collider, commands: &mut Commands) {
        match self {
            CollisionStrategy::Basic
            | CollisionStrategy::AddStrike
            | CollisionStrategy::DualBehavior => {}

            CollisionStrategy::ChangeCamera {
                camera_switch,
                tracked_ball,
            } => {
                if other.id == *tracked_ball && camera_switch.value() == CAMERA_OFF {
                    camera_switch.increment();
                    log::debug!("brick #{} switched the follow camera on", this);
                }
            }

            CollisionStrategy::NewPucks { pucks } => {
                if let Some([first, second]) = pucks.take() {
                    commands.add(Entity::Ball(first), Layer::Default);
                    commands.add(Entity::Ball(second), Layer::Default);
                    log::debug!("brick #{} released two pucks", this);
                }
            }

            CollisionStrategy::PerkPaddle { paddle, state } => {
                if state.value() == NO_PERK_PADDLE {
                    if let Some(perk) = paddle.take() {
                        perk.on_created();
                        commands.add(Entity::PerkPaddle(perk), Layer::Default);
                        log::debug!("brick #{} released the perk paddle", this);
                    }
                }
            }
        }
        commands.remove(this);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Body, Scenery, Sound, Sprite, Tag};
    use crate::sim::objects::Paddle;
    use crate::sim::registry::Registry;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BALL: Collider = Collider { id: 1, tag: Tag::Ball };

    fn puck() -> Ball {
        Ball::new(
            Body::new(Vec2::ZERO, Vec2::splat(BALL_SIZE * PUCK_SCALE)),
            Sprite("puck.png"),
            Sound("hit.wav"),
        )
    }

    fn perk_paddle(state: &Counter) -> PerkPaddle {
        let paddle = Paddle::new(
            Body::new(Vec2::ZERO, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT)),
            Sprite("paddle.png"),
            PADDLE_SPEED,
        );
        PerkPaddle::new(paddle, state.clone())
    }

    /// Registry holding a single stand-in brick
    fn registry_with_brick() -> (Registry, EntityId) {
        let mut registry = Registry::new();
        let brick = registry.add(
            Entity::Scenery(Scenery::new(Body::default(), Sprite("brick.png"))),
            Layer::Default,
        );
        registry.flush();
        (registry, brick)
    }

    fn strike(strategy: &mut CollisionStrategy, registry: &mut Registry, brick: EntityId, other: Collider) {
        strategy.on_collision(brick, other, registry.commands_mut());
        registry.flush();
    }

    fn every_strategy() -> Vec<CollisionStrategy> {
        let state = Counter::new(0);
        vec![
            CollisionStrategy::Basic,
            CollisionStrategy::AddStrike,
            CollisionStrategy::DualBehavior,
            CollisionStrategy::ChangeCamera {
                camera_switch: Counter::new(CAMERA_OFF),
                tracked_ball: BALL.id,
            },
            CollisionStrategy::NewPucks {
                pucks: Some([puck(), puck()]),
            },
            CollisionStrategy::PerkPaddle {
                paddle: Some(perk_paddle(&state)),
                state,
            },
        ]
    }

    #[test]
    fn test_every_strategy_removes_the_brick() {
        let strategies = every_strategy();
        let kinds: Vec<_> = strategies.iter().map(CollisionStrategy::kind).collect();
        assert_eq!(kinds, StrategyKind::ALL);

        for mut strategy in strategies {
            let (mut registry, brick) = registry_with_brick();
            strike(&mut strategy, &mut registry, brick, BALL);
            assert!(!registry.contains(brick), "{:?} left its brick", strategy.kind());
        }
    }

    #[test]
    fn test_new_pucks_adds_two_balls() {
        let (mut registry, brick) = registry_with_brick();
        let mut strategy = CollisionStrategy::NewPucks {
            pucks: Some([puck(), puck()]),
        };
        strike(&mut strategy, &mut registry, brick, BALL);
        assert_eq!(registry.count_where(|e| matches!(e, Entity::Ball(_))), 2);

        // A second contact has no pucks left to release
        strike(&mut strategy, &mut registry, brick, BALL);
        assert_eq!(registry.count_where(|e| matches!(e, Entity::Ball(_))), 2);
    }

    #[test]
    fn test_perk_paddle_spawns_once() {
        let state = Counter::new(0);
        let (mut registry, brick) = registry_with_brick();
        let mut strategy = CollisionStrategy::PerkPaddle {
            paddle: Some(perk_paddle(&state)),
            state: state.clone(),
        };

        strike(&mut strategy, &mut registry, brick, BALL);
        assert_eq!(state.value(), 1);
        strike(&mut strategy, &mut registry, brick, BALL);
        assert_eq!(state.value(), 1);

        assert_eq!(registry.count_where(|e| matches!(e, Entity::PerkPaddle(_))), 1);
        assert!(!registry.contains(brick));
    }

    #[test]
    fn test_perk_paddle_not_duplicated_while_live() {
        let state = Counter::new(2);
        let (mut registry, brick) = registry_with_brick();
        let mut strategy = CollisionStrategy::PerkPaddle {
            paddle: Some(perk_paddle(&state)),
            state: state.clone(),
        };

        strike(&mut strategy, &mut registry, brick, BALL);
        assert_eq!(state.value(), 2);
        assert_eq!(registry.count_where(|e| matches!(e, Entity::PerkPaddle(_))), 0);
        assert!(!registry.contains(brick));
    }

    #[test]
    fn test_change_camera_is_idempotent_while_on() {
        let camera_switch = Counter::new(CAMERA_OFF);
        let (mut registry, brick) = registry_with_brick();
        let mut strategy = CollisionStrategy::ChangeCamera {
            camera_switch: camera_switch.clone(),
            tracked_ball: BALL.id,
        };

        strike(&mut strategy, &mut registry, brick, BALL);
        assert_eq!(camera_switch.value(), CAMERA_ON);
        strike(&mut strategy, &mut registry, brick, BALL);
        assert_eq!(camera_switch.value(), CAMERA_ON);
    }

    #[test]
    fn test_change_camera_ignores_other_balls() {
        let camera_switch = Counter::new(CAMERA_OFF);
        let (mut registry, brick) = registry_with_brick();
        let mut strategy = CollisionStrategy::ChangeCamera {
            camera_switch: camera_switch.clone(),
            tracked_ball: BALL.id,
        };

        let puck = Collider { id: 42, tag: Tag::Ball };
        strike(&mut strategy, &mut registry, brick, puck);
        assert_eq!(camera_switch.value(), CAMERA_OFF);
        assert!(!registry.contains(brick));
    }

    #[test]
    fn test_roll_shares() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let draws = 10_000;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..draws {
            *counts.entry(StrategyKind::roll(&mut rng)).or_insert(0u32) += 1;
        }

        let share = |kind| counts.get(&kind).copied().unwrap_or(0) as f32 / draws as f32;
        assert!((share(StrategyKind::Basic) - 0.5).abs() < 0.03);
        for kind in &StrategyKind::ALL[1..] {
            assert!((share(*kind) - 0.1).abs() < 0.02, "{:?}: {}", kind, share(*kind));
        }
    }
}
