//! Testing utilities for the simulation and session.

#![cfg(test)]

use glam::Vec2;

use crate::consts::*;
use crate::platform::{Camera, Window};
use crate::settings::Settings;
use crate::sim::{
    Ball, Body, Collider, Collision, Entity, EntityId, FrameContext, GameState, Sound, Sprite,
    Tag, TickInput, TickOutcome, tick,
};

/// Window that records every call and answers prompts with `answer`
#[derive(Debug, Default)]
pub struct RecordingWindow {
    pub answer: bool,
    pub prompts: Vec<String>,
    pub cameras: Vec<Option<Camera>>,
    pub resets: u32,
    pub closes: u32,
}

impl Window for RecordingWindow {
    fn prompt_yes_no(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answer
    }

    fn reset_session(&mut self) {
        self.resets += 1;
    }

    fn close_session(&mut self) {
        self.closes += 1;
    }

    fn set_camera(&mut self, camera: Option<Camera>) {
        self.cameras.push(camera);
    }
}

/// Three bricks per row, two rows
pub fn small_settings() -> Settings {
    Settings {
        bricks_in_row: 3,
        rows_of_bricks: 2,
        ..Default::default()
    }
}

/// Helper to advance the state by one fixed step.
pub fn step(state: &mut GameState, input: &TickInput, window: &mut RecordingWindow) -> TickOutcome {
    tick(state, input, window, SIM_DT)
}

/// Helper to advance the state by multiple fixed steps.
pub fn tick_multiple(
    state: &mut GameState,
    input: &TickInput,
    window: &mut RecordingWindow,
    count: usize,
) -> TickOutcome {
    let mut outcome = TickOutcome::Continue;
    for _ in 0..count {
        outcome = step(state, input, window);
    }
    outcome
}

pub fn test_ball(body: Body) -> Ball {
    Ball::new(body, Sprite("ball.png"), Sound("hit.wav"))
}

/// Deliver a contact from `ball` to `brick` and apply the queued commands
pub fn strike_brick(state: &mut GameState, brick: EntityId, ball: EntityId) {
    let input = TickInput::default();
    let collision = Collision {
        normal: Vec2::NEG_Y,
        penetration: 0.0,
    };
    if let Some((entity, commands)) = state.registry.entity_and_commands(brick) {
        let mut ctx = FrameContext {
            input: &input,
            commands,
            events: &mut state.events,
            dt: SIM_DT,
        };
        let other = Collider {
            id: ball,
            tag: Tag::Ball,
        };
        entity.on_collision_enter(brick, other, &collision, &mut ctx);
    }
    state.registry.flush();
}

/// Count one brick hit on the main ball
pub fn bump_main_ball(state: &mut GameState) {
    let collision = Collision {
        normal: Vec2::Y,
        penetration: 0.0,
    };
    let brick = Collider {
        id: 0,
        tag: Tag::Brick,
    };
    let main_ball = state.main_ball;
    if let Some(Entity::Ball(ball)) = state.registry.get_mut(main_ball) {
        ball.on_collision_enter(brick, &collision, &mut state.events);
    }
}

/// Move the main ball below the paddle baseline
pub fn drop_main_ball(state: &mut GameState) {
    let y = state.settings.bottom_bound() + 50.0;
    if let Some(ball) = state.main_ball_mut() {
        let x = ball.body.center().x;
        ball.body.set_center(Vec2::new(x, y));
    }
}
