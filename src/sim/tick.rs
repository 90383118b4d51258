//! Fixed timestep simulation tick
//!
//! Core game loop: entity updates, contact dispatch, then the post-update
//! checks (bounds, perk paddle expiry, follow camera, end of game) in that
//! order.

use super::collision::box_collision;
use super::entity::{Collider, Entity, FrameContext, Tag};
use super::objects::Ball;
use super::state::{CameraMode, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::platform::{Camera, Window};

/// Horizontal slack before the autopilot steers
const AUTOPILOT_DEADZONE: f32 = 8.0;

/// Keys the simulation polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Ends the run as a win (debug/testing)
    DebugWin,
}

/// Input state for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub debug_win: bool,
    /// Idle/demo mode - the user paddle chases the main ball
    pub idle_mode: bool,
}

impl TickInput {
    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::DebugWin => self.debug_win,
        }
    }
}

/// What the session should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Player chose to play again
    Reset,
    /// Player chose to quit
    Closed,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Won,
    Lost,
}

impl Ending {
    pub fn prompt(&self) -> &'static str {
        match self {
            Ending::Won => "You won! Play again?",
            Ending::Lost => "You lost! Play again?",
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    window: &mut dyn Window,
    dt: f32,
) -> TickOutcome {
    // Nothing moves once the run is over
    if state.phase == GamePhase::GameOver {
        return TickOutcome::Closed;
    }
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        let ball_x = state.main_ball().map(|b| b.body.center().x);
        let paddle_x = state
            .registry
            .get(state.user_paddle)
            .and_then(Entity::body)
            .map(|b| b.center().x);
        if let (Some(ball_x), Some(paddle_x)) = (ball_x, paddle_x) {
            let dx = ball_x - paddle_x;
            input.left = dx < -AUTOPILOT_DEADZONE;
            input.right = dx > AUTOPILOT_DEADZONE;
        }
    }
    let input = &input;

    update_entities(state, input, dt);
    resolve_collisions(state, input, dt);

    check_bounds(state);
    check_perk_paddle_state(state);
    check_camera_state(state, window);
    let outcome = check_for_game_end(state, input, window);

    state.registry.flush();
    outcome
}

/// Run every entity's update in layer/ID order
fn update_entities(state: &mut GameState, input: &TickInput, dt: f32) {
    for id in state.registry.update_order() {
        if let Some((entity, commands)) = state.registry.entity_and_commands(id) {
            let mut ctx = FrameContext {
                input,
                commands,
                events: &mut state.events,
                dt,
            };
            entity.update(&mut ctx);
        }
    }
    state.registry.flush();
}

/// Detect ball contacts with solids and dispatch new ones to both parties
fn resolve_collisions(state: &mut GameState, input: &TickInput, dt: f32) {
    let balls = state.registry.ids_where(|e| matches!(e, Entity::Ball(_)));
    let solids = state.registry.ids_where(Entity::is_solid);
    let mut touching = Vec::new();

    for &ball_id in &balls {
        for &solid_id in &solids {
            let Some(ball_body) = state.registry.get(ball_id).and_then(Entity::body).copied() else {
                break;
            };
            let Some(solid) = state.registry.get(solid_id) else {
                continue;
            };
            let solid_tag = solid.tag();
            let Some(solid_body) = solid.body().copied() else {
                continue;
            };
            let Some(collision) = box_collision(&ball_body, &solid_body) else {
                continue;
            };

            touching.push((ball_id, solid_id));
            let entered = !state.contacts.contains(&(ball_id, solid_id));

            if let Some((ball, commands)) = state.registry.entity_and_commands(ball_id) {
                // Separate so the next tick starts clear of the solid
                if let Some(body) = ball.body_mut() {
                    body.top_left += collision.normal * collision.penetration;
                }
                if entered {
                    log::trace!("#{} hit {:?} #{}", ball_id, solid_tag, solid_id);
                    let mut ctx = FrameContext {
                        input,
                        commands,
                        events: &mut state.events,
                        dt,
                    };
                    let other = Collider {
                        id: solid_id,
                        tag: solid_tag,
                    };
                    ball.on_collision_enter(ball_id, other, &collision, &mut ctx);
                }
            }

            if !entered {
                continue;
            }
            if let Some((solid, commands)) = state.registry.entity_and_commands(solid_id) {
                let mut ctx = FrameContext {
                    input,
                    commands,
                    events: &mut state.events,
                    dt,
                };
                let other = Collider {
                    id: ball_id,
                    tag: Tag::Ball,
                };
                solid.on_collision_enter(solid_id, other, &collision.flipped(), &mut ctx);
            }
        }
    }

    state.contacts = touching;
    state.registry.flush();
}

/// Keep paddles between the side walls and drop pucks that fell out
fn check_bounds(state: &mut GameState) {
    let window = state.settings.window_size();
    let bottom = state.settings.bottom_bound();
    let mut fallen = Vec::new();

    for id in state.registry.update_order() {
        let Some(entity) = state.registry.get_mut(id) else {
            continue;
        };
        if entity.is_user_controlled() {
            if let Some(body) = entity.body_mut() {
                let max_x = (window.x - WALL_THICKNESS - body.size.x).max(WALL_THICKNESS);
                body.top_left.x = body.top_left.x.clamp(WALL_THICKNESS, max_x);
            }
        } else if id != state.main_ball
            && matches!(entity, Entity::Ball(_))
            && entity.body().is_some_and(|b| b.top_left.y > bottom)
        {
            fallen.push(id);
        }
    }

    for id in fallen {
        log::trace!("puck #{} fell out", id);
        state.registry.remove(id);
    }
}

/// Retire perk paddles once they have taken their last ball contact
fn check_perk_paddle_state(state: &mut GameState) {
    if state.perk_paddle_state.value() < PERK_PADDLE_EXPIRATION {
        return;
    }
    let perks = state
        .registry
        .ids_where(|e| matches!(e, Entity::PerkPaddle(_)));
    for id in &perks {
        state.registry.remove(*id);
    }
    state.perk_paddle_state.reset();
    state.events.push(GameEvent::PerkPaddleExpired);
    log::debug!("Perk paddle expired ({} removed)", perks.len());
}

/// Attach the follow camera when the switch turns on, detach it after the
/// main ball has struck enough bricks
fn check_camera_state(state: &mut GameState, window: &mut dyn Window) {
    let Some(hits) = state.main_ball().map(Ball::collision_counter) else {
        return;
    };

    match state.camera {
        CameraMode::Inactive => {
            if state.camera_switch.value() == CAMERA_ON {
                window.set_camera(Some(Camera::follow(
                    state.main_ball,
                    state.settings.window_size(),
                    CAMERA_ZOOM,
                )));
                state.camera = CameraMode::Following { start: hits };
                state.events.push(GameEvent::CameraAttached);
                log::info!("🎥 Camera following the ball (at {} hits)", hits);
            }
        }
        CameraMode::Following { start } => {
            // Reached or passed: several hits can land between two checks
            if hits.saturating_sub(start) >= CAMERA_FOLLOW_HITS {
                window.set_camera(None);
                state.camera = CameraMode::Inactive;
                state.camera_switch.decrement();
                state.events.push(GameEvent::CameraDetached);
                log::info!("Camera released after {} hits", hits - start);
            }
        }
    }
}

/// Lose a strike when the main ball drops out, win when every brick is gone.
/// If both happen in one tick the win decides the prompt.
fn check_for_game_end(
    state: &mut GameState,
    input: &TickInput,
    window: &mut dyn Window,
) -> TickOutcome {
    let mut ending = None;

    let bottom = state.settings.bottom_bound();
    if state.main_ball().is_some_and(|b| b.body.center().y > bottom) {
        state.strikes.decrement();
        let remaining = state.strikes.value();
        state.events.push(GameEvent::StrikeLost { remaining });
        log::info!("Ball lost, {} strikes left", remaining);

        if remaining <= 0 {
            ending = Some(Ending::Lost);
        } else {
            state.respawn_main_ball();
        }
    }

    if state.bricks_remaining.value() <= 0 || input.is_pressed(Key::DebugWin) {
        ending = Some(Ending::Won);
    }

    match ending {
        Some(ending) => end_game(state, window, ending),
        None => TickOutcome::Continue,
    }
}

/// Ask whether to play again and hand the answer to the window
fn end_game(state: &mut GameState, window: &mut dyn Window, ending: Ending) -> TickOutcome {
    state.phase = GamePhase::GameOver;
    state.events.push(match ending {
        Ending::Won => GameEvent::Won,
        Ending::Lost => GameEvent::Lost,
    });
    log::info!("Game over: {:?} after {} ticks", ending, state.time_ticks);

    if window.prompt_yes_no(ending.prompt()) {
        window.reset_session();
        TickOutcome::Reset
    } else {
        window.close_session();
        TickOutcome::Closed
    }
}
