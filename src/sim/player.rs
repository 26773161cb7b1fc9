//! Player tank controller
//!
//! Integrates position, hull heading and turret angle from the held input
//! intents, with an asymmetric accelerate/decelerate model and multiplicative
//! friction. Movement locks while the squad has the player surrounded, and
//! after the run ends only the turret stays interactive.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;
use crate::{heading_vec, wrap_deg};

/// Commanded throttle per held key; the asymmetric model chases
/// `intent * max rate`, so these stay well below 1.0
const INTENT_FORWARD: f32 = 0.3;
const INTENT_TURN: f32 = 0.3;
const INTENT_STRAFE: f32 = 0.5;

/// Chase `target` with fast decel, slower accel
fn approach(current: f32, target: f32, accel: f32, decel: f32, scale: f32) -> f32 {
    if target.abs() > current.abs() {
        current + accel * scale * (target - current).signum()
    } else if current > target {
        (current - decel * scale).max(target)
    } else {
        (current + decel * scale).min(target)
    }
}

pub(crate) fn update(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let scale = dt_ms / FRAME_REF_MS;

    // Turret control stays live even in a terminal state
    let turret_step = PLAYER_TURRET_RATE * scale;
    if input.turret_left {
        state.player.turret = wrap_deg(state.player.turret + turret_step);
    }
    if input.turret_right {
        state.player.turret = wrap_deg(state.player.turret - turret_step);
    }
    if state.is_frozen() {
        return;
    }

    let mut forward = 0.0;
    let mut turn = 0.0;
    let mut strafe = 0.0;
    if input.forward {
        forward += INTENT_FORWARD;
    }
    if input.reverse {
        forward -= INTENT_FORWARD;
    }
    if input.turn_left {
        turn += INTENT_TURN;
    }
    if input.turn_right {
        turn -= INTENT_TURN;
    }
    if input.strafe_left {
        strafe += INTENT_STRAFE;
    }
    if input.strafe_right {
        strafe -= INTENT_STRAFE;
    }

    let friction = (1.0 - PLAYER_FRICTION).powf(scale);
    if state.blocked {
        // Surrounded: drive intents are ignored, momentum bleeds off
        forward = 0.0;
        strafe = 0.0;
        state.player.velocity *= friction;
        state.player.strafe_velocity *= friction;
    }

    let target_speed = PLAYER_MAX_SPEED * forward;
    state.player.velocity = approach(
        state.player.velocity,
        target_speed,
        PLAYER_ACCEL,
        PLAYER_DECEL,
        scale,
    );
    if forward == 0.0 {
        state.player.velocity *= friction;
    }

    let target_strafe = PLAYER_STRAFE_SPEED * strafe;
    state.player.strafe_velocity = approach(
        state.player.strafe_velocity,
        target_strafe,
        PLAYER_ACCEL,
        PLAYER_DECEL,
        scale,
    );
    if strafe == 0.0 {
        state.player.strafe_velocity *= friction;
    }

    let fwd = heading_vec(state.player.heading) * state.player.velocity;
    let side = heading_vec(state.player.heading + 90.0) * state.player.strafe_velocity;
    state.player.pos += (fwd + side) * scale;
    state.player.heading = wrap_deg(state.player.heading + turn * PLAYER_TURN_SPEED * scale);

    let border = GRID_HALF - PLAYER_MARGIN;
    state.player.pos.x = state.player.pos.x.clamp(-border, border);
    state.player.pos.y = state.player.pos.y.clamp(-border, border);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn held_forward() -> TickInput {
        TickInput {
            forward: true,
            ..TickInput::default()
        }
    }

    #[test]
    fn accelerates_toward_commanded_speed() {
        let mut state = GameState::new(1);
        let input = held_forward();
        update(&mut state, &input, 16.0);
        assert!(state.player.velocity > 0.0);
        let v1 = state.player.velocity;
        for _ in 0..200 {
            update(&mut state, &input, 16.0);
        }
        // Settles at max_speed * intent, never above
        let target = PLAYER_MAX_SPEED * INTENT_FORWARD;
        assert!(state.player.velocity > v1);
        assert!(state.player.velocity <= target + 1e-3);
        assert!(state.player.pos.x > 0.0);
    }

    #[test]
    fn friction_bleeds_speed_when_idle() {
        let mut state = GameState::new(1);
        state.player.velocity = 2.0;
        update(&mut state, &TickInput::default(), 16.0);
        assert!(state.player.velocity < 2.0);
        for _ in 0..400 {
            update(&mut state, &TickInput::default(), 16.0);
        }
        assert!(state.player.velocity.abs() < 1e-3);
    }

    #[test]
    fn heading_integrates_and_wraps() {
        let mut state = GameState::new(1);
        let input = TickInput {
            turn_left: true,
            ..TickInput::default()
        };
        for _ in 0..500 {
            update(&mut state, &input, 16.0);
        }
        assert!(state.player.heading >= 0.0 && state.player.heading < 360.0);
    }

    #[test]
    fn blocked_ignores_drive_intents() {
        let mut state = GameState::new(1);
        state.blocked = true;
        state.player.velocity = 3.0;
        let input = held_forward();
        update(&mut state, &input, 16.0);
        // No acceleration while surrounded, velocity only decays
        assert!(state.player.velocity < 3.0);
        // Heading control stays free
        let mut turning = input;
        turning.turn_left = true;
        let before = state.player.heading;
        update(&mut state, &turning, 16.0);
        assert!(state.player.heading != before);
    }

    #[test]
    fn frozen_allows_only_turret() {
        let mut state = GameState::new(1);
        state.outcome = Some(super::super::state::Outcome::Defeat);
        state.player.velocity = 2.0;
        let input = TickInput {
            forward: true,
            turret_left: true,
            ..TickInput::default()
        };
        let pos = state.player.pos;
        update(&mut state, &input, 16.0);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.player.velocity, 2.0);
        assert!(state.player.turret > 0.0);
    }

    #[test]
    fn position_clamped_to_arena() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(GRID_HALF, GRID_HALF);
        update(&mut state, &TickInput::default(), 16.0);
        let border = GRID_HALF - PLAYER_MARGIN;
        assert!(state.player.pos.x <= border);
        assert!(state.player.pos.y <= border);
    }

    #[test]
    fn strafe_displaces_sideways() {
        let mut state = GameState::new(1);
        let input = TickInput {
            strafe_left: true,
            ..TickInput::default()
        };
        for _ in 0..20 {
            update(&mut state, &input, 16.0);
        }
        // Heading 0 -> strafe axis is +Y
        assert!(state.player.pos.y > 0.0);
        assert!(state.player.pos.x.abs() < 1e-3);
    }
}
