//! Player projectiles and shared bullet stepping
//!
//! `try_fire` owns the cooldown and the level-3 spread; the step helpers here
//! advance any bullet pool and handle ttl/wall expiry. Confirmed hits are
//! resolved by the owning entity's collision pass, never here.

use glam::Vec2;

use super::collision::circles_overlap;
use super::state::{GameState, Projectile};
use crate::consts::*;
use crate::heading_vec;

/// Forward displacement of a fresh shot so it clears the firing hull
const MUZZLE_OFFSET: f32 = 12.0;
/// Extra nudge along the velocity vector at spawn
const MUZZLE_NUDGE: f32 = 0.08;

/// Fire if the cooldown allows it. Level 2 slows the cadence but fires
/// heavier shells; level 3 fires a three-way spread; the cheat removes the
/// cooldown entirely.
pub fn try_fire(state: &mut GameState) {
    if state.is_frozen() {
        return;
    }
    let cooldown = if state.invincible {
        0.0
    } else if state.level == 2 {
        FIRE_COOLDOWN_L2_MS
    } else {
        FIRE_COOLDOWN_MS
    };
    if state.time_ms - state.last_fire_ms < cooldown {
        return;
    }
    state.last_fire_ms = state.time_ms;

    let origin = state.player.pos + heading_vec(state.player.heading) * MUZZLE_OFFSET;
    let aim = state.player.aim();
    let radius = if state.level == 2 { SHOT_RADIUS_L2 } else { SHOT_RADIUS };

    let spreads: &[f32] = if state.level == 3 {
        &[0.0, SHOT_SPREAD_DEG, -SHOT_SPREAD_DEG]
    } else {
        &[0.0]
    };
    for &offset in spreads {
        let mut shot = Projectile::aimed(origin, aim + offset, SHOT_SPEED, SHOT_TTL_MS, radius);
        shot.pos += shot.vel * MUZZLE_NUDGE;
        state.projectiles.push(shot);
    }
}

/// Advance the player's bullets; drop ttl expiries and wall exits
pub(crate) fn update(state: &mut GameState, dt_ms: f32) {
    step_bullets(&mut state.projectiles, dt_ms);
}

/// Advance a bullet pool by `vel * dt/16`, expiring on ttl or the wall limit
pub(crate) fn step_bullets(bullets: &mut Vec<Projectile>, dt_ms: f32) {
    let scale = dt_ms / FRAME_REF_MS;
    bullets.retain_mut(|b| {
        b.pos += b.vel * scale;
        b.ttl_ms -= dt_ms;
        b.ttl_ms > 0.0
            && b.pos.x.abs() < BULLET_WALL_LIMIT
            && b.pos.y.abs() < BULLET_WALL_LIMIT
    });
}

/// Advance a hostile bullet pool and count confirmed hits on the player.
/// A hit consumes the bullet; while invincible, bullets fly straight through.
pub(crate) fn step_hostile_bullets(
    bullets: &mut Vec<Projectile>,
    player_pos: Vec2,
    invincible: bool,
    dt_ms: f32,
) -> u32 {
    let scale = dt_ms / FRAME_REF_MS;
    let mut hits = 0;
    bullets.retain_mut(|b| {
        b.pos += b.vel * scale;
        b.ttl_ms -= dt_ms;
        let out = b.ttl_ms <= 0.0
            || b.pos.x.abs() >= BULLET_WALL_LIMIT
            || b.pos.y.abs() >= BULLET_WALL_LIMIT;
        if out {
            return false;
        }
        if !invincible && circles_overlap(b.pos, b.radius, player_pos, PLAYER_RADIUS) {
            hits += 1;
            return false;
        }
        true
    });
    hits
}
