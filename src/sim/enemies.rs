//! Basic enemy squad AI
//!
//! Each light tank chases the player onto a standoff ring, the squad keeps a
//! minimum mutual separation, and at most one squad bullet is ever in flight:
//! a shared cadence accumulator picks one random shooter whenever the pool is
//! empty. The squad is also what can surround the player — four occupied
//! quadrants inside the crowd radius lock the player's drive controls.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::dist_sq;
use super::projectile;
use super::state::{GameState, Projectile};
use crate::consts::*;
use crate::{aim_deg, heading_vec};

pub(crate) const EN_HULL_W: f32 = 52.0;
pub(crate) const EN_SPEED: f32 = 1.0;
pub(crate) const EN_SPEED_SLOW: f32 = 0.45;
/// Minimum distance between alive squad members after the separation pass
pub const MIN_SEP: f32 = 46.0;
pub const EN_STANDOFF_R: f32 = 140.0;
pub const STANDOFF_DEADBAND: f32 = 8.0;
/// Fraction of forward speed used when backing off the ring
const RETREAT_FRACTION: f32 = 0.45;
/// Detection radius for the surrounded check
pub const CROWD_RADIUS: f32 = 150.0;
const EN_BULLET_SPEED: f32 = 7.0;
const EN_BULLET_TTL_MS: f32 = 4200.0;
const EN_BULLET_RADIUS: f32 = 4.0;
const EN_FIRE_CD_MS: f32 = 1800.0;
const EN_FIRE_CD_L3_MS: f32 = 1000.0;
/// Barrel length plus clearance
const EN_MUZZLE: f32 = 40.0;
const EN_HIT_RADIUS: f32 = EN_HULL_W * 0.35 + 4.0;
const EN_MARGIN: f32 = 50.0;

pub(crate) const WAVE2_COUNT: usize = 7;
pub(crate) const WAVE2_RING: f32 = GRID_HALF - 140.0;
pub(crate) const WAVE3_COUNT: usize = 10;
pub(crate) const WAVE3_RING: f32 = GRID_HALF - 150.0;

/// A light tank of the wave. Dead records persist until the next wave
/// replaces the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicEnemy {
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub alive: bool,
}

/// Level-1 wave: five tanks at fixed posts near the walls
pub(crate) fn spawn_first_wave(state: &mut GameState) {
    state.enemies.clear();
    state.enemy_bullets.clear();
    state.basic_kills = 0;
    let s = GRID_HALF - 120.0;
    let spots = [
        (-s, 0.0),
        (s, 0.0),
        (0.0, -s),
        (0.0, s),
        (-0.7 * s, 0.7 * s),
    ];
    for (x, y) in spots {
        state.enemies.push(BasicEnemy {
            pos: Vec2::new(x, y),
            heading: 0.0,
            speed: EN_SPEED,
            alive: true,
        });
    }
}

/// Later waves: an evenly spaced ring around the arena center
pub(crate) fn spawn_ring_wave(state: &mut GameState, count: usize, ring_r: f32, speed: f32) {
    state.enemies.clear();
    state.enemy_bullets.clear();
    state.basic_kills = 0;
    for i in 0..count {
        let ang = TAU * (i as f32 / count as f32);
        state.enemies.push(BasicEnemy {
            pos: Vec2::new(ang.cos(), ang.sin()) * ring_r,
            heading: 0.0,
            speed,
            alive: true,
        });
    }
}

pub(crate) fn alive_count(state: &GameState) -> usize {
    state.enemies.iter().filter(|e| e.alive).count()
}

pub(crate) fn update(state: &mut GameState, dt_ms: f32) {
    let scale = dt_ms / FRAME_REF_MS;
    let player_pos = state.player.pos;

    // Pure pursuit onto the standoff ring; hold inside the deadband
    for e in state.enemies.iter_mut().filter(|e| e.alive) {
        e.heading = aim_deg(e.pos, player_pos);
        let d = e.pos.distance(player_pos);
        let step = e.speed * scale;
        if d > EN_STANDOFF_R + STANDOFF_DEADBAND {
            e.pos += heading_vec(e.heading) * step;
        } else if d < EN_STANDOFF_R - STANDOFF_DEADBAND {
            e.pos -= heading_vec(e.heading) * (RETREAT_FRACTION * step);
        }
        let border = GRID_HALF - EN_MARGIN;
        e.pos.x = e.pos.x.clamp(-border, border);
        e.pos.y = e.pos.y.clamp(-border, border);
    }

    separate(&mut state.enemies, &mut state.rng);

    // Lone-shooter policy: one bullet in flight at a time, random shooter
    let cadence = if state.level == 3 {
        EN_FIRE_CD_L3_MS
    } else {
        EN_FIRE_CD_MS
    };
    state.enemy_fire_ms += dt_ms;
    if state.enemy_fire_ms >= cadence && state.enemy_bullets.is_empty() {
        state.enemy_fire_ms = 0.0;
        let shooters: Vec<usize> = state
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .map(|(i, _)| i)
            .collect();
        if !shooters.is_empty() {
            let e = &state.enemies[shooters[state.rng.random_range(0..shooters.len())]];
            let muzzle = e.pos + heading_vec(e.heading) * EN_MUZZLE;
            state.enemy_bullets.push(Projectile::aimed(
                muzzle,
                e.heading,
                EN_BULLET_SPEED,
                EN_BULLET_TTL_MS,
                EN_BULLET_RADIUS,
            ));
        }
    }

    let hits = projectile::step_hostile_bullets(
        &mut state.enemy_bullets,
        player_pos,
        state.invincible,
        dt_ms,
    );
    state.damage_player(hits);

    // Player bullets vs the squad: first alive match dies, bullet consumed
    let enemies = &mut state.enemies;
    let mut kills = 0;
    state.projectiles.retain(|p| {
        for e in enemies.iter_mut() {
            if e.alive && dist_sq(p.pos, e.pos) <= EN_HIT_RADIUS * EN_HIT_RADIUS {
                e.alive = false;
                kills += 1;
                return false;
            }
        }
        true
    });
    state.basic_kills += kills;

    check_surrounded(state);
}

/// Pairwise repulsion: push any two alive tanks closer than `MIN_SEP` apart
/// along their connecting axis, split evenly. A coincident pair gets a random
/// push direction.
pub(crate) fn separate(enemies: &mut [BasicEnemy], rng: &mut Pcg32) {
    let n = enemies.len();
    for i in 0..n {
        if !enemies[i].alive {
            continue;
        }
        for j in i + 1..n {
            if !enemies[j].alive {
                continue;
            }
            let delta = enemies[j].pos - enemies[i].pos;
            let d2 = delta.length_squared();
            if d2 <= 1e-6 {
                let ang = rng.random_range(0.0..TAU);
                let push = Vec2::new(ang.cos(), ang.sin()) * (MIN_SEP * 0.5);
                enemies[i].pos -= push;
                enemies[j].pos += push;
                continue;
            }
            let d = d2.sqrt();
            if d < MIN_SEP {
                let need = (MIN_SEP - d) * 0.5;
                let axis = delta / d;
                enemies[j].pos += axis * need;
                enemies[i].pos -= axis * need;
            }
        }
    }
}

/// Surrounded iff all four 90° quadrants around the player hold an alive
/// tank inside the crowd radius. Recomputed fresh every frame and always
/// clear in a terminal state.
fn check_surrounded(state: &mut GameState) {
    if state.is_frozen() {
        state.blocked = false;
        return;
    }
    let mut quads = [false; 4];
    for e in state.enemies.iter().filter(|e| e.alive) {
        if dist_sq(e.pos, state.player.pos) <= CROWD_RADIUS * CROWD_RADIUS {
            let ang = aim_deg(state.player.pos, e.pos);
            if (-45.0..45.0).contains(&ang) {
                quads[0] = true;
            } else if (45.0..135.0).contains(&ang) {
                quads[1] = true;
            } else if ang > -135.0 && ang < -45.0 {
                quads[2] = true;
            } else {
                quads[3] = true;
            }
        }
    }
    state.blocked = quads.iter().all(|&q| q);
}
