//! Miniboss controllers
//!
//! Three scripted opponents, one per level: a chaser with turret inertia, a
//! stationary sentinel with a damage aura, and a pair of pursuing clones.
//! Each owns its bullet pool on `GameState` and a `player_bullets_vs_*` pass
//! that reports when the boss dies so the tick can advance the level.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{circles_overlap, dist_sq};
use super::enemies::EN_HULL_W;
use super::projectile::step_hostile_bullets;
use super::state::{GameState, Projectile};
use crate::consts::*;
use crate::{aim_deg, heading_vec, normalize_angle_deg, wrap_deg};

const MB1_HULL_W: f32 = 64.0;
pub const MB1_HP: u32 = 10;
const MB1_SPEED: f32 = 0.6;
/// Turret re-centering rate, degrees per second
const MB1_TURN: f32 = 28.0;
const MB1_BULLET_SPEED: f32 = 10.0;
const MB1_FIRE_CD_MS: f32 = 900.0;
const MB1_BULLET_TTL_MS: f32 = 5200.0;
const MB1_BULLET_RADIUS: f32 = 4.5;
const MB1_MUZZLE: f32 = 50.0;
const MB1_HIT_RADIUS: f32 = MB1_HULL_W * 0.40 + 4.0;
const MB1_MARGIN: f32 = 60.0;
const MB1_SPAWN_MARGIN: f32 = 80.0;
const MB1_SPAWN_RINGS: [f32; 3] = [300.0, 360.0, 420.0];

const MB2_HULL_W: f32 = 64.0;
pub const MB2_HP: u32 = 5;
/// Player shots hit hard here: 2 points per confirmed hit
const MB2_HIT_DAMAGE: i32 = 2;
const MB2_FIRE_CD_MS: f32 = 1200.0;
const MB2_BULLET_SPEED: f32 = 18.0;
const MB2_BULLET_TTL_MS: f32 = 6000.0;
const MB2_BULLET_RADIUS: f32 = 5.0;
const MB2_MUZZLE: f32 = 52.0;
const MB2_HIT_RADIUS: f32 = MB2_HULL_W * 0.40 + 5.0;
pub const MB2_AURA_RADIUS: f32 = 120.0;
pub const MB2_AURA_TICK_MS: f32 = 1000.0;
const MB2_AURA_DAMAGE: u32 = 2;
/// Turret tracking rate, degrees per second
const MB2_TURRET_TURN: f32 = 24.0;
const MB2_CORNER_MARGIN: f32 = 80.0;

const MB3_HULL_W: f32 = 62.0;
pub const MB3_CLONE_HP: i32 = 3;
const MB3_SPEED: f32 = 0.55;
const MB3_BULLET_SPEED: f32 = 14.0;
const MB3_BULLET_TTL_MS: f32 = 5200.0;
const MB3_BULLET_RADIUS: f32 = 5.0;
const MB3_FIRE_CD_MS: f32 = 3000.0;
const MB3_SPREAD_DEG: f32 = 12.0;
const MB3_MUZZLE: f32 = 48.0;
const MB3_HIT_RADIUS: f32 = MB3_HULL_W * 0.40 + 5.0;
const MB3_SPAWN_RADIUS: f32 = 320.0;
const MB3_SPAWN_MARGIN: f32 = 80.0;
const MB3_MARGIN: f32 = 60.0;
const MB3_MIN_SEP: f32 = EN_HULL_W * 1.2;

/// Level-1 miniboss: chases the player head-on. The only entity with turret
/// inertia — its turret drifts back toward the hull at a bounded rate rather
/// than snapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Miniboss1 {
    pub pos: Vec2,
    pub heading: f32,
    pub turret: f32,
    pub hp: i32,
    pub fire_ms: f32,
    pub fire_cd_ms: f32,
    pub bullet_speed: f32,
    pub speed: f32,
    pub turn_speed: f32,
}

/// Level-2 miniboss: parked at the arena center, tracking turret, damage aura
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Miniboss2 {
    pub pos: Vec2,
    pub heading: f32,
    pub turret: f32,
    pub hp: i32,
    pub fire_ms: f32,
    pub aura_ms: f32,
}

/// One half of the level-3 twin pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneTank {
    pub pos: Vec2,
    pub heading: f32,
    pub hp: i32,
    pub fire_ms: f32,
    pub alive: bool,
}

/// Level-3 miniboss: defeated only when both clones are down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Miniboss3 {
    pub clones: [CloneTank; 2],
}

pub(crate) fn spawn_miniboss1(state: &mut GameState) {
    let player_pos = state.player.pos;
    let border = GRID_HALF - MB1_SPAWN_MARGIN;
    let mut pos = Vec2::ZERO;
    for _ in 0..20 {
        let r = MB1_SPAWN_RINGS[state.rng.random_range(0..MB1_SPAWN_RINGS.len())];
        let ang = state.rng.random_range(0.0..TAU);
        pos = player_pos + Vec2::new(ang.cos(), ang.sin()) * r;
        if pos.x.abs() <= border && pos.y.abs() <= border {
            break;
        }
    }
    state.miniboss1 = Some(Miniboss1 {
        pos,
        heading: aim_deg(pos, player_pos),
        turret: 0.0,
        hp: MB1_HP as i32,
        fire_ms: 0.0,
        fire_cd_ms: MB1_FIRE_CD_MS,
        bullet_speed: MB1_BULLET_SPEED,
        speed: MB1_SPEED,
        turn_speed: MB1_TURN,
    });
}

pub(crate) fn update_miniboss1(state: &mut GameState, dt_ms: f32) {
    let player_pos = state.player.pos;
    let scale = dt_ms / FRAME_REF_MS;
    let Some(mb) = state.miniboss1.as_mut() else {
        return;
    };

    mb.heading = aim_deg(mb.pos, player_pos);
    mb.pos += heading_vec(mb.heading) * (mb.speed * scale);
    let border = GRID_HALF - MB1_MARGIN;
    mb.pos.x = mb.pos.x.clamp(-border, border);
    mb.pos.y = mb.pos.y.clamp(-border, border);

    // Turret settles back onto the hull at a bounded rate
    let max_step = mb.turn_speed * (dt_ms / 1000.0);
    mb.turret += (0.0 - mb.turret).clamp(-max_step, max_step);

    mb.fire_ms += dt_ms;
    if mb.fire_ms >= mb.fire_cd_ms {
        mb.fire_ms = 0.0;
        let aim = mb.heading + mb.turret;
        let muzzle = mb.pos + heading_vec(aim) * MB1_MUZZLE;
        state.mb1_bullets.push(Projectile::aimed(
            muzzle,
            aim,
            mb.bullet_speed,
            MB1_BULLET_TTL_MS,
            MB1_BULLET_RADIUS,
        ));
    }

    let hits = step_hostile_bullets(&mut state.mb1_bullets, player_pos, state.invincible, dt_ms);
    state.damage_player(hits);
}

/// Player bullets vs the chaser; true once its health pool is empty
pub(crate) fn player_bullets_vs_mb1(state: &mut GameState) -> bool {
    let Some(mb) = state.miniboss1.as_mut() else {
        return false;
    };
    let mut dead = false;
    state.projectiles.retain(|p| {
        if dead {
            return true;
        }
        if dist_sq(p.pos, mb.pos) <= MB1_HIT_RADIUS * MB1_HIT_RADIUS {
            mb.hp -= 1;
            if mb.hp <= 0 {
                dead = true;
            }
            false
        } else {
            true
        }
    });
    mb.hp <= 0
}

/// Spawns the sentinel at the arena center and teleports the player to a
/// random corner facing it, guaranteeing opening distance
pub(crate) fn spawn_miniboss2(state: &mut GameState) {
    state.miniboss2 = Some(Miniboss2 {
        pos: Vec2::ZERO,
        heading: 0.0,
        turret: 0.0,
        hp: MB2_HP as i32,
        fire_ms: 0.0,
        aura_ms: 0.0,
    });
    let c = GRID_HALF - MB2_CORNER_MARGIN;
    let corners = [
        Vec2::new(-c, -c),
        Vec2::new(c, -c),
        Vec2::new(-c, c),
        Vec2::new(c, c),
    ];
    let corner = corners[state.rng.random_range(0..corners.len())];
    state.player.pos = corner;
    state.player.heading = wrap_deg(aim_deg(corner, Vec2::ZERO));
    state.player.turret = 0.0;
    state.blocked = false;
}

pub(crate) fn update_miniboss2(state: &mut GameState, dt_ms: f32) {
    let player_pos = state.player.pos;
    let invincible = state.invincible;
    let mut aura_hit = false;
    {
        let Some(mb) = state.miniboss2.as_mut() else {
            return;
        };

        // Rate-limited turret tracking along the shortest angular path
        let desired_world = aim_deg(mb.pos, player_pos);
        let desired_rel = normalize_angle_deg(desired_world - mb.heading);
        let max_step = MB2_TURRET_TURN * (dt_ms / 1000.0);
        mb.turret += normalize_angle_deg(desired_rel - mb.turret).clamp(-max_step, max_step);

        mb.fire_ms += dt_ms;
        if mb.fire_ms >= MB2_FIRE_CD_MS {
            mb.fire_ms = 0.0;
            let aim = mb.heading + mb.turret;
            let muzzle = mb.pos + heading_vec(aim) * MB2_MUZZLE;
            state.mb2_bullets.push(Projectile::aimed(
                muzzle,
                aim,
                MB2_BULLET_SPEED,
                MB2_BULLET_TTL_MS,
                MB2_BULLET_RADIUS,
            ));
        }

        // Aura: its own damage cadence, independent of any bullet
        if !invincible {
            mb.aura_ms += dt_ms;
            if dist_sq(player_pos, mb.pos) <= MB2_AURA_RADIUS * MB2_AURA_RADIUS {
                if mb.aura_ms >= MB2_AURA_TICK_MS {
                    mb.aura_ms = 0.0;
                    aura_hit = true;
                }
            } else {
                mb.aura_ms = 0.0;
            }
        }
    }
    if aura_hit {
        state.damage_player(MB2_AURA_DAMAGE);
    }

    let hits = step_hostile_bullets(&mut state.mb2_bullets, player_pos, invincible, dt_ms);
    state.damage_player(hits);
}

pub(crate) fn player_bullets_vs_mb2(state: &mut GameState) -> bool {
    let Some(mb) = state.miniboss2.as_mut() else {
        return false;
    };
    let mut dead = false;
    state.projectiles.retain(|p| {
        if dead {
            return true;
        }
        if dist_sq(p.pos, mb.pos) <= MB2_HIT_RADIUS * MB2_HIT_RADIUS {
            mb.hp -= MB2_HIT_DAMAGE;
            if mb.hp <= 0 {
                dead = true;
            }
            false
        } else {
            true
        }
    });
    mb.hp <= 0
}

/// Spawns the twins symmetric about the player at a fixed radius
pub(crate) fn spawn_miniboss3(state: &mut GameState) {
    let player_pos = state.player.pos;
    let base_ang = state.rng.random_range(0.0..TAU);
    let border = GRID_HALF - MB3_SPAWN_MARGIN;
    let clones = [base_ang, base_ang + std::f32::consts::PI].map(|ang| {
        let mut pos = player_pos + Vec2::new(ang.cos(), ang.sin()) * MB3_SPAWN_RADIUS;
        pos.x = pos.x.clamp(-border, border);
        pos.y = pos.y.clamp(-border, border);
        CloneTank {
            pos,
            heading: aim_deg(pos, player_pos),
            hp: MB3_CLONE_HP,
            fire_ms: 0.0,
            alive: true,
        }
    });
    state.miniboss3 = Some(Miniboss3 { clones });
}

pub(crate) fn update_miniboss3(state: &mut GameState, dt_ms: f32) {
    let player_pos = state.player.pos;
    let scale = dt_ms / FRAME_REF_MS;
    {
        let Some(mb) = state.miniboss3.as_mut() else {
            return;
        };

        for c in mb.clones.iter_mut().filter(|c| c.alive) {
            c.heading = aim_deg(c.pos, player_pos);
            c.pos += heading_vec(c.heading) * (MB3_SPEED * scale);
            let border = GRID_HALF - MB3_MARGIN;
            c.pos.x = c.pos.x.clamp(-border, border);
            c.pos.y = c.pos.y.clamp(-border, border);
        }

        // Single pairwise repulsion, only while both twins are up
        if mb.clones.iter().all(|c| c.alive) {
            let [c0, c1] = &mut mb.clones;
            let delta = c1.pos - c0.pos;
            let d2 = delta.length_squared();
            if d2 < MB3_MIN_SEP * MB3_MIN_SEP {
                let d = d2.sqrt().max(1e-3);
                let push = (MB3_MIN_SEP - d) * 0.5;
                let axis = delta / d;
                c0.pos -= axis * push;
                c1.pos += axis * push;
            }
        }

        for c in mb.clones.iter_mut().filter(|c| c.alive) {
            c.fire_ms += dt_ms;
            if c.fire_ms >= MB3_FIRE_CD_MS {
                c.fire_ms = 0.0;
                for offset in [0.0, MB3_SPREAD_DEG, -MB3_SPREAD_DEG] {
                    let aim = c.heading + offset;
                    let muzzle = c.pos + heading_vec(aim) * MB3_MUZZLE;
                    state.mb3_bullets.push(Projectile::aimed(
                        muzzle,
                        aim,
                        MB3_BULLET_SPEED,
                        MB3_BULLET_TTL_MS,
                        MB3_BULLET_RADIUS,
                    ));
                }
            }
        }
    }

    let hits = step_hostile_bullets(&mut state.mb3_bullets, player_pos, state.invincible, dt_ms);
    state.damage_player(hits);
}

/// Player bullets vs the twins: the first alive clone in iteration order
/// takes the hit, one target per bullet. True once both clones are dead.
pub(crate) fn player_bullets_vs_mb3(state: &mut GameState) -> bool {
    let Some(mb) = state.miniboss3.as_mut() else {
        return false;
    };
    state.projectiles.retain(|p| {
        for c in mb.clones.iter_mut() {
            if c.alive && dist_sq(p.pos, c.pos) <= MB3_HIT_RADIUS * MB3_HIT_RADIUS {
                c.hp -= 1;
                if c.hp <= 0 {
                    c.alive = false;
                }
                return false;
            }
        }
        true
    });
    mb.clones.iter().all(|c| !c.alive)
}

/// Aura overlap test, exposed for the HUD ring
pub fn in_aura(player_pos: Vec2, mb: &Miniboss2) -> bool {
    circles_overlap(player_pos, 0.0, mb.pos, MB2_AURA_RADIUS)
}
