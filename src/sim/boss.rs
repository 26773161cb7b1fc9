//! Final boss: a three-phase attack cycle
//!
//! Burst (4-bullet fan on entry, keeps a wide standoff ring) → Pause (holds
//! still) → Laser (a wall-to-wall beam frozen at phase entry) → back to
//! Burst. Phase entry effects happen exactly once, at the transition: the fan
//! on entering Burst, the raycast on entering Laser.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{dist_sq, point_segment_dist_sq};
use super::projectile::step_hostile_bullets;
use super::state::{GameState, Projectile};
use crate::consts::*;
use crate::{aim_deg, heading_vec};

const FB_HULL_W: f32 = 110.0;
pub const FB_HP: u32 = 20;
const FB_SPEED: f32 = 0.48;
const FB_STANDOFF_R: f32 = 220.0;
const FB_STANDOFF_DB: f32 = 12.0;
/// Back-off uses a softer fraction of the chase step
const FB_RETREAT_FRACTION: f32 = 0.6;
const FB_BULLET_SPEED: f32 = 18.0;
const FB_BULLET_TTL_MS: f32 = 6500.0;
const FB_BULLET_RADIUS: f32 = 6.0;
const FB_VOLLEY_SPREADS: [f32; 4] = [-18.0, -6.0, 6.0, 18.0];
const FB_MUZZLE: f32 = 74.0;
const FB_BURST_MS: f32 = 2500.0;
const FB_PAUSE_MS: f32 = 1000.0;
const FB_LASER_MS: f32 = 1000.0;
/// Fallback beam length when the ray leaves no wall crossing
const FB_LASER_LEN: f32 = 1400.0;
const FB_LASER_HIT_RADIUS: f32 = 14.0;
const FB_HIT_RADIUS: f32 = FB_HULL_W * 0.45 + 6.0;
const FB_MARGIN: f32 = 70.0;
const FB_SPAWN_MARGIN: f32 = 80.0;

/// Attack cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    Burst,
    Pause,
    Laser,
}

/// The laser segment, fixed for the whole Laser phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaserBeam {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalBoss {
    pub pos: Vec2,
    pub heading: f32,
    pub hp: i32,
    pub phase: BossPhase,
    pub phase_ms: f32,
    /// Present only during the Laser phase
    pub laser: Option<LaserBeam>,
}

pub(crate) fn spawn_final_boss(state: &mut GameState) {
    let player_pos = state.player.pos;
    let r = GRID_HALF - 180.0;
    let ang = state.rng.random_range(0.0..TAU);
    let border = GRID_HALF - FB_SPAWN_MARGIN;
    let pos = Vec2::new(
        (ang.cos() * r).clamp(-border, border),
        (ang.sin() * r).clamp(-border, border),
    );
    let boss = FinalBoss {
        pos,
        heading: aim_deg(pos, player_pos),
        hp: FB_HP as i32,
        phase: BossPhase::Burst,
        phase_ms: 0.0,
        laser: None,
    };
    // Burst entry effect fires immediately on spawn
    fire_volley(&boss, &mut state.boss_bullets);
    state.boss = Some(boss);
}

fn fire_volley(boss: &FinalBoss, bullets: &mut Vec<Projectile>) {
    for offset in FB_VOLLEY_SPREADS {
        let aim = boss.heading + offset;
        let muzzle = boss.pos + heading_vec(aim) * FB_MUZZLE;
        bullets.push(Projectile::aimed(
            muzzle,
            aim,
            FB_BULLET_SPEED,
            FB_BULLET_TTL_MS,
            FB_BULLET_RADIUS,
        ));
    }
}

/// Smallest positive parametric distance at which a ray from `origin` along
/// `deg` exits the square arena, or the fixed fallback length
fn laser_endpoint(origin: Vec2, deg: f32) -> Vec2 {
    let dir = heading_vec(deg);
    let mut t_min = f32::INFINITY;
    if dir.x.abs() > 1e-6 {
        for wall in [GRID_HALF, -GRID_HALF] {
            let t = (wall - origin.x) / dir.x;
            if t > 0.0 {
                t_min = t_min.min(t);
            }
        }
    }
    if dir.y.abs() > 1e-6 {
        for wall in [GRID_HALF, -GRID_HALF] {
            let t = (wall - origin.y) / dir.y;
            if t > 0.0 {
                t_min = t_min.min(t);
            }
        }
    }
    if t_min.is_finite() {
        origin + dir * t_min
    } else {
        origin + dir * FB_LASER_LEN
    }
}

fn move_toward_standoff(boss: &mut FinalBoss, player_pos: Vec2, dt_ms: f32) {
    boss.heading = aim_deg(boss.pos, player_pos);
    let d = boss.pos.distance(player_pos);
    let step = FB_SPEED * (dt_ms / FRAME_REF_MS);
    if d > FB_STANDOFF_R + FB_STANDOFF_DB {
        boss.pos += heading_vec(boss.heading) * step;
    } else if d < FB_STANDOFF_R - FB_STANDOFF_DB {
        boss.pos -= heading_vec(boss.heading) * (FB_RETREAT_FRACTION * step);
    }
    let border = GRID_HALF - FB_MARGIN;
    boss.pos.x = boss.pos.x.clamp(-border, border);
    boss.pos.y = boss.pos.y.clamp(-border, border);
}

pub(crate) fn update_final_boss(state: &mut GameState, dt_ms: f32) {
    let player_pos = state.player.pos;
    let mut lasered = false;
    {
        let Some(boss) = state.boss.as_mut() else {
            return;
        };
        boss.phase_ms += dt_ms;
        match boss.phase {
            BossPhase::Burst => {
                move_toward_standoff(boss, player_pos, dt_ms);
                if boss.phase_ms >= FB_BURST_MS {
                    boss.phase = BossPhase::Pause;
                    boss.phase_ms = 0.0;
                }
            }
            BossPhase::Pause => {
                if boss.phase_ms >= FB_PAUSE_MS {
                    boss.phase = BossPhase::Laser;
                    boss.phase_ms = 0.0;
                    boss.laser = Some(LaserBeam {
                        start: boss.pos,
                        end: laser_endpoint(boss.pos, boss.heading),
                    });
                }
            }
            BossPhase::Laser => {
                if let Some(beam) = boss.laser {
                    let d2 = point_segment_dist_sq(player_pos, beam.start, beam.end);
                    if d2 <= FB_LASER_HIT_RADIUS * FB_LASER_HIT_RADIUS {
                        lasered = true;
                    }
                }
                if boss.phase_ms >= FB_LASER_MS {
                    boss.phase = BossPhase::Burst;
                    boss.phase_ms = 0.0;
                    boss.laser = None;
                    // Burst entry effect: the fan fires at the transition
                    fire_volley(boss, &mut state.boss_bullets);
                }
            }
        }
    }
    if lasered {
        state.kill_by_laser();
    }

    let hits = step_hostile_bullets(&mut state.boss_bullets, player_pos, state.invincible, dt_ms);
    state.damage_player(hits);
}

/// Player bullets vs the boss hull; damage lands in every phase
pub(crate) fn player_bullets_vs_boss(state: &mut GameState) -> bool {
    let Some(boss) = state.boss.as_mut() else {
        return false;
    };
    let mut dead = false;
    state.projectiles.retain(|p| {
        if dead {
            return true;
        }
        if dist_sq(p.pos, boss.pos) <= FB_HIT_RADIUS * FB_HIT_RADIUS {
            boss.hp -= 1;
            if boss.hp <= 0 {
                dead = true;
            }
            false
        } else {
            true
        }
    });
    boss.hp <= 0
}
