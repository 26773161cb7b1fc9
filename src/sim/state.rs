//! Game state and core simulation types
//!
//! Every entity record and the single `GameState` aggregate live here; the
//! per-component step functions in the sibling modules mutate it in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::FinalBoss;
use super::enemies::{self, BasicEnemy};
use super::miniboss::{Miniboss1, Miniboss2, Miniboss3};
use crate::consts::*;
use crate::{heading_vec, wrap_deg};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Hit cap reached by enemy fire
    Defeat,
    /// Caught in the final boss laser
    DefeatByLaser,
    /// Final boss destroyed
    Victory,
}

/// The player's tank
///
/// Headings are degrees (0 points along +X); the turret angle is relative to
/// the hull and kept in [0, 360).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTank {
    pub pos: Vec2,
    pub heading: f32,
    pub turret: f32,
    /// Forward velocity, units per nominal frame
    pub velocity: f32,
    /// Sideways velocity along heading+90°
    pub strafe_velocity: f32,
}

impl Default for PlayerTank {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            heading: 0.0,
            turret: 0.0,
            velocity: 0.0,
            strafe_velocity: 0.0,
        }
    }
}

impl PlayerTank {
    /// World-space aim of hull + turret
    pub fn aim(&self) -> f32 {
        wrap_deg(self.heading + self.turret)
    }
}

/// A bullet, whoever fired it
///
/// Created by its owner's fire routine; destroyed on wall exit, ttl expiry,
/// or a confirmed hit. The radius is the collision radius, not a sprite size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub ttl_ms: f32,
    pub radius: f32,
}

impl Projectile {
    /// Spawn a bullet at `pos` flying along `deg`
    pub fn aimed(pos: Vec2, deg: f32, speed: f32, ttl_ms: f32, radius: f32) -> Self {
        Self {
            pos,
            vel: heading_vec(deg) * speed,
            ttl_ms,
            radius,
        }
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state
///
/// Owned exclusively by the driver; the tick pipeline is the single writer.
/// Boss slots are `Option` — spawn and despawn are explicit construct/destroy
/// operations, never a dangling record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    /// Accumulated simulation clock, ms
    pub time_ms: f32,
    /// Level index 1-4. Doubles as the displayed label; `set_level` changes
    /// only this, never wave or boss state.
    pub level: u8,

    pub player: PlayerTank,
    pub hits_taken: u32,
    pub outcome: Option<Outcome>,
    /// True while the squad surrounds the player; recomputed every frame
    pub blocked: bool,
    /// Cheat: suppresses all damage and the fire cooldown
    pub invincible: bool,
    pub last_fire_ms: f32,
    pub projectiles: Vec<Projectile>,

    pub enemies: Vec<BasicEnemy>,
    pub enemy_bullets: Vec<Projectile>,
    /// Shared fire accumulator for the squad's lone-shooter policy
    pub enemy_fire_ms: f32,
    pub basic_kills: u32,

    pub miniboss1: Option<Miniboss1>,
    pub mb1_bullets: Vec<Projectile>,
    pub miniboss2: Option<Miniboss2>,
    pub mb2_bullets: Vec<Projectile>,
    pub mb2_spawned: bool,
    pub miniboss3: Option<Miniboss3>,
    pub mb3_bullets: Vec<Projectile>,
    pub mb3_spawned: bool,
    pub boss: Option<FinalBoss>,
    pub boss_bullets: Vec<Projectile>,
    pub boss_spawned: bool,

    pub level1_banner_ms: f32,
    pub level2_banner_ms: f32,
    pub final_boss_banner_ms: f32,
}

impl GameState {
    /// Create a fresh run: level 1, first wave spawned, player at the center
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ms: 0.0,
            level: 1,
            player: PlayerTank::default(),
            hits_taken: 0,
            outcome: None,
            blocked: false,
            invincible: false,
            last_fire_ms: f32::MIN,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            enemy_fire_ms: 0.0,
            basic_kills: 0,
            miniboss1: None,
            mb1_bullets: Vec::new(),
            miniboss2: None,
            mb2_bullets: Vec::new(),
            mb2_spawned: false,
            miniboss3: None,
            mb3_bullets: Vec::new(),
            mb3_spawned: false,
            boss: None,
            boss_bullets: Vec::new(),
            boss_spawned: false,
            level1_banner_ms: 0.0,
            level2_banner_ms: 0.0,
            final_boss_banner_ms: 0.0,
        };
        enemies::spawn_first_wave(&mut state);
        state
    }

    /// Hard reset: back to a fresh level-1 run on the same seed
    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    /// True once the run has ended either way; the pipeline short-circuits
    pub fn is_frozen(&self) -> bool {
        self.outcome.is_some()
    }

    /// Jump the level label. Clamped to 1-4; waves and bosses are untouched,
    /// which is intended for quick testing rather than a real level reset.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.clamp(1, 4);
    }

    /// Toggle the invincibility cheat. Enabling it mid-defeat revives the run.
    pub fn toggle_cheat(&mut self) {
        self.invincible = !self.invincible;
        if self.invincible && self.outcome.is_some() {
            self.outcome = None;
            self.hits_taken = 0;
        }
    }

    /// Apply enemy damage to the player; the loss flag latches exactly when
    /// the counter first reaches the cap
    pub fn damage_player(&mut self, amount: u32) {
        if self.invincible || amount == 0 {
            return;
        }
        self.hits_taken += amount;
        if self.hits_taken >= PLAYER_MAX_HITS && self.outcome.is_none() {
            self.outcome = Some(Outcome::Defeat);
        }
    }

    /// Instant defeat from the boss laser
    pub fn kill_by_laser(&mut self) {
        if self.invincible || self.outcome.is_some() {
            return;
        }
        self.hits_taken = PLAYER_MAX_HITS;
        self.outcome = Some(Outcome::DefeatByLaser);
    }

    /// HUD label for the current level
    pub fn level_label(&self) -> String {
        format!("Level {}", self.level)
    }

    /// Movement status shown on the HUD
    pub fn status_label(&self) -> &'static str {
        if self.blocked { "BLOCKED" } else { "FREE" }
    }

    /// Center-screen banner, highest priority first
    pub fn banner(&self) -> Option<&'static str> {
        match self.outcome {
            Some(Outcome::Victory) => return Some("YOU WON!!"),
            Some(Outcome::DefeatByLaser) => return Some("GAME OVER - INCINERATED"),
            Some(Outcome::Defeat) => return Some("GAME OVER"),
            None => {}
        }
        if self.final_boss_banner_ms > 0.0 {
            Some("FINAL BOSS")
        } else if self.level1_banner_ms > 0.0 {
            Some("Level 1 completed")
        } else if self.level2_banner_ms > 0.0 {
            Some("Level 2 completed!")
        } else {
            None
        }
    }

    /// (current, max) health of the boss active on the current level
    pub fn boss_health(&self) -> Option<(u32, u32)> {
        use super::{boss, miniboss};
        match self.level {
            1 => self
                .miniboss1
                .as_ref()
                .map(|b| (b.hp.max(0) as u32, miniboss::MB1_HP)),
            2 => self
                .miniboss2
                .as_ref()
                .map(|b| (b.hp.max(0) as u32, miniboss::MB2_HP)),
            3 => self.miniboss3.as_ref().map(|b| {
                let hp: i32 = b.clones.iter().filter(|c| c.alive).map(|c| c.hp.max(0)).sum();
                (hp as u32, miniboss::MB3_CLONE_HP as u32 * 2)
            }),
            4 => self
                .boss
                .as_ref()
                .map(|b| (b.hp.max(0) as u32, boss::FB_HP)),
            _ => None,
        }
    }
}
