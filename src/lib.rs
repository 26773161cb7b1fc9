//! Tank Arena - an arena tank-combat game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, enemy AI, bosses, collisions)
//! - `settings`: Session preferences loaded from disk
//!
//! Rendering, camera work and raw input capture live in the front end; this
//! crate only consumes the resulting input intents and exposes read-only
//! state for drawing.

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants shared across the simulation
pub mod consts {
    /// Nominal frame interval; every per-frame rate is scaled by `dt / 16ms`
    pub const FRAME_REF_MS: f32 = 16.0;

    /// Arena half-extent (the play field spans -GRID_HALF..GRID_HALF on both axes)
    pub const GRID_HALF: f32 = 600.0;
    /// Single constant used everywhere to make bullets disappear at the arena walls
    pub const BULLET_WALL_LIMIT: f32 = GRID_HALF - 8.0;

    /// Player movement
    pub const PLAYER_MAX_SPEED: f32 = 4.0;
    pub const PLAYER_ACCEL: f32 = 0.18;
    pub const PLAYER_DECEL: f32 = 0.22;
    pub const PLAYER_FRICTION: f32 = 0.08;
    pub const PLAYER_TURN_SPEED: f32 = 2.6;
    pub const PLAYER_STRAFE_SPEED: f32 = 3.0;
    /// Turret rotation per nominal frame, degrees
    pub const PLAYER_TURRET_RATE: f32 = 1.4;
    /// Hull keep-out margin from the arena edge
    pub const PLAYER_MARGIN: f32 = 50.0;
    /// Collision radius used against hostile bullets and the boss laser
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Enemy hits the player can absorb before the run ends
    pub const PLAYER_MAX_HITS: u32 = 10;

    /// Player projectile defaults
    pub const SHOT_SPEED: f32 = 12.0;
    pub const SHOT_TTL_MS: f32 = 3500.0;
    pub const SHOT_RADIUS: f32 = 4.0;
    /// Level 2 fires heavier, slower-cadence shells
    pub const SHOT_RADIUS_L2: f32 = 6.0;
    pub const FIRE_COOLDOWN_MS: f32 = 600.0;
    pub const FIRE_COOLDOWN_L2_MS: f32 = 800.0;
    /// Level 3 spread-fire offset, degrees either side of center
    pub const SHOT_SPREAD_DEG: f32 = 10.0;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_angle_deg(a: f32) -> f32 {
    (a + 180.0).rem_euclid(360.0) - 180.0
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_deg(a: f32) -> f32 {
    a.rem_euclid(360.0)
}

/// Unit vector for a heading in degrees (0 points along +X)
#[inline]
pub fn heading_vec(deg: f32) -> Vec2 {
    let r = deg.to_radians();
    Vec2::new(r.cos(), r.sin())
}

/// Heading in degrees from `from` toward `to`, in (-180, 180]
#[inline]
pub fn aim_deg(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}
