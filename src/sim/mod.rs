//! Single-threaded combat simulation
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One `tick` per rendered frame, fed wall-clock `dt` in milliseconds
//! - Seeded RNG only
//! - Fixed update order (player, projectiles, squad, minibosses, boss,
//!   progression) so later steps observe earlier mutations in the same frame

pub mod boss;
pub mod collision;
pub mod enemies;
pub mod miniboss;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use boss::{BossPhase, FinalBoss, LaserBeam};
pub use collision::{circles_overlap, dist_sq, point_segment_dist_sq};
pub use enemies::BasicEnemy;
pub use miniboss::{CloneTank, Miniboss1, Miniboss2, Miniboss3};
pub use state::{GameState, Outcome, PlayerTank, Projectile};
pub use tick::{TickInput, tick};
