//! Per-frame simulation step
//!
//! One `tick` per rendered frame, fed the measured wall-clock `dt` in
//! milliseconds. The order is fixed and significant: player motion, player
//! projectiles, the basic squad (with its collisions), each miniboss in level
//! order, then the final boss, then progression bookkeeping — later steps see
//! the post-mutation state of earlier ones within the same frame.

use log::info;

use super::state::{GameState, Outcome};
use super::{boss, enemies, miniboss, player, projectile};

/// Input intents for a single tick
///
/// The held flags mirror keys currently down; the rest are edge-triggered
/// actions. Raw event capture happens in the front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub forward: bool,
    pub reverse: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turret_left: bool,
    pub turret_right: bool,
    /// Fire the main gun (subject to the cooldown)
    pub fire: bool,
    /// Toggle invincibility + zero cooldown
    pub toggle_cheat: bool,
    /// Hard reset back to level 1
    pub reset: bool,
    /// Jump the level label (clamped 1-4, waves untouched)
    pub set_level: Option<u8>,
}

/// Advance the whole simulation by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if input.reset {
        state.reset();
        info!("hard reset (seed {})", state.seed);
    }
    if input.toggle_cheat {
        state.toggle_cheat();
        info!("cheat {}", if state.invincible { "on" } else { "off" });
    }
    if let Some(level) = input.set_level {
        state.set_level(level);
    }

    state.time_ms += dt_ms;

    // Terminal states freeze everything below; the player update keeps the
    // turret interactive and returns early on its own.
    player::update(state, input, dt_ms);
    if state.is_frozen() {
        return;
    }

    if input.fire {
        projectile::try_fire(state);
    }
    projectile::update(state, dt_ms);

    enemies::update(state, dt_ms);

    // Level 1: the chaser arrives once the opening wave is down
    if state.level == 1 && state.basic_kills >= 5 && state.miniboss1.is_none() {
        miniboss::spawn_miniboss1(state);
        info!("miniboss 1 spawned");
    }
    miniboss::update_miniboss1(state, dt_ms);
    if miniboss::player_bullets_vs_mb1(state) {
        state.miniboss1 = None;
        state.mb1_bullets.clear();
        state.level1_banner_ms = 2200.0;
        state.set_level(2);
        state.mb2_spawned = false;
        enemies::spawn_ring_wave(state, enemies::WAVE2_COUNT, enemies::WAVE2_RING, enemies::EN_SPEED);
        info!("miniboss 1 down, level 2 wave spawned");
    }

    // Level 2: the sentinel waits for a fully cleared wave
    if state.level == 2
        && !state.mb2_spawned
        && state.miniboss2.is_none()
        && state.basic_kills >= 7
        && enemies::alive_count(state) == 0
    {
        state.enemy_bullets.clear();
        miniboss::spawn_miniboss2(state);
        state.mb2_spawned = true;
        info!("miniboss 2 spawned");
    }
    miniboss::update_miniboss2(state, dt_ms);
    if miniboss::player_bullets_vs_mb2(state) {
        state.miniboss2 = None;
        state.mb2_bullets.clear();
        state.level2_banner_ms = 2000.0;
        state.set_level(3);
        state.mb3_spawned = false;
        enemies::spawn_ring_wave(
            state,
            enemies::WAVE3_COUNT,
            enemies::WAVE3_RING,
            enemies::EN_SPEED_SLOW,
        );
        info!("miniboss 2 down, level 3 wave spawned");
    }

    // Level 3: the twins
    if state.level == 3
        && !state.mb3_spawned
        && state.miniboss3.is_none()
        && state.basic_kills >= 10
        && enemies::alive_count(state) == 0
    {
        state.enemy_bullets.clear();
        miniboss::spawn_miniboss3(state);
        state.mb3_spawned = true;
        info!("miniboss 3 spawned");
    }
    miniboss::update_miniboss3(state, dt_ms);
    if miniboss::player_bullets_vs_mb3(state) {
        state.miniboss3 = None;
        state.mb3_bullets.clear();
        state.final_boss_banner_ms = 3000.0;
        state.set_level(4);
        state.boss_spawned = false;
        info!("miniboss 3 down, final boss next");
    }

    // Level 4: the final boss
    if state.level == 4 {
        if !state.boss_spawned && state.boss.is_none() {
            boss::spawn_final_boss(state);
            state.boss_spawned = true;
            info!("final boss spawned");
        }
        boss::update_final_boss(state, dt_ms);
        if boss::player_bullets_vs_boss(state) {
            state.boss = None;
            state.boss_bullets.clear();
            state.outcome = Some(Outcome::Victory);
            info!("final boss destroyed - victory");
        }
    }

    tick_banners(state, dt_ms);
}

fn tick_banners(state: &mut GameState, dt_ms: f32) {
    state.level1_banner_ms = (state.level1_banner_ms - dt_ms).max(0.0);
    state.level2_banner_ms = (state.level2_banner_ms - dt_ms).max(0.0);
    state.final_boss_banner_ms = (state.final_boss_banner_ms - dt_ms).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Projectile;
    use glam::Vec2;

    const DT: f32 = 16.0;

    /// Park a zero-velocity player bullet on the target so the next collision
    /// pass consumes it
    fn plant_shot(state: &mut GameState, at: Vec2) {
        state
            .projectiles
            .push(Projectile::aimed(at, 0.0, 0.0, SHOT_TTL_MS, SHOT_RADIUS));
    }

    fn kill_wave(state: &mut GameState) {
        let targets: Vec<Vec2> = state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.pos)
            .collect();
        for pos in targets {
            plant_shot(state, pos);
        }
        tick(state, &TickInput::default(), DT);
    }

    #[test]
    fn clearing_first_wave_summons_miniboss1() {
        let mut state = GameState::new(42);
        kill_wave(&mut state);
        assert_eq!(state.basic_kills, 5);
        // Spawn happens on the next step after the kills are banked
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.miniboss1.is_some());
        assert_eq!(state.level, 1);
    }

    #[test]
    fn miniboss1_death_advances_to_level_two() {
        let mut state = GameState::new(42);
        kill_wave(&mut state);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.miniboss1.is_some());

        // Feed it exactly its health pool in planted shots
        for _ in 0..miniboss::MB1_HP {
            let pos = state.miniboss1.as_ref().map(|m| m.pos);
            let Some(pos) = pos else { break };
            plant_shot(&mut state, pos);
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.miniboss1.is_none());
        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), 7);
        assert!(state.enemies.iter().all(|e| e.alive));
        assert!(state.mb1_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert!(state.level1_banner_ms > 0.0);
        assert_eq!(state.banner(), Some("Level 1 completed"));
    }

    #[test]
    fn banners_count_down_to_zero() {
        let mut state = GameState::new(42);
        state.level1_banner_ms = 40.0;
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.level1_banner_ms > 0.0);
        tick(&mut state, &TickInput::default(), DT);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.level1_banner_ms, 0.0);
    }

    #[test]
    fn fire_intent_spawns_projectile() {
        let mut state = GameState::new(42);
        let input = TickInput {
            fire: true,
            ..TickInput::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn set_level_jump_is_cosmetic() {
        let mut state = GameState::new(42);
        let input = TickInput {
            set_level: Some(3),
            ..TickInput::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.level, 3);
        // The level-1 wave keeps fighting; no level-3 boss appears
        assert_eq!(state.enemies.len(), 5);
        assert!(state.miniboss3.is_none());
    }

    #[test]
    fn reset_action_restores_level_one() {
        let mut state = GameState::new(42);
        state.set_level(4);
        state.hits_taken = 4;
        let input = TickInput {
            reset: true,
            ..TickInput::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.level, 1);
        assert_eq!(state.hits_taken, 0);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn cheat_toggle_revives_a_lost_run() {
        let mut state = GameState::new(42);
        state.hits_taken = PLAYER_MAX_HITS;
        state.outcome = Some(Outcome::Defeat);
        let input = TickInput {
            toggle_cheat: true,
            ..TickInput::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.invincible);
        assert!(state.outcome.is_none());
        assert_eq!(state.hits_taken, 0);
    }

    #[test]
    fn frozen_run_only_moves_the_turret() {
        let mut state = GameState::new(42);
        state.outcome = Some(Outcome::Victory);
        let enemies_before: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        let input = TickInput {
            forward: true,
            fire: true,
            turret_left: true,
            ..TickInput::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.projectiles.is_empty());
        assert!(state.player.turret > 0.0);
        let enemies_after: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(enemies_before, enemies_after);
    }

    #[test]
    fn enemy_fire_cannot_stack_bullets() {
        let mut state = GameState::new(42);
        // Run a long stretch; the lone-shooter rule holds every frame
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), DT);
            assert!(state.enemy_bullets.len() <= 1);
        }
    }

    #[test]
    fn full_run_reaches_victory() {
        let mut state = GameState::new(7);
        let mut guard = 0;
        loop {
            guard += 1;
            assert!(guard < 20_000, "run never converged");
            // Stay invincible so enemy fire cannot end the run early
            if !state.invincible {
                tick(
                    &mut state,
                    &TickInput {
                        toggle_cheat: true,
                        ..TickInput::default()
                    },
                    DT,
                );
                continue;
            }
            match state.level {
                1 => {
                    if state.miniboss1.is_some() {
                        let pos = state.miniboss1.as_ref().unwrap().pos;
                        plant_shot(&mut state, pos);
                    } else if state.basic_kills < 5 {
                        let targets: Vec<Vec2> = state
                            .enemies
                            .iter()
                            .filter(|e| e.alive)
                            .map(|e| e.pos)
                            .collect();
                        for pos in targets {
                            plant_shot(&mut state, pos);
                        }
                    }
                }
                2 => {
                    if state.miniboss2.is_some() {
                        let pos = state.miniboss2.as_ref().unwrap().pos;
                        plant_shot(&mut state, pos);
                    } else if state.basic_kills < 7 {
                        let targets: Vec<Vec2> = state
                            .enemies
                            .iter()
                            .filter(|e| e.alive)
                            .map(|e| e.pos)
                            .collect();
                        for pos in targets {
                            plant_shot(&mut state, pos);
                        }
                    }
                }
                3 => {
                    if let Some(mb) = &state.miniboss3 {
                        let targets: Vec<Vec2> = mb
                            .clones
                            .iter()
                            .filter(|c| c.alive)
                            .map(|c| c.pos)
                            .collect();
                        for pos in targets {
                            plant_shot(&mut state, pos);
                        }
                    } else if state.basic_kills < 10 {
                        let targets: Vec<Vec2> = state
                            .enemies
                            .iter()
                            .filter(|e| e.alive)
                            .map(|e| e.pos)
                            .collect();
                        for pos in targets {
                            plant_shot(&mut state, pos);
                        }
                    }
                }
                4 => {
                    if let Some(b) = &state.boss {
                        let pos = b.pos;
                        plant_shot(&mut state, pos);
                    }
                }
                _ => unreachable!(),
            }
            tick(&mut state, &TickInput::default(), DT);
            if state.outcome == Some(Outcome::Victory) {
                break;
            }
        }
        assert_eq!(state.level, 4);
        assert!(state.boss.is_none());
        assert!(state.boss_bullets.is_empty());
        assert_eq!(state.banner(), Some("YOU WON!!"));
    }
}
