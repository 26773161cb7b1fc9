//! Tank Arena entry point
//!
//! Headless driver: measures real elapsed time per frame and feeds a single
//! `dt` to the simulation, with a scripted pilot standing in for the front
//! end. A rendering front end would run the same loop and read the state
//! back out after each tick.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tank_arena::Settings;
use tank_arena::consts::PLAYER_MAX_HITS;
use tank_arena::sim::{GameState, TickInput, tick};

/// Frame pacing for the demo loop
const FRAME: Duration = Duration::from_millis(16);
/// Give up after this much simulated time
const DEMO_LIMIT_MS: f32 = 120_000.0;

fn main() {
    env_logger::init();
    let settings = Settings::load();

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("tank-arena starting (seed {seed})");

    let mut state = GameState::new(seed);
    if settings.start_invincible {
        state.toggle_cheat();
    }

    let mut last = Instant::now();
    let mut next_status_ms = 0.0;
    loop {
        std::thread::sleep(FRAME);
        let now = Instant::now();
        let dt_ms = now.duration_since(last).as_secs_f32() * 1000.0;
        last = now;

        let input = pilot_input(&state);
        tick(&mut state, &input, dt_ms);

        if settings.log_status && state.time_ms >= next_status_ms {
            next_status_ms = state.time_ms + 1000.0;
            let boss = state
                .boss_health()
                .map(|(hp, max)| format!(" | boss {hp}/{max}"))
                .unwrap_or_default();
            log::info!(
                "{} | hits {}/{} | {}{}",
                state.level_label(),
                state.hits_taken,
                PLAYER_MAX_HITS,
                state.status_label(),
                boss,
            );
            if let Some(banner) = state.banner() {
                log::info!("*** {banner} ***");
            }
        }

        if state.is_frozen() || state.time_ms > DEMO_LIMIT_MS {
            break;
        }
    }

    match state.banner() {
        Some(banner) => log::info!("run over: {banner}"),
        None => log::info!("demo time limit reached at {}", state.level_label()),
    }
}

/// Stand-in pilot: creeps forward, sweeps the turret, fires on cooldown
fn pilot_input(state: &GameState) -> TickInput {
    TickInput {
        forward: !state.blocked,
        turret_left: state.time_ms as u64 % 4000 < 2000,
        turret_right: state.time_ms as u64 % 4000 >= 2000,
        fire: true,
        ..TickInput::default()
    }
}
