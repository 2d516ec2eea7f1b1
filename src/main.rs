//! Lane Runner entry point
//!
//! Native: plays one headless run with a simple autopilot and prints the run
//! summary as JSON. Usage: `lane-runner [seed] [tuning.json]`.
//! On wasm the engine is driven from JS through `lane_runner::wasm`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::Tuning;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);

    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Lane Runner (native) starting, seed {}", seed);
    autopilot::run(tuning, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use lane_runner::consts::{FRAME_MS, LANES, PLAYER_HEIGHT};
    use lane_runner::sim::{GameEvent, GamePhase, GameState};
    use lane_runner::{Engine, Intent, Tuning};

    /// How far above the player an obstacle counts as a threat
    const LOOKAHEAD: f32 = 160.0;
    /// Safety stop for runs that never end
    const MAX_TICKS: u64 = 2_000_000;

    pub fn run(tuning: Tuning, seed: u64) {
        let mut engine = Engine::new(tuning, seed);
        engine.start();

        let mut ticks = 0u64;
        while engine.phase() == GamePhase::Playing && ticks < MAX_TICKS {
            if let Some(intent) = choose(engine.state()) {
                engine.submit_intent(intent);
            }
            engine.tick(FRAME_MS as f64);
            ticks += 1;

            for event in engine.drain_events() {
                match event {
                    GameEvent::ScoreChanged { score } => log::debug!("score {}", score),
                    GameEvent::RunEnded(summary) => match serde_json::to_string(&summary) {
                        Ok(json) => println!("{json}"),
                        Err(e) => log::error!("Failed to encode summary: {}", e),
                    },
                }
            }
        }

        if engine.phase() == GamePhase::Playing {
            log::warn!("Stopped after {} ticks without a game over", ticks);
        }
    }

    /// Dodge or smash whatever is about to reach the player
    fn choose(state: &GameState) -> Option<Intent> {
        let player = &state.player;
        let threat_in = |lane: usize| {
            let x = LANES[lane];
            state.obstacles.iter().find(|o| {
                let bottom = o.pos.y + o.size.y;
                o.pos.x < x && o.pos.x + o.size.x > x
                    && bottom > player.y - LOOKAHEAD
                    && o.pos.y < player.y + PLAYER_HEIGHT
            })
        };

        let threat = threat_in(player.lane)?;
        if threat.destructible {
            return (!player.spinning).then_some(Intent::Spin);
        }

        let left = player.lane.checked_sub(1).filter(|&l| threat_in(l).is_none());
        let right = Some(player.lane + 1)
            .filter(|&l| l < LANES.len() && threat_in(l).is_none());
        match (left, right) {
            (Some(_), _) => Some(Intent::LaneLeft),
            (None, Some(_)) => Some(Intent::LaneRight),
            (None, None) => None,
        }
    }
}
