//! Engine facade
//!
//! Owns one simulation context, the seeded RNG, the pending intent set and the
//! outgoing event queue. UI code talks to this and nothing else.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::input::{Intent, TickInput};
use crate::sim::{GameEvent, GamePhase, GameState, RunCommand, sanitize_dt, tick};
use crate::snapshot::RenderSnapshot;
use crate::tuning::Tuning;

pub struct Engine<R: Rng = Pcg32> {
    tuning: Tuning,
    rng: R,
    state: GameState,
    pending: TickInput,
    events: Vec<GameEvent>,
}

impl Engine<Pcg32> {
    /// Engine with a PCG stream seeded from `seed`
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Engine drawing spawns from an injected random source
    pub fn with_rng(tuning: Tuning, mut rng: R) -> Self {
        let state = GameState::new(tuning.clone(), &mut rng);
        Self {
            tuning,
            rng,
            state,
            pending: TickInput::default(),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Menu -> playing with a fresh run
    pub fn start(&mut self) -> bool {
        self.command(RunCommand::Start)
    }

    pub fn pause(&mut self) -> bool {
        self.command(RunCommand::Pause)
    }

    pub fn resume(&mut self) -> bool {
        self.command(RunCommand::Resume)
    }

    /// Game over -> playing with a fresh run
    pub fn restart(&mut self) -> bool {
        self.command(RunCommand::Restart)
    }

    pub fn return_to_menu(&mut self) -> bool {
        self.command(RunCommand::ReturnToMenu)
    }

    /// Apply a state machine command; returns whether it took effect
    pub fn command(&mut self, command: RunCommand) -> bool {
        let from = self.state.phase;
        let Some(to) = from.apply(command) else {
            log::debug!("Ignoring {:?} while {:?}", command, from);
            return false;
        };

        if from.starts_run(command) {
            self.state = GameState::new(self.tuning.clone(), &mut self.rng);
            log::info!("Run started");
        }
        self.state.phase = to;
        // Presses never carry across a pause or into a new run
        self.pending = TickInput::default();
        log::info!("{:?} -> {:?}", from, to);
        true
    }

    /// Buffer an intent for the next tick; ignored unless playing
    pub fn submit_intent(&mut self, intent: Intent) {
        if self.state.phase.is_running() {
            self.pending.set(intent);
        }
    }

    /// Advance one frame by `elapsed_ms`
    ///
    /// Does nothing outside `Playing`, or when `elapsed_ms` is negative or
    /// non-finite. Buffered intents wait for the next real frame.
    pub fn tick(&mut self, elapsed_ms: f64) {
        if !self.state.phase.is_running() {
            return;
        }
        let Some(dt_ms) = sanitize_dt(elapsed_ms) else {
            log::debug!("Skipping frame with bad delta {}", elapsed_ms);
            return;
        };
        let input = self.pending.take();
        tick(&mut self.state, &input, dt_ms, &mut self.rng, &mut self.events);
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot::capture(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_MS, GROUND_Y};
    use crate::sim::{Obstacle, ObstacleKind};
    use glam::Vec2;

    fn engine() -> Engine {
        Engine::new(Tuning::default(), 12345)
    }

    #[test]
    fn test_lifecycle() {
        let mut engine = engine();
        assert_eq!(engine.phase(), GamePhase::Menu);
        assert!(!engine.pause());
        assert!(!engine.restart());

        assert!(engine.start());
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(!engine.start());

        assert!(engine.pause());
        assert_eq!(engine.phase(), GamePhase::Paused);
        assert!(engine.resume());
        assert_eq!(engine.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut engine = engine();
        engine.tick(16.0);
        assert_eq!(engine.state().frame, 0);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut engine = engine();
        engine.start();
        for _ in 0..30 {
            engine.tick(FRAME_MS as f64);
        }
        engine.pause();
        let frame = engine.state().frame;
        let distance = engine.state().score.distance();
        let entities = engine.state().entity_count();

        engine.submit_intent(Intent::LaneLeft);
        for _ in 0..100 {
            engine.tick(FRAME_MS as f64);
        }
        assert_eq!(engine.state().frame, frame);
        assert_eq!(engine.state().score.distance(), distance);
        assert_eq!(engine.state().entity_count(), entities);

        // Intent submitted while paused was dropped
        engine.resume();
        engine.tick(FRAME_MS as f64);
        assert_eq!(engine.state().player.lane, 1);
    }

    #[test]
    fn test_intent_applies_on_next_tick() {
        let mut engine = engine();
        engine.start();
        engine.submit_intent(Intent::LaneRight);
        assert_eq!(engine.state().player.lane, 1);
        engine.tick(FRAME_MS as f64);
        assert_eq!(engine.state().player.lane, 2);
        assert_eq!(engine.state().player.target_x, 280.0);
        // Buffer was drained
        engine.tick(FRAME_MS as f64);
        assert_eq!(engine.state().player.lane, 2);
    }

    #[test]
    fn test_bad_deltas_are_skipped() {
        let mut engine = engine();
        engine.start();
        for _ in 0..20 {
            engine.tick(FRAME_MS as f64);
        }
        engine.drain_events();
        engine.submit_intent(Intent::Spin);

        let frame = engine.state().frame;
        let distance = engine.state().score.distance();
        let entities = engine.state().entity_count();
        let lives = engine.state().lives;
        for _ in 0..100 {
            engine.tick(f64::NAN);
            engine.tick(-16.0);
            engine.tick(f64::INFINITY);
        }
        let state = engine.state();
        assert_eq!(state.frame, frame);
        assert_eq!(state.score.distance(), distance);
        assert_eq!(state.entity_count(), entities);
        assert_eq!(state.lives, lives);
        assert!(!state.player.spinning);
        assert!(engine.drain_events().is_empty());

        // The buffered intent applies on the next valid frame
        engine.tick(0.0);
        let player = &engine.state().player;
        assert_eq!(engine.state().frame, frame + 1);
        assert!(player.spinning);
        assert_eq!(player.spin_ms, 500.0);
    }

    /// Play until the run ends, parking the player in the middle lane
    fn play_to_game_over(engine: &mut Engine) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..200_000 {
            if engine.phase() == GamePhase::GameOver {
                break;
            }
            engine.tick(FRAME_MS as f64);
            events.extend(engine.drain_events());
        }
        events
    }

    #[test]
    fn test_run_ends_once_and_restart_resets() {
        let mut engine = engine();
        engine.start();
        let events = play_to_game_over(&mut engine);
        assert_eq!(engine.phase(), GamePhase::GameOver);

        let ended: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RunEnded(_)))
            .collect();
        assert_eq!(ended.len(), 1);
        let last = events.last().cloned();
        let Some(GameEvent::RunEnded(summary)) = last else {
            panic!("run must end with RunEnded");
        };
        assert_eq!(summary.score, engine.state().score.score());
        assert_eq!(summary.distance, engine.state().score.distance().floor() as u64);

        // Game over is inert
        engine.tick(FRAME_MS as f64);
        assert!(engine.drain_events().is_empty());

        assert!(engine.restart());
        let state = engine.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score.score(), 0);
        assert_eq!(state.score.distance(), 0.0);
        assert_eq!(state.score.speed(), 4.0);
        assert_eq!(state.entity_count(), 0);
        assert!(state.effects.is_empty());
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_return_to_menu() {
        let mut engine = engine();
        engine.start();
        play_to_game_over(&mut engine);
        assert!(engine.return_to_menu());
        assert_eq!(engine.phase(), GamePhase::Menu);
        assert!(engine.start());
        assert_eq!(engine.state().lives, 3);
    }

    #[test]
    fn test_score_event_at_most_once_per_tick() {
        let mut engine = engine();
        engine.start();
        for _ in 0..5000 {
            engine.tick(FRAME_MS as f64);
            let scored = engine
                .drain_events()
                .into_iter()
                .filter(|e| matches!(e, GameEvent::ScoreChanged { .. }))
                .count();
            assert!(scored <= 1);
            if engine.phase() != GamePhase::Playing {
                break;
            }
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = engine();
        let mut b = engine();
        a.start();
        b.start();
        let events_a = play_to_game_over(&mut a);
        let events_b = play_to_game_over(&mut b);
        assert_eq!(events_a, events_b);
        assert_eq!(a.state().frame, b.state().frame);
    }

    #[test]
    fn test_lives_lost_to_unbreakable_obstacle() {
        let mut engine = engine();
        engine.start();
        engine.state.tuning.obstacle_chance_cap = 0.0;
        engine.state.tuning.collectible_chance = 0.0;
        engine.state.tuning.power_up_chance = 0.0;
        engine.state.lives = 1;
        let id = engine.state.next_entity_id();
        engine.state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Pillar,
            pos: Vec2::new(182.5, GROUND_Y - 40.0),
            size: ObstacleKind::Pillar.size(),
            destructible: false,
            moving: false,
            direction: 1.0,
        });

        engine.tick(FRAME_MS as f64);
        assert_eq!(engine.phase(), GamePhase::GameOver);
        let events = engine.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::RunEnded(summary)] if summary.score == 0 && summary.max_speed == 4.0
        ));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = engine();
        engine.start();
        engine.tick(FRAME_MS as f64);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.frame, 1);
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.distance, 4.0);
    }
}
