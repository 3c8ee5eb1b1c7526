//! Session state machine and cycle driver
//!
//! One task owns everything: the host protocol state (unbound until the
//! first `SetupEGI`), the world, the RNG and the outbound command channel.
//! Inbound signals are drained at the top of each cycle; nothing else
//! mutates game state.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, trace, warn};

use crate::egi::channel::CommandChannel;
use crate::egi::protocol::{FinishMetrics, GameCommand, HostSignal};
use crate::store::HighScoreStore;
use crate::util::time::{cycle_delta, CYCLE_DURATION_MICROS};

use super::assets::{self, AssetLoader, HeadlessLoader};
use super::collision;
use super::movement::Skier;
use super::progress::ProgressTracker;
use super::spawn::{SpawnConfig, SpawnEngine};
use super::Viewport;

/// Per-session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub viewport: Viewport,
    pub obstacle_hits_cost_life: bool,
    /// RNG seed; fix it for deterministic replays
    pub seed: u64,
}

/// Everything on the slope. Handed to the cycle hooks read-only so the
/// rendering side can draw it.
pub struct World {
    pub skier: Skier,
    pub entities: Vec<super::entity::Entity>,
}

impl World {
    fn new() -> Self {
        Self {
            skier: Skier::new(0.0, 0.0),
            entities: Vec::new(),
        }
    }

    /// Drop entities that scrolled out of the world
    fn cull_offworld(&mut self, viewport: Viewport) {
        let top_cut = viewport.top(self.skier.y) - viewport.height as f32;
        let bottom_cut = viewport.bottom(self.skier.y) + viewport.height as f32 * 1.5;
        self.entities
            .retain(|e| !e.reached_target && e.y > top_cut && e.y < bottom_cut);
    }
}

/// Rendering-boundary hook invoked around each cycle
pub type CycleHook = Box<dyn FnMut(&World) + Send>;

/// The embedded game session
pub struct GameSession {
    config: SessionConfig,
    channel: CommandChannel,
    signals: mpsc::Receiver<HostSignal>,
    assets: Box<dyn AssetLoader + Send>,
    spawner: SpawnEngine,
    tracker: ProgressTracker,
    rng: ChaCha8Rng,
    world: Option<World>,
    bound: bool,
    finish_sent: bool,
    cycle: u64,
    before_hooks: Vec<CycleHook>,
    after_hooks: Vec<CycleHook>,
}

impl GameSession {
    pub fn new(
        config: SessionConfig,
        store: HighScoreStore,
        outbound: mpsc::UnboundedSender<GameCommand>,
        signals: mpsc::Receiver<HostSignal>,
    ) -> Self {
        let spawner = SpawnEngine::new(SpawnConfig::default(), config.viewport);
        let tracker = ProgressTracker::new(store, config.obstacle_hits_cost_life);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Self {
            config,
            channel: CommandChannel::new(outbound),
            signals,
            assets: Box::new(HeadlessLoader),
            spawner,
            tracker,
            rng,
            world: None,
            bound: false,
            finish_sent: false,
            cycle: 0,
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
        }
    }

    /// Swap in a real asset loader (the rendering side's)
    pub fn with_assets(mut self, assets: Box<dyn AssetLoader + Send>) -> Self {
        self.assets = assets;
        self
    }

    /// Register a hook run at the start of every cycle
    pub fn on_before_cycle(&mut self, hook: impl FnMut(&World) + Send + 'static) {
        self.before_hooks.push(Box::new(hook));
    }

    /// Register a hook run at the end of every cycle
    pub fn on_after_cycle(&mut self, hook: impl FnMut(&World) + Send + 'static) {
        self.after_hooks.push(Box::new(hook));
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Mutable world access for tooling and tests
    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Handle one inbound host signal
    pub fn process_signal(&mut self, signal: HostSignal) {
        match signal {
            HostSignal::SetupEgi => self.handle_setup(),
            HostSignal::Ping => {
                // Answered in any state; an unbound Pong waits in the queue
                self.channel.send(GameCommand::Pong);
            }
            HostSignal::Step { direction } => {
                match &mut self.world {
                    Some(world) if self.tracker.is_running() => {
                        world.skier.apply_step(direction);
                    }
                    _ => {
                        // No player yet (or the run is over): accepted, no effect
                        trace!(?direction, "Step with no active skier, ignoring");
                    }
                }
            }
            HostSignal::Unknown => {
                trace!("Unknown signal type, ignoring");
            }
        }
    }

    fn handle_setup(&mut self) {
        if self.bound {
            debug!("Duplicate SetupEGI, ignoring");
            return;
        }
        self.bound = true;

        match assets::load_all(self.assets.as_mut()) {
            Ok(()) => {
                self.world = Some(World::new());
                self.channel.bind();
                self.channel.send(GameCommand::Ready);
                info!("Host bound, game running");
            }
            Err(e) => {
                warn!(error = %e, "Asset manifest failed to load");
                self.channel.bind();
                self.channel
                    .send(GameCommand::fault("asset_load", "assets", Some(e.to_string())));
            }
        }
    }

    /// One iteration of the game loop. A no-op until setup created the world.
    pub fn run_cycle(&mut self) {
        let Some(world) = &mut self.world else {
            return;
        };
        self.cycle += 1;

        for hook in &mut self.before_hooks {
            hook(world);
        }

        if self.tracker.is_running() {
            let dt = cycle_delta();
            let distance = self.tracker.distance();

            // Spawn decisions come first; fresh entities join the checks below
            self.spawner
                .run_cycle(&mut self.rng, &world.skier, distance, &mut world.entities);

            world.skier.advance(dt);
            let (sx, sy) = (world.skier.x, world.skier.y);
            for entity in &mut world.entities {
                entity.advance(dt, sx, sy);
            }

            let events = collision::resolve(
                &mut world.skier,
                &mut world.entities,
                &mut self.rng,
                self.config.viewport,
            );

            self.tracker.observe_distance(world.skier.travelled_px());
            for event in &events {
                self.tracker.apply_collision(event);
            }

            if !self.tracker.is_running() && !self.finish_sent {
                self.finish_sent = true;
                self.channel.send(GameCommand::Finish {
                    metrics: FinishMetrics::default(),
                });
            }

            world.cull_offworld(self.config.viewport);
        }

        for hook in &mut self.after_hooks {
            hook(world);
        }
    }

    /// Start a fresh run after game over
    pub fn reset(&mut self) {
        if let Some(world) = &mut self.world {
            world.skier.reset(0.0, 0.0);
            world.entities.clear();
        }
        self.tracker.reset();
        self.finish_sent = false;
    }

    /// Run the never-ending session loop. Ends only when the host link
    /// closes; game over just freezes the world until a reset.
    pub async fn run(mut self) {
        info!("Game session started");

        let mut ticker = interval(Duration::from_micros(CYCLE_DURATION_MICROS));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            // Drain pending host signals
            loop {
                match self.signals.try_recv() {
                    Ok(signal) => self.process_signal(signal),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        info!(cycles = self.cycle, "Host link closed, ending session");
                        return;
                    }
                }
            }

            self.run_cycle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egi::protocol::StepDirection;
    use crate::game::movement::Direction;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    static UNIQUE: AtomicU64 = AtomicU64::new(0);

    fn session() -> (
        GameSession,
        mpsc::UnboundedReceiver<GameCommand>,
        mpsc::Sender<HostSignal>,
        PathBuf,
    ) {
        let n = UNIQUE.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "ski_runner_session_{}_{n}.txt",
            std::process::id()
        ));
        let store = HighScoreStore::open(path.clone()).unwrap();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (sig_tx, sig_rx) = mpsc::channel(64);
        let config = SessionConfig {
            viewport: Viewport {
                width: 800,
                height: 600,
            },
            obstacle_hits_cost_life: false,
            seed: 7,
        };
        (
            GameSession::new(config, store, out_tx, sig_rx),
            out_rx,
            sig_tx,
            path,
        )
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<GameCommand>) -> Vec<GameCommand> {
        let mut out = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    #[test]
    fn setup_is_idempotent() {
        let (mut session, mut out, _sig, path) = session();
        session.process_signal(HostSignal::SetupEgi);
        session.process_signal(HostSignal::SetupEgi);
        session.process_signal(HostSignal::SetupEgi);

        let ready_count = drain(&mut out)
            .iter()
            .filter(|c| matches!(c, GameCommand::Ready))
            .count();
        assert_eq!(ready_count, 1);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn steps_before_setup_are_harmless_and_not_replayed() {
        let (mut session, _out, _sig, path) = session();
        session.process_signal(HostSignal::Step {
            direction: StepDirection::Down,
        });
        session.run_cycle();
        assert!(session.world().is_none());

        session.process_signal(HostSignal::SetupEgi);
        let skier = &session.world().unwrap().skier;
        assert!(!skier.moving, "pre-setup steps must not replay");
        assert_eq!(skier.direction, Direction::South);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn every_ping_gets_one_pong_in_order() {
        let (mut session, mut out, _sig, path) = session();
        session.process_signal(HostSignal::Ping);
        session.process_signal(HostSignal::SetupEgi);
        session.process_signal(HostSignal::Ping);
        session.process_signal(HostSignal::Ping);

        let delivered = drain(&mut out);
        // Pre-bind Pong first, then Ready, then the two live Pongs
        assert!(matches!(delivered[0], GameCommand::Pong));
        assert!(matches!(delivered[1], GameCommand::Ready));
        assert!(matches!(delivered[2], GameCommand::Pong));
        assert!(matches!(delivered[3], GameCommand::Pong));
        assert_eq!(delivered.len(), 4);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn unknown_signals_are_ignored() {
        let (mut session, mut out, _sig, path) = session();
        session.process_signal(HostSignal::Unknown);
        session.run_cycle();
        assert!(drain(&mut out).is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn cycle_hooks_fire_each_cycle_once_the_world_exists() {
        let (mut session, _out, _sig, path) = session();
        let counter = std::sync::Arc::new(AtomicU64::new(0));
        let seen = counter.clone();
        session.on_before_cycle(move |_world| {
            seen.fetch_add(1, Ordering::Relaxed);
        });

        session.run_cycle();
        assert_eq!(counter.load(Ordering::Relaxed), 0, "no world yet");

        session.process_signal(HostSignal::SetupEgi);
        session.run_cycle();
        session.run_cycle();
        assert_eq!(counter.load(Ordering::Relaxed), 2);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn moving_distance_is_monotonic_while_running() {
        let (mut session, _out, _sig, path) = session();
        session.process_signal(HostSignal::SetupEgi);
        session.process_signal(HostSignal::Step {
            direction: StepDirection::Down,
        });

        let mut last = 0.0;
        for _ in 0..120 {
            session.run_cycle();
            let d = session.progress().distance();
            assert!(d >= last);
            last = d;
        }
        assert!(last > 0.0);
        let _ = std::fs::remove_file(path);
    }
}
