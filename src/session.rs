use std::time::{Duration, Instant};

use crate::clock::{ClockFire, SimulationClock};
use crate::config::{
    GameConfig, APPLES_PER_BONUS, APPLE_GROWTH, APPLE_POINTS, BONUS_GROWTH, BONUS_POINTS,
};
use crate::cues::{AudioCue, CueKind};
use crate::food::{bonus_reaches, FoodSpawner};
use crate::grid::{Grid, GridError, Position};
use crate::input::Direction;
use crate::snake::Snake;

/// High-level session phase.
///
/// `Slowed` is the timed window after eating a bonus; it behaves like
/// `Running` at a halved tick rate and reverts on a wall-clock alarm, not a
/// step count.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionPhase {
    Idle,
    Running,
    Slowed,
    GameOver,
}

/// Read-only view of one frame, handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Position,
    pub bonus: Option<Position>,
    pub score: u32,
    pub slowed: bool,
    pub tile_count: i32,
}

/// Frame sink collaborator. Drawing never feeds back into the simulation.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// No-op renderer, handy for tests.
impl Renderer for () {
    fn render(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Exclusive owner of all mutable game state for one session.
///
/// External code interacts through `start`, `stop`, `reset`, `on_direction`
/// and `pump`; every state mutation happens inside a tick step, driven by
/// the polled [`SimulationClock`]. Timing is passed in as explicit
/// [`Instant`]s so tests can walk the wall clock deterministically.
#[derive(Debug)]
pub struct GameSession {
    grid: Grid,
    pub snake: Snake,
    pub food: Position,
    pub bonus: Option<Position>,
    pub score: u32,
    apples_since_bonus: u32,
    phase: SessionPhase,
    clock: SimulationClock,
    spawner: FoodSpawner,
    config: GameConfig,
}

impl GameSession {
    /// Creates an idle session with entropy-seeded food placement.
    pub fn new(config: GameConfig) -> Result<Self, GridError> {
        Self::with_spawner(config, FoodSpawner::new())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, GridError> {
        Self::with_spawner(config, FoodSpawner::with_seed(seed))
    }

    fn with_spawner(config: GameConfig, mut spawner: FoodSpawner) -> Result<Self, GridError> {
        let grid = Grid::new(config.display_size, config.tile_size)?;
        let snake = Snake::new(grid.center(), Direction::Right);
        let food = spawner.spawn_regular(&grid, &snake);

        Ok(Self {
            grid,
            snake,
            food,
            bonus: None,
            score: 0,
            apples_since_bonus: 0,
            phase: SessionPhase::Idle,
            clock: SimulationClock::new(),
            spawner,
            config,
        })
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the currently armed tick interval, if the clock is running.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.clock.tick_interval()
    }

    /// Returns a read-only view of the current frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            food: self.food,
            bonus: self.bonus,
            score: self.score,
            slowed: self.phase == SessionPhase::Slowed,
            tile_count: self.grid.tile_count(),
        }
    }

    /// Begins or resumes ticking. A game-over session must be `reset` first.
    pub fn start(&mut self, now: Instant) {
        match self.phase {
            SessionPhase::Idle => {
                self.phase = SessionPhase::Running;
                self.clock.arm(now, self.config.base_tick_interval);
            }
            SessionPhase::Running => {
                self.clock.arm(now, self.config.base_tick_interval);
            }
            SessionPhase::Slowed => {
                self.clock.arm(now, self.config.slow_tick_interval);
            }
            SessionPhase::GameOver => {}
        }
    }

    /// Cancels all timers. Idempotent; the phase is left untouched.
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    /// Replaces the session state wholesale and returns to `Idle`.
    ///
    /// Any live timer is cancelled before the new state is built, so no
    /// stale tick or slow-window alarm can fire into the fresh session.
    pub fn reset(&mut self) {
        self.clock.stop();
        self.snake = Snake::new(self.grid.center(), Direction::Right);
        self.food = self.spawner.spawn_regular(&self.grid, &self.snake);
        self.bonus = None;
        self.score = 0;
        self.apples_since_bonus = 0;
        self.phase = SessionPhase::Idle;
    }

    /// Buffers a direction command for the next step.
    ///
    /// Ignored outside active play; illegal (same-axis) changes are dropped
    /// silently inside [`Snake::set_heading`].
    pub fn on_direction(&mut self, direction: Direction) {
        if matches!(self.phase, SessionPhase::Running | SessionPhase::Slowed) {
            self.snake.set_heading(direction);
        }
    }

    /// Dispatches every timer due at `now`: tick steps the simulation, the
    /// alarm ends the slow-motion window.
    pub fn pump<R, A>(&mut self, now: Instant, renderer: &mut R, audio: &mut A)
    where
        R: Renderer,
        A: AudioCue,
    {
        while let Some(fire) = self.clock.poll(now) {
            match fire {
                ClockFire::Tick => self.step(now, renderer, audio),
                ClockFire::Alarm => self.end_slow_window(now),
            }
        }
    }

    /// Advances the simulation by one tick.
    fn step<R, A>(&mut self, now: Instant, renderer: &mut R, audio: &mut A)
    where
        R: Renderer,
        A: AudioCue,
    {
        let outcome = self.snake.advance(&self.grid);
        // Wall first, then self; either one is terminal.
        if outcome.is_fatal() {
            self.phase = SessionPhase::GameOver;
            self.clock.stop();
            audio.play_event(CueKind::GameOver);
            return;
        }

        renderer.render(&self.snapshot());

        let head = self.snake.head();
        if head == self.food {
            self.snake.grow(APPLE_GROWTH);
            self.score += APPLE_POINTS;
            self.apples_since_bonus += 1;
            audio.play_event(CueKind::RegularEat);
            self.food = self.spawner.spawn_regular(&self.grid, &self.snake);

            if self.apples_since_bonus == APPLES_PER_BONUS {
                self.bonus = Some(self.spawner.spawn_bonus(&self.grid, &self.snake));
                self.apples_since_bonus = 0;
            }
        }

        if let Some(anchor) = self.bonus {
            if bonus_reaches(head, anchor) {
                self.snake.grow(BONUS_GROWTH);
                self.score += BONUS_POINTS;
                audio.play_event(CueKind::BonusEat);
                self.bonus = None;
                self.enter_slow_window(now);
            }
        }
    }

    /// Halves the tick rate for a fixed wall-clock window.
    ///
    /// Arming replaces any timer of the same kind, so eating a second bonus
    /// during the window extends the single alarm instead of leaving two
    /// alive.
    fn enter_slow_window(&mut self, now: Instant) {
        self.phase = SessionPhase::Slowed;
        self.clock.arm(now, self.config.slow_tick_interval);
        self.clock.arm_alarm(now, self.config.slow_window);
    }

    fn end_slow_window(&mut self, now: Instant) {
        if self.phase == SessionPhase::Slowed {
            self.phase = SessionPhase::Running;
            self.clock.arm(now, self.config.base_tick_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::GameConfig;
    use crate::cues::{AudioCue, CueKind};
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{GameSession, SessionPhase};

    #[derive(Debug, Default)]
    struct CueLog(Vec<CueKind>);

    impl AudioCue for CueLog {
        fn play_event(&mut self, kind: CueKind) {
            self.0.push(kind);
        }
    }

    fn session() -> GameSession {
        GameSession::new_with_seed(GameConfig::default(), 42)
            .expect("default config should be valid")
    }

    /// Pumps the session once per base tick across `ticks` intervals.
    fn run_ticks(game: &mut GameSession, start: Instant, ticks: u32, cues: &mut CueLog) -> Instant {
        let interval = Duration::from_millis(100);
        let mut now = start;
        for _ in 0..ticks {
            now += interval;
            game.pump(now, &mut (), cues);
        }
        now
    }

    #[test]
    fn session_starts_idle_at_grid_center() {
        let game = session();

        assert_eq!(game.phase(), SessionPhase::Idle);
        assert_eq!(game.snake.head(), Position { x: 10, y: 10 });
        assert_eq!(game.snake.len(), 1);
        assert_eq!(game.score, 0);
        assert!(game.tick_interval().is_none());
    }

    #[test]
    fn eating_an_apple_scores_and_grows() {
        let mut game = session();
        game.food = Position { x: 11, y: 10 };

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        run_ticks(&mut game, t0, 1, &mut cues);

        assert_eq!(game.score, 1);
        assert_eq!(game.snake.max_cells(), 2);
        assert_eq!(cues.0, vec![CueKind::RegularEat]);
        // Respawned food avoids the snake.
        assert!(!game.snake.occupies(game.food));
    }

    #[test]
    fn tenth_apple_spawns_a_bonus_in_the_inner_region() {
        let mut game = session();
        game.apples_since_bonus = 9;
        game.food = Position { x: 11, y: 10 };

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        run_ticks(&mut game, t0, 1, &mut cues);

        let anchor = game.bonus.expect("tenth apple should spawn a bonus");
        assert!(anchor.x >= 0 && anchor.x < 18);
        assert!(anchor.y >= 0 && anchor.y < 18);
        assert_eq!(game.apples_since_bonus, 0);
    }

    #[test]
    fn bonus_is_eaten_by_proximity_and_slows_the_clock() {
        let mut game = session();
        game.food = Position { x: 0, y: 0 };
        // Head steps to (11,10); anchor (12,11) is within Chebyshev 1.
        game.bonus = Some(Position { x: 12, y: 11 });

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        game.pump(t0 + Duration::from_millis(100), &mut (), &mut cues);

        assert_eq!(game.score, 10);
        assert_eq!(game.snake.max_cells(), 6);
        assert_eq!(game.bonus, None);
        assert_eq!(game.phase(), SessionPhase::Slowed);
        assert_eq!(game.tick_interval(), Some(Duration::from_millis(200)));
        assert_eq!(cues.0, vec![CueKind::BonusEat]);
    }

    #[test]
    fn slow_window_reverts_after_its_wall_clock_span() {
        // A short window keeps the walk to the alarm clear of the walls.
        let config = GameConfig {
            slow_window: Duration::from_millis(400),
            ..GameConfig::default()
        };
        let mut game =
            GameSession::new_with_seed(config, 42).expect("config should be valid");
        game.food = Position { x: 0, y: 0 };
        game.bonus = Some(Position { x: 11, y: 10 });

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        let slowed_at = t0 + Duration::from_millis(100);
        game.pump(slowed_at, &mut (), &mut cues);
        assert_eq!(game.phase(), SessionPhase::Slowed);

        // Steer away from the right wall before walking out the window.
        game.on_direction(Direction::Up);

        // One slow tick inside the window, then the alarm.
        game.pump(slowed_at + Duration::from_millis(200), &mut (), &mut cues);
        assert_eq!(game.phase(), SessionPhase::Slowed);
        assert_eq!(game.snake.head(), Position { x: 11, y: 9 });

        game.pump(slowed_at + Duration::from_millis(400), &mut (), &mut cues);
        assert_eq!(game.phase(), SessionPhase::Running);
        assert_eq!(game.tick_interval(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn wall_collision_ends_the_session_and_stops_the_clock() {
        let mut game = session();
        game.snake = Snake::new(Position { x: 19, y: 10 }, Direction::Right);
        game.food = Position { x: 0, y: 0 };

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        let now = run_ticks(&mut game, t0, 1, &mut cues);

        assert_eq!(game.phase(), SessionPhase::GameOver);
        assert!(game.tick_interval().is_none());
        assert_eq!(cues.0, vec![CueKind::GameOver]);

        // No further steps are processed.
        let head = game.snake.head();
        run_ticks(&mut game, now, 3, &mut cues);
        assert_eq!(game.snake.head(), head);
        assert_eq!(cues.0.len(), 1);
    }

    #[test]
    fn self_collision_ends_the_session() {
        let mut game = session();
        game.snake = Snake::from_cells(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 5, y: 6 },
                Position { x: 4, y: 6 },
                Position { x: 4, y: 5 },
                Position { x: 4, y: 4 },
            ],
            Direction::Left,
        );
        game.food = Position { x: 0, y: 0 };

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        run_ticks(&mut game, t0, 1, &mut cues);

        assert_eq!(game.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn reset_restores_a_fresh_idle_session() {
        let mut game = session();
        game.snake = Snake::new(Position { x: 19, y: 10 }, Direction::Right);
        game.score = 7;
        game.bonus = Some(Position { x: 3, y: 3 });

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        run_ticks(&mut game, t0, 1, &mut cues);
        assert_eq!(game.phase(), SessionPhase::GameOver);

        game.reset();

        assert_eq!(game.phase(), SessionPhase::Idle);
        assert_eq!(game.snake.head(), Position { x: 10, y: 10 });
        assert_eq!(game.score, 0);
        assert_eq!(game.bonus, None);
        assert!(game.tick_interval().is_none());
        assert!(!game.snake.occupies(game.food));
    }

    #[test]
    fn direction_input_is_ignored_while_idle() {
        let mut game = session();

        game.on_direction(Direction::Up);

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        game.food = Position { x: 0, y: 0 };
        run_ticks(&mut game, t0, 1, &mut cues);

        // Still heading right: the idle-phase command was dropped.
        assert_eq!(game.snake.head(), Position { x: 11, y: 10 });
    }

    #[test]
    fn body_never_exceeds_max_cells_during_play() {
        let mut game = session();
        game.food = Position { x: 11, y: 10 };

        let t0 = Instant::now();
        game.start(t0);
        let mut cues = CueLog::default();
        let mut now = t0;
        for _ in 0..8 {
            now += Duration::from_millis(100);
            game.pump(now, &mut (), &mut cues);
            assert!(game.snake.len() <= game.snake.max_cells());
            for cell in game.snake.segments() {
                assert!(game.grid().contains(*cell));
            }
        }
    }
}
