use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use thiserror::Error;

use citrus_snake::config::{
    theme_by_name, GameConfig, Theme, BASE_TICK_INTERVAL_MS, DEFAULT_DISPLAY_SIZE,
    DEFAULT_TILE_SIZE, SLOW_WINDOW_MS,
};
use citrus_snake::cues::TerminalBell;
use citrus_snake::grid::GridError;
use citrus_snake::input::{GameInput, InputHandler};
use citrus_snake::renderer::{draw_frame, FrameRenderer};
use citrus_snake::session::{GameSession, SessionPhase};
use citrus_snake::terminal_runtime::{install_panic_hook, TerminalGuard};
use citrus_snake::ui::menu::{render_game_over_menu, render_start_menu};

/// Input poll timeout, doubling as the idle frame pacing.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "citrus-snake", version, about = "Arcade snake with bonus oranges")]
struct Cli {
    /// Logical board size in display pixels.
    #[arg(long, default_value_t = DEFAULT_DISPLAY_SIZE)]
    display_size: u32,

    /// Tile edge length in display pixels; must divide the display size.
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,

    /// Base tick interval in milliseconds; slow motion doubles it.
    #[arg(long = "speed", default_value_t = BASE_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme: classic, ocean, or neon.
    #[arg(long, default_value = "classic")]
    theme: String,

    /// Disable terminal bell cues.
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("invalid board configuration: {0}")]
    Grid(#[from] GridError),
    #[error("unknown theme {0:?} (available: classic, ocean, neon)")]
    UnknownTheme(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("citrus-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let theme: &'static Theme =
        theme_by_name(&cli.theme).ok_or_else(|| AppError::UnknownTheme(cli.theme.clone()))?;

    let config = GameConfig {
        display_size: cli.display_size,
        tile_size: cli.tile_size,
        base_tick_interval: Duration::from_millis(cli.tick_ms),
        slow_tick_interval: Duration::from_millis(cli.tick_ms.saturating_mul(2)),
        slow_window: Duration::from_millis(SLOW_WINDOW_MS),
    };

    // Session construction validates the grid before the terminal is
    // switched to raw mode, so errors print normally.
    let mut game = match cli.seed {
        Some(seed) => GameSession::new_with_seed(config, seed)?,
        None => GameSession::new(config)?,
    };

    install_panic_hook();
    let mut guard = TerminalGuard::acquire()?;
    let mut input = InputHandler::new();
    let mut bell = TerminalBell::new(!cli.quiet);

    loop {
        if let Some(event) = input.poll_input(POLL_TIMEOUT)? {
            match event {
                GameInput::Quit => break,
                GameInput::Confirm => match game.phase() {
                    SessionPhase::Idle => game.start(Instant::now()),
                    SessionPhase::GameOver => {
                        game.reset();
                        game.start(Instant::now());
                    }
                    _ => {}
                },
                GameInput::Direction(direction) => game.on_direction(direction),
            }
        }

        {
            let mut sink = FrameRenderer {
                terminal: guard.terminal_mut(),
                theme,
            };
            game.pump(Instant::now(), &mut sink, &mut bell);
        }

        // While ticking, frames come from the session; overlays cover the
        // idle and terminal phases.
        match game.phase() {
            SessionPhase::Idle => {
                let snapshot = game.snapshot();
                guard.terminal_mut().draw(|frame| {
                    let area = frame.area();
                    draw_frame(frame, &snapshot, theme);
                    render_start_menu(frame, area, theme);
                })?;
            }
            SessionPhase::GameOver => {
                let snapshot = game.snapshot();
                let score = game.score;
                guard.terminal_mut().draw(|frame| {
                    let area = frame.area();
                    draw_frame(frame, &snapshot, theme);
                    render_game_over_menu(frame, area, score, theme);
                })?;
            }
            SessionPhase::Running | SessionPhase::Slowed => {}
        }
    }

    Ok(())
}
