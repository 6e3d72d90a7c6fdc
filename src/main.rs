//! Terminal 2048 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_2048::term`.
//! The session is resumed from, and saved to, a JSON file unless `--ephemeral`
//! is given.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Env, Target};
use log::info;

use tui_2048::core::{FileStore, GameSession, MemoryStore, SessionConfig, SessionStore};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{GameView, HudView, TerminalRenderer, Viewport};
use tui_2048::types::SessionEvent;

/// How long the board border stays lit after a win.
const CELEBRATION: Duration = Duration::from_millis(2500);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(name = "tui-2048", version, about = "The 2048 sliding-tile puzzle in your terminal")]
struct Args {
    /// Score that wins the game (overrides TUI_2048_TARGET)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    target: Option<u32>,

    /// Seed for tile spawns (overrides TUI_2048_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Open with two random tiles instead of the classic fixed opening
    #[arg(long)]
    random_opening: bool,

    /// Where the game is saved between runs
    #[arg(
        long,
        value_name = "FILE",
        env = "TUI_2048_SAVE_PATH",
        default_value = "tui-2048-game-state.json"
    )]
    save_path: PathBuf,

    /// Keep the game in memory only; nothing is read or written on disk
    #[arg(long)]
    ephemeral: bool,

    /// Ignore any saved game and start over
    #[arg(long)]
    fresh: bool,

    /// Write logs to this file (the terminal itself is taken by the game)
    #[arg(long, value_name = "FILE", env = "TUI_2048_LOG_PATH")]
    log_path: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::from_env();
        if let Some(target) = self.target {
            config = config.with_win_target(target);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.random_opening |= self.random_opening;
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_path {
        init_logging(path)?;
    }

    let config = args.session_config();
    info!(
        "starting: target {}, seed {:?}, store {}",
        config.win_target,
        config.seed,
        if args.ephemeral {
            "memory".to_string()
        } else {
            args.save_path.display().to_string()
        }
    );

    if args.ephemeral {
        play(&args, &config, MemoryStore::new())
    } else {
        play(&args, &config, FileStore::new(&args.save_path))
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn play<S: SessionStore>(args: &Args, config: &SessionConfig, store: S) -> Result<()> {
    let session = if args.fresh {
        GameSession::fresh(config, store)
    } else {
        GameSession::new(config, store)
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Ok(summary) = &result {
        println!("{summary}");
    }
    result.map(|_| ())
}

fn run<S: SessionStore>(term: &mut TerminalRenderer, mut session: GameSession<S>) -> Result<String> {
    let view = GameView::default();
    let mut celebrate_until: Option<Instant> = None;

    loop {
        let celebrating = celebrate_until.is_some_and(|t| Instant::now() < t);
        let hud = HudView::new(session.win_target()).celebrating(celebrating);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session.snapshot(), &hud, Viewport::new(w, h));
        term.draw(&fb)?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(format!(
                        "score {} / best tile {}",
                        session.score(),
                        session.best_tile()
                    ));
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                match session.apply_action(action).event {
                    Some(SessionEvent::Won) => celebrate_until = Some(Instant::now() + CELEBRATION),
                    Some(SessionEvent::Restarted) => celebrate_until = None,
                    Some(SessionEvent::Lost) | None => {}
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            // Auto-repeat and release are not separate intents.
            _ => {}
        }
    }
}
