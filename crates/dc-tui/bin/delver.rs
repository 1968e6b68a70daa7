//! Room-crawler in Rust
//!
//! Main entry point for the game.

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use strum::IntoEnumIterator;

use dc_core::session::{GameSession, Mode};
use dc_core::GameRng;
use dc_tui::{App, Theme};

/// Room-crawler in Rust
#[derive(Parser, Debug)]
#[command(name = "delver")]
#[command(author, version, about = "Delver - pick a door, fight, descend", long_about = None)]
struct Args {
    /// RNG seed for a reproducible run
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Start a run immediately in this mode (normal/practice/hardcore)
    #[arg(short = 'm', long = "mode")]
    mode: Option<String>,

    /// Force the light terminal theme
    #[arg(long = "light")]
    light: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let mut session = GameSession::new(rng);
    if let Some(ref mode_str) = args.mode {
        match parse_mode(mode_str) {
            Some(mode) => session.restart(mode),
            None => {
                eprintln!("Unknown mode '{mode_str}' (expected normal, practice or hardcore)");
                std::process::exit(1);
            }
        }
    }

    let theme = if args.light {
        Theme::light()
    } else {
        Theme::detect()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, theme);
    let mut last_frame = Instant::now();

    // Main loop
    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        app.tick(dt);

        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(30))? {
            let event = event::read()?;
            if let Some(command) = app.handle_event(event) {
                app.execute(command);
            }
        }

        if app.should_quit() {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Parse a mode name by prefix, case-insensitive.
fn parse_mode(s: &str) -> Option<Mode> {
    let s = s.to_lowercase();
    Mode::iter().find(|mode| mode.to_string().to_lowercase().starts_with(&s))
}
