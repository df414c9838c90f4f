mod api;
mod app;
mod config;
mod gallery;
mod palette;
mod poem;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::{Config, Variant};

#[derive(Parser, Debug)]
#[command(name = "poems")]
#[command(about = "TUI poem gallery backed by a poems HTTP API")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/poem-gallery/config.toml")]
    config: String,

    /// Poems URL (original variant) or API base (evolved variant)
    #[arg(long, env = "POEM_GALLERY_API_URL")]
    api_url: Option<String>,

    /// Which gallery behavior to use
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Log file path (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("poem-gallery")
        .join("poem-gallery.log")
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poem_gallery=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path)?;

    // Load config, CLI wins over the file
    let mut config = Config::load(&cli.config)?;
    if let Some(url) = cli.api_url {
        config.api.url = Some(url);
    }
    if let Some(variant) = cli.variant {
        config.gallery.variant = variant;
    }

    let mut app = App::new(config)?;
    tracing::info!(
        "Starting {:?} gallery against {}",
        app.gallery().variant(),
        app.endpoint()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initial fetch
    app.fetch_poems();

    // Run main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_fetch();
        app.fit_to_width(terminal.size()?.width);
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll with a short timeout so fetch results show up promptly
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        tokio::task::yield_now().await;
    }
}

/// Apply a key press. Returns true when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('c') | KeyCode::Enter | KeyCode::Char(' ') => app.cycle_selected_color(),
        KeyCode::Char('r') => app.retry(),
        KeyCode::Up | KeyCode::Char('k') => app.up(),
        KeyCode::Down | KeyCode::Char('j') => app.down(),
        KeyCode::Left | KeyCode::Char('h') => app.left(),
        KeyCode::Right | KeyCode::Char('l') => app.right(),
        KeyCode::Tab => app.next(),
        KeyCode::BackTab => app.previous(),
        KeyCode::Home | KeyCode::Char('g') => app.first(),
        KeyCode::End | KeyCode::Char('G') => app.last(),
        _ => {}
    }
    false
}
