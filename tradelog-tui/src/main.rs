use std::io::{self, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use tradelog_core::Config;
use tradelog_tui::{handle_key, ui, AppState};

#[derive(Parser, Debug)]
#[command(name = "tradelog-tui", version, about = "Password-gated trade journal")]
struct Args {
    /// Config file (defaults to ./tradelog.toml when present)
    #[arg(short, long, env = "TRADELOG_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref()).context("loading configuration")?;

    // The terminal is ours; logs go to a file.
    if config.logging.file.is_none() {
        config.logging.file = Some(default_log_path());
    }
    config
        .logging
        .init()
        .context("opening the log file")?;

    if config.uses_default_secret() {
        warn!("using the built-in default secret; set [access] in tradelog.toml");
    }
    info!(journal = %config.journal.path.display(), "starting");

    let gate = config.gatekeeper().context("reading the configured secret")?;
    let mut app = AppState::new(gate, config.store(), config.journal.currency.clone());

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        // Nothing happens in the background, so block until the next event.
        if let Event::Key(key) = event::read()? {
            handle_key(app, key);
        }
    }
    Ok(())
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tradelog")
        .join("tradelog.log")
}
