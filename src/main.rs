use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use oraman_tui::{events, load_detail, ui, App, FileSource, HttpSource, Settings, SqlSource};

#[derive(Parser, Debug)]
#[command(name = "oraman")]
#[command(about = "Terminal view of SQL detail from an Oracle performance monitor")]
struct Args {
    /// SQL id of the statement to show
    sql_id: String,

    /// Base URL of the monitor web application
    #[arg(short, long, conflicts_with = "dir")]
    endpoint: Option<String>,

    /// Read `<sql_id>.json` documents from this directory instead
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Config file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request timeout (e.g., "10s", "500ms")
    #[arg(short, long)]
    timeout: Option<String>,

    /// Fetch once, write the annotated document to a JSON file and exit
    #[arg(short = 'x', long)]
    export: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref(), args.export.is_some())?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
        settings.dir = None;
    }
    if let Some(dir) = args.dir {
        settings.dir = Some(dir);
    }
    if let Some(timeout) = args.timeout {
        settings.timeout = timeout;
    }

    let source = build_source(&settings)?;
    info!(source = source.description(), sql_id = %args.sql_id, "starting");

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return rt.block_on(export_to_file(source.as_ref(), &args.sql_id, &export_path));
    }

    // Fetch tasks are spawned from the UI thread
    let _guard = rt.enter();
    run_tui(source, &args.sql_id)
}

/// Route logs to a file, stderr in export mode, or nowhere while the TUI
/// owns the terminal.
fn init_logging(log_file: Option<&Path>, export: bool) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Arc::new(file)).try_init()
        }
        None if export => builder.with_writer(io::stderr).try_init(),
        None => builder.with_writer(io::sink).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}

fn build_source(settings: &Settings) -> Result<Arc<dyn SqlSource>> {
    if let Some(ref dir) = settings.dir {
        return Ok(Arc::new(FileSource::new(dir)));
    }

    let source = HttpSource::builder()
        .endpoint(&settings.endpoint)
        .timeout(settings.timeout()?)
        .build()?;
    Ok(Arc::new(source))
}

/// Run the TUI for one statement
fn run_tui(source: Arc<dyn SqlSource>, sql_id: &str) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source, sql_id, ui::Theme::auto_detect());
    app.activate();

    let result = run_app(&mut terminal, &mut app);

    // Cancel anything still in flight before the runtime goes away
    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 80;
    const MIN_HEIGHT: u16 = 20;

    while app.running {
        // Pick up a finished fetch before drawing
        app.poll();

        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5u16.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(12),   // SQL detail
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::sql::render(frame, app, chunks[1]);
            ui::common::render_status_bar(frame, app, chunks[2]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch one statement and write its annotated document to a JSON file
async fn export_to_file(source: &dyn SqlSource, sql_id: &str, export_path: &Path) -> Result<()> {
    let detail = load_detail(source, sql_id)
        .await
        .with_context(|| format!("failed to fetch {} from {}", sql_id, source.description()))?;

    tokio::fs::write(export_path, detail.to_json()?).await?;

    println!("Exported SQL detail to: {}", export_path.display());
    Ok(())
}
