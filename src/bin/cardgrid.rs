use cardgrid::export::DiskSink;
use cardgrid::host::parse_message;
use cardgrid::logging;
use cardgrid::tui::{App, KeyBindings, Theme};
use clap::{Parser, ValueEnum};
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyboard-first terminal gallery of image cards")]
struct Args {
    /// Host message file, one JSON envelope per line
    #[arg(short, long)]
    messages: Option<PathBuf>,

    /// Keep reading the message file as it grows
    #[arg(short, long)]
    follow: bool,

    /// Keybindings config file (JSON); defaults apply when absent
    #[arg(short, long)]
    keybindings: Option<PathBuf>,

    /// Directory CSV exports are written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Use the light color theme
    #[arg(long)]
    light: bool,

    /// Log level
    #[arg(short, long, value_enum, default_value = "warn")]
    logging: LogLevel,

    /// Log file path (defaults to ./cardgrid.log)
    #[arg(long)]
    log_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(level) = args.logging.to_level() {
        logging::init_with(args.log_path.clone(), Some(level))?;
    }

    let keybindings = match &args.keybindings {
        Some(path) => KeyBindings::load_from_file(path)?,
        None => KeyBindings::default(),
    };
    for warning in keybindings.validate() {
        warn!("{warning}");
    }

    let theme = if args.light { Theme::light() } else { Theme::dark() };
    let sink = DiskSink::new(&args.out_dir);
    let mut app = App::new(Box::new(sink), keybindings, theme);

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    if let Some(path) = args.messages.clone() {
        let follow = args.follow;
        std::thread::spawn(move || {
            if let Err(e) = read_messages(&path, follow, tx) {
                warn!("message reader stopped: {e}");
            }
        });
    }

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run(&mut terminal, &mut app, &mut rx);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    loop {
        // Drain pending host messages before drawing.
        while let Ok(raw) = rx.try_recv() {
            if let Some(envelope) = parse_message(&raw) {
                app.apply_envelope(envelope);
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    app.handle_key(&key)?;
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }
    info!("exiting");
    Ok(())
}

/// Read newline-delimited messages from `path`, optionally tailing the file
/// as it grows. Each raw line is forwarded for the UI loop to parse.
fn read_messages(
    path: &std::path::Path,
    follow: bool,
    tx: mpsc::UnboundedSender<String>,
) -> Result<()> {
    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            if !follow {
                break;
            }
            std::thread::sleep(Duration::from_millis(200));
            continue;
        }
        if follow && !line.ends_with('\n') {
            // Half-written line at EOF. Rewind and wait for the rest.
            reader.seek_relative(-(read as i64))?;
            std::thread::sleep(Duration::from_millis(200));
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if tx.send(trimmed.to_string()).is_err() {
            break;
        }
    }
    Ok(())
}
