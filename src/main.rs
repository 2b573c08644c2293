use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    process,
};
use tracing::{error, info, Level};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use velocidad::{
    app::App,
    app_dirs::AppDirs,
    calculator,
    config::{Config, ConfigStore, FileConfigStore},
    report::{write_report, ReportFormat},
    runtime::{run_app, CrosstermEventSource, FixedTicker, Runner},
};

/// terminal speed calculator with charted sweeps
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Computes speed = distance / time and charts how speed responds when either the time or the distance is swept across a range."
)]
pub struct Cli {
    /// distance in metres (default: saved config, else 100)
    #[clap(short = 'd', long, allow_hyphen_values = true)]
    distance: Option<String>,

    /// time in seconds (default: saved config, else 10)
    #[clap(short = 't', long, allow_hyphen_values = true)]
    time: Option<String>,

    /// print the result and both sweeps instead of starting the TUI
    #[clap(long)]
    print: bool,

    /// output format used with --print
    #[clap(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// hide the km/h equivalent
    #[clap(long)]
    no_kmh: bool,

    /// store the resulting distance, time and km/h setting as startup defaults
    #[clap(long)]
    save_defaults: bool,

    /// config file to use instead of the platform default
    #[clap(long)]
    config: Option<PathBuf>,

    /// write debug detail to the log file
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Layer command line overrides on top of the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(distance) = &self.distance {
            cfg.distance = distance.clone();
        }
        if let Some(time) = &self.time {
            cfg.time = time.clone();
        }
        if self.no_kmh {
            cfg.show_kmh = false;
        }
        cfg
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn init_logging(verbose: bool) {
    let Some(log_dir) = AppDirs::log_dir() else {
        eprintln!("Failed to init logging. Couldn't determine log dir");
        return;
    };

    let file_appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(AppDirs::log_file_name())
        .build(&log_dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to init logging in {}. {}", log_dir.display(), e);
            return;
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .compact()
        .finish();
    match tracing::subscriber::set_global_default(subscriber) {
        Ok(_) => info!("Logging initialised"),
        Err(e) => eprintln!("Failed to init logging. {}", e),
    }
}

fn print_report(config: &Config, format: ReportFormat) -> Result<(), Box<dyn Error>> {
    match calculator::calculate(&config.distance, &config.time) {
        Ok(calc) => {
            write_report(&calc, format, config.show_kmh, io::stdout().lock())?;
            Ok(())
        }
        Err(e) => {
            error!(
                distance = %config.distance,
                time = %config.time,
                "print rejected input: {}",
                e
            );
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = cli.config_store();
    let config = cli.apply(store.load());

    if cli.save_defaults {
        store.save(&config)?;
        info!("Saved defaults to {}", store.path().display());
    }

    if cli.print {
        return print_report(&config, cli.format);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::Io,
            "stdin must be a tty (use --print for non-interactive output)",
        )
        .exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(
        distance = %config.distance,
        time = %config.time,
        "Launching UI"
    );
    let mut app = App::new(&config);
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let outcome = run_app(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome?;
    Ok(())
}
