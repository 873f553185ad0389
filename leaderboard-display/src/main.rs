use clap::Parser;
use coarsetime::Duration;
use crossbeam_channel::bounded;
use leaderboard_common::{config::Config, snapshot::Snapshot};
use log::{LevelFilter, debug, error, info, warn};
#[cfg(debug_assertions)]
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::{
    append::rolling_file::{
        RollingFileAppender,
        policy::compound::{
            CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
        },
    },
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

mod leaderboard;
mod network;
mod reconcile;
mod render;
mod scroll;
mod surface;
mod view_state;

use leaderboard::Leaderboard;
use render::MarkupTemplate;
use surface::SimSurface;
use view_state::MemoryStore;

const APP_NAME: &str = "leaderboard-display";
const SMOOTH_SCROLL_MILLIS: u64 = 500;

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct AppConfig {
    server_ip: IpAddr,
    server_port: u16,
    leaderboard: Config,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            server_port: 8000,
            leaderboard: Config::default(),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,

    #[clap(long, short)]
    /// TOML file with scroll and display settings, overrides the stored app config
    config: Option<PathBuf>,

    #[clap(long)]
    /// File that receives the latest rendered markup after every update
    markup_path: Option<PathBuf>,

    #[clap(long)]
    /// Directory within which log files will be placed, default is platform dependent
    log_location: Option<PathBuf>,

    #[clap(long, default_value = "5000000")]
    /// Max size in bytes that a log file is allowed to reach before being rolled over
    log_max_file_size: u64,

    #[clap(long, default_value = "3")]
    /// Number of archived logs to keep
    num_old_logs: u32,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    init_logging(&args)?;

    let mut config: AppConfig = match confy::load(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to read config file, overwriting with default. Error: {e}");
            let config = AppConfig::default();
            confy::store(APP_NAME, None, &config)?;
            config
        }
    };
    if let Some(path) = &args.config {
        config.leaderboard = Config::new_from_file(path)?;
    }

    let (tx, rx) = bounded::<Snapshot>(3);
    let (server_ip, server_port) = (config.server_ip, config.server_port);
    let net_worker = std::thread::spawn(move || {
        network::networking_thread(tx, server_ip, server_port);
    });

    let display = config.leaderboard.display.clone();
    let mut leaderboard = Leaderboard::new(
        MemoryStore::default(),
        MarkupTemplate::new(&display.viewport_id),
        SimSurface::new(display, Duration::from_millis(SMOOTH_SCROLL_MILLIS)),
        config.leaderboard,
    );

    // Ends once the networking thread drops its sender
    for snapshot in rx.iter() {
        let report = leaderboard.update_leaderboard(snapshot);
        debug!("Update done: {report:?}");

        if let Some(path) = &args.markup_path {
            if let Err(e) = std::fs::write(path, leaderboard.surface().markup()) {
                error!("Failed to write markup to {}: {e}", path.display());
            }
        }
    }

    if net_worker.join().is_err() {
        error!("Networking thread panicked!");
    }
    info!("No more snapshots, exiting");
    Err("Lost the leaderboard server connection".into())
}

fn init_logging(args: &Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let log_base_path = match &args.log_location {
        Some(path) => path.clone(),
        None => {
            let mut path = directories::BaseDirs::new()
                .ok_or("Could not find a directory to store logs")?
                .data_local_dir()
                .to_path_buf();
            path.push("leaderboard-display-logs");
            path
        }
    };
    let mut log_path = log_base_path.clone();
    let mut archived_log_path = log_base_path.clone();
    log_path.push(format!("{APP_NAME}-log.txt"));
    archived_log_path.push(format!("{APP_NAME}-log-{{}}.txt.gz"));

    #[cfg(debug_assertions)]
    println!("Log path: {}", log_path.display());

    // Only log to the console in debug mode
    #[cfg(all(debug_assertions, not(target_os = "windows")))]
    let console_target = Target::Stderr;
    #[cfg(all(debug_assertions, target_os = "windows"))]
    let console_target = Target::Stdout; // Windows apps don't get a stderr handle
    #[cfg(debug_assertions)]
    let console = ConsoleAppender::builder()
        .target(console_target)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    // Setup the file log roller
    let roller = FixedWindowRoller::builder().build(
        archived_log_path
            .as_os_str()
            .to_str()
            .ok_or("Log path is not valid UTF-8")?,
        args.num_old_logs,
    )?;
    let file_policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(args.log_max_file_size)),
        Box::new(roller),
    );
    let file_appender = RollingFileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new("[{d} {l:5} {M}] {m}{n}")))
        .build(log_path, Box::new(file_policy))?;

    // Setup the logging from all locations to use `LevelFilter::Error`
    let root = Root::builder().appender("file_appender");
    #[cfg(debug_assertions)]
    let root = root.appender("console");
    let root = root.build(LevelFilter::Error);

    // Setup the top level logging config
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("file_appender", Box::new(file_appender)));

    #[cfg(debug_assertions)]
    let log_config = log_config.appender(Appender::builder().build("console", Box::new(console)));

    // The crate's log target uses underscores
    let log_config = log_config
        .logger(Logger::builder().build("leaderboard_display", log_level))
        .logger(Logger::builder().build("leaderboard_common", log_level))
        .build(root)?;

    log4rs::init_config(log_config)?;
    log_panics::init();
    Ok(())
}
