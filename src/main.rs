mod args;
mod cumulative;

use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use log::{warn, Level};
use snafu::ErrorCompat;

use crate::cumulative::config_reader::{load_settings, Settings, DEFAULT_SETTINGS_FILE};
use crate::cumulative::{run_continuous, run_once, TallyResult};

fn console_timestamp(time: &NaiveDateTime) -> String {
    time.format("[%Y-%m-%d %H:%M:%S]").to_string()
}

/// Sets up the console output. `RUST_LOG` takes precedence over the settings.
fn init_logging(settings: &Settings, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if settings.enable_logging {
        "info"
    } else {
        "off"
    };
    let show_timestamps = settings.show_timestamps;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(move |buf, record| {
            if show_timestamps {
                let ts = console_timestamp(&Local::now().naive_local());
                write!(buf, "{} ", ts)?;
            }
            if record.level() != Level::Info {
                write!(buf, "{}: ", record.level())?;
            }
            writeln!(buf, "{}", record.args())
        })
        .target(env_logger::Target::Stdout)
        .init();
}

/// Completes when the user presses Ctrl+C.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl+C, the calculator will not stop: {}", e);
        futures::future::pending::<()>().await;
    }
}

async fn run(args: args::Args) -> TallyResult<()> {
    let config_path = PathBuf::from(
        args.config
            .clone()
            .unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string()),
    );
    let (settings, origin) = load_settings(&config_path);
    init_logging(&settings, args.verbose);
    origin.log();

    if args.once {
        run_once(&settings, args.check)?;
    } else {
        if let Some(p) = args.check {
            warn!("--check {} is only used with --once, ignoring it", p);
        }
        run_continuous(&settings, interrupted()).await?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = args::Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
