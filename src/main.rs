use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use loggly_rsyslog::cli::Cli;
use loggly_rsyslog::config::Settings;
use loggly_rsyslog::error::LogglyError;
use loggly_rsyslog::{options, orchestration};

fn main() {
    // Plain `LEVEL: message` lines, the format provisioning logs are grepped for
    env_logger::Builder::new()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "{}: {}", record.level(), record.args())
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if let Err(e) = real_main(&cli) {
        if matches!(e.downcast_ref::<LogglyError>(), Some(LogglyError::MissingCredentials)) {
            eprintln!("{}", Cli::usage());
            std::process::exit(1);
        }
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn real_main(cli: &Cli) -> Result<()> {
    let action = options::resolve(cli, |key| std::env::var(key).ok())?;

    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let stdout = io::stdout();
    orchestration::run(&action, &settings, cli.dry_run, &mut stdout.lock())
        .context("Loggly rsyslog setup failed")?;
    Ok(())
}
