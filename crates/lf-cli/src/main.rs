//! logfield — load delimited log files into a field store and query it.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lf_cli::cli::Cli;
use lf_cli::config::{LogFormat, LogfieldConfig};
use lf_cli::executor::CommandExecutor;
use lf_cli::registry::QueryRegistry;

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.compact().init(),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = LogfieldConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_tracing(config.log_format);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        store = %config.store_file,
        "logfield starting"
    );

    let registry = QueryRegistry::with_defaults();
    let source = lf_engine::FileLogSource;
    let executor = CommandExecutor::new(&config, &registry, &source)?;

    let outcome = executor.execute(&cli.command.into_action())?;
    println!("{}", outcome.render(cli.json)?);
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
