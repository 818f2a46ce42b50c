use boardsense_cli::dispatch::{load_config, Response};
use boardsense_cli::{usage_response, Cli, Dispatcher};
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints one JSON document to stdout; `--help` and `--version` are the only plain-text exits
fn main() -> anyhow::Result<()> {
    let response = match Cli::try_parse() {
        Ok(cli) => {
            init_logging(cli.verbose);
            run(cli)
        }
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            init_logging(false);
            usage_response(&e)
        }
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", response.to_json()?)?;
    stdout.flush()?;
    Ok(())
}

fn run(cli: Cli) -> Response {
    match load_config(&cli) {
        Ok(config) => {
            tracing::debug!("Models directory: {}", config.models_dir.display());
            Dispatcher::from_config(&config).dispatch(cli.command)
        }
        Err(e) => {
            tracing::warn!("Configuration unusable: {}", e);
            Response::error(e)
        }
    }
}

/// Logs go to stderr; stdout carries only the response document
fn init_logging(verbose: bool) {
    let filter = if verbose {
        "boardsense_cli=debug,boardsense_models=debug"
    } else {
        "boardsense_cli=warn,boardsense_models=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
