//! trace: terminal front end for the supply-chain trace backend
//!
//! Register, log in, manage products and follow their journey. The login
//! session is kept in a file between invocations until `trace logout`.

mod cli;
mod render;

use clap::Parser;
use trace_client::{ClientConfig, ErrorAction, TraceClient, ViewScope};

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trace_cli=warn,trace_client=warn".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    config.session_path = Some(cli.session_path(&config));

    let client = TraceClient::from_config(&config)?;
    tracing::debug!(base_url = client.base_url(), "Client ready");

    // Ctrl-C disposes the scope: the running command is dropped, which
    // releases the scanner and abandons any in-flight request.
    let scope = ViewScope::new();
    let handle = scope.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let Some(outcome) = scope.until_disposed(cli.command.run(&client)).await else {
        eprintln!("Interrupted.");
        // exit now: a pending stdin read would otherwise hold runtime shutdown
        std::process::exit(130);
    };

    if let Err(failure) = outcome {
        let action = match failure {
            cli::Failure::Client(err) => ErrorAction::resolve(&err, client.session().as_ref()),
            cli::Failure::Guard(action) => action,
            cli::Failure::Other(err) => return Err(err),
        };
        eprintln!("Error: {}", action.message);
        if let Some(route) = action.redirect {
            eprintln!("Next: {}", cli::hint_for(route));
        }
        std::process::exit(1);
    }

    // `scan` leaves a blocking stdin read behind when the scanner keeps its
    // pipe open; skip waiting for it on runtime shutdown.
    use std::io::Write;
    std::io::stdout().flush()?;
    std::process::exit(0);
}
