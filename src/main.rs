use std::{process::ExitCode, time::Duration};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use indexcheck::{
    cli::{self, Cli},
    client::IndexClient,
    error,
    run::Runner,
    walker,
};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("INDEXCHECK_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            if let Some(body) = err.body() {
                tracing::error!("response: '{body}'");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> error::Result<()> {
    let paths = if let Some(ref list) = cli.list {
        walker::read_list(list)?
    } else {
        walker::discover_paths(&cli.dir)?
    };

    let client =
        IndexClient::new(&cli.url, cli.timeout.map(Duration::from_secs))?;
    tracing::info!(
        url = client.base_url(),
        mailbox = %cli.mailbox,
        candidates = paths.len(),
        "starting run"
    );

    let mut runner = Runner::new(client, &cli.mailbox, &cli.query);
    let state = runner.run(paths).await?;

    tracing::info!(
        indexed = state.indexed,
        search_responses = state.last_count,
        "run complete"
    );
    Ok(())
}
