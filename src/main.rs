use clap::Parser;
use courseval::app::App;
use courseval::cli::{Args, Command};
use courseval::config::Config;
use courseval::logging::setup_logging;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config before anything else so logging setup sees the level
    let config = Config::load().expect("Failed to load configuration");
    setup_logging(&config, args.tracing);

    info!(version = env!("CARGO_PKG_VERSION"), "starting courseval");

    let app = App::new(config);
    let result = match args.command {
        Command::Map => app.run_map().await,
        Command::Search {
            level,
            programmes,
            years,
        } => app.run_search(level, &programmes, &years).await,
        Command::ParseSearch => app.run_parse_search(),
        Command::Reports => app.run_reports().await,
        Command::ParseReports => app.run_parse_reports(),
        Command::Run {
            level,
            programmes,
            years,
        } => app.run_all(level, &programmes, &years).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Stage failed");
            ExitCode::FAILURE
        }
    }
}
