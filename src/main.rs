use clap::Parser;
use tracing_subscriber::EnvFilter;

use diffdrive_zenoh_runtime::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // --verbose raises the default level to debug; RUST_LOG still wins
    let default_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(default_level.parse().unwrap()),
        )
        .init();

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = diffdrive_zenoh_runtime::runtime::run(config).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
