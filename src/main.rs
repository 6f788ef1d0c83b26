use std::process::ExitCode;

use config::app_config::{load_config, log_filter, setup_client};
use scenario::Suite;

pub mod check;
pub mod config;
pub mod http_probe;
pub mod report;
pub mod scenario;

#[tokio::main]
async fn main() -> ExitCode {
    // .env is loaded before the logger so its RUST_LOG is honoured
    let dotenv_file = dotenvy::dotenv().ok();
    let filter = log_filter(std::env::var("RUST_LOG").ok(), dotenv_file.as_deref());
    env_logger::Builder::new().parse_filters(&filter).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            eprintln!("❌ Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match setup_client(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcomes = Suite::new(client, config).run().await;
    report::print_summary(&outcomes);

    if outcomes.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
