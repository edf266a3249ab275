use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod session;
mod utils;

use commands::Flow;
use config::Settings;
use session::ChartSession;
use utils::OutputArea;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with the console output
    let filter = EnvFilter::from_default_env()
        .add_directive("eventchart=debug".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("📈 Starting eventchart...");

    let settings = Settings::from_env();
    info!(
        "Data source: {}, chart file: {}, size: {}x{}",
        settings.data_url,
        settings.output_path.display(),
        settings.width,
        settings.height
    );

    let mut out = OutputArea::new(settings.output_path.clone());
    let mut session = ChartSession::new(settings);
    let mut stdout = std::io::stdout();

    out.print("Financial chart with event annotations");
    out.print("1. Pick an asset with `$asset`, `$symbol`, `$period` and `$interval`");
    out.print("2. `$load` fetches the data and draws the chart");
    out.print("3. `$event add <YYYY-MM-DD> <description>` marks events on it");
    out.print("Type `$help` for every command.");
    if let Err(e) = out.flush(&mut stdout) {
        error!("Failed to write output: {}", e);
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        let flow = commands::handle_line(&mut session, &mut out, &line).await;
        if let Err(e) = out.flush(&mut stdout) {
            error!("Failed to write output: {}", e);
        }
        if flow == Flow::Quit {
            break;
        }
    }

    info!("👋 eventchart stopped");
}
