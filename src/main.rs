use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use corkboard::core::config;
use corkboard::tui;

#[derive(Parser)]
#[command(name = "corkboard", about = "Terminal message-board client")]
struct Args {
    /// Board API base URL (overrides config file and CORKBOARD_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to corkboard.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("corkboard.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!("Corkboard starting up against {}", resolved.base_url);

    tui::run(resolved)
}
