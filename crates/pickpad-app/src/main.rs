//! Main application entry point.

use clap::Parser;
use pickpad_app::{App, Cli};
use pickpad_core::EditorConfig;

fn main() {
    let cli = Cli::parse();
    env_logger::init();
    log::info!("Starting pickpad");

    let config = match EditorConfig::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    match App::new(config).run(cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
