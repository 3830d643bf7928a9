//! sensectl - command-line client for the SupportSense daemon

use clap::Parser;
use sensectl::cli::Cli;
use sensectl::{commands, output};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::run(cli).await {
        output::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
