use clap::Parser;
use tidyshelf::cli::{self, Cli};
use tidyshelf::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = tidyshelf::logging::init() {
        OutputFormatter::warning(&format!("Could not initialize log file: {e}"));
    }

    if let Err(message) = cli::run_with_config(&cli.path, cli.config.as_deref()) {
        tracing::error!("Program terminated with error: {message}");
        OutputFormatter::error(&format!("An error occurred: {message}"));
        std::process::exit(1);
    }
}
