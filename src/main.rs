//! pothos-extract entry point
//!
//! Parses arguments, sets up logging, runs the vendoring pass, and turns any
//! error into a colored report on stderr with exit status 1.

use clap::Parser;
use pothos_extract::cli::Cli;
use pothos_extract::core::user_friendly_error;

fn main() {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    cli.init_logging();

    if let Err(e) = cli.execute() {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
