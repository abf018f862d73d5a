//! progdir's main application entry point.
//! Parses the command line, sets up logging and runs the chosen action.

use progdir::{
    cli::get_args,
    config::Config,
    error::default_error_handler,
    logger::init_logger,
    runner::run,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => default_error_handler(err),
    };

    match run(&config, std::io::stdout()) {
        Ok(status) => std::process::exit(status.code()),
        Err(err) => default_error_handler(err),
    }
}
