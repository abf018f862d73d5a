//! Logger setup. Walk progress is logged at debug/trace level,
//! user-facing diagnostics go to stdout separately.

pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();
}
