// ============================================================================
// fbxbatch-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// Log records (including notifications routed through LogNotifier) go to
// stderr so stdout stays clean for `show --json` and `plan --json`.
//
// USAGE:
// - default: info and above
// - -v/--verbose: debug and above
// - RUST_LOG overrides both, e.g. RUST_LOG=fbxbatch_core=trace

use console::style;
use log::LevelFilter;
use std::io::Write;

/// Initialize the logger for fbxbatch.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_with_level(level);
}

pub fn init_with_level(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => style("ERROR").red().bold(),
                log::Level::Warn => style("WARN ").yellow(),
                log::Level::Info => style("INFO ").green(),
                log::Level::Debug => style("DEBUG").blue(),
                log::Level::Trace => style("TRACE").magenta(),
            };
            writeln!(buf, "{} {}", level, record.args())
        })
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized with level: {}", level);
    }
}
