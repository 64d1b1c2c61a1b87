//! Log output setup

use env_logger::Env;

/// Install the global logger. `RUST_LOG` wins over the verbosity flag.
pub(crate) fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}
