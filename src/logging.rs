use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output, which
/// includes per-frame contact transitions; the default is info level, which
/// shows tendril creation and termination only.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_target(verbose);

    // A logger may already be installed by an earlier call or test harness.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised; keeping existing configuration");
    }
}
