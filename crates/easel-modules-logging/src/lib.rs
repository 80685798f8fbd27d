use env_logger::Env;

/// Default filter when `RUST_LOG` is not set.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Install the process logger. `RUST_LOG` wins over `debug`.
/// Safe to call more than once; later calls are ignored.
pub fn init(debug: bool) {
    let env = Env::default().default_filter_or(default_filter(debug));
    let installed = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .format_target(true)
        .try_init()
        .is_ok();

    if installed {
        log::debug!("logger ready (debug={debug})");
    }
}
