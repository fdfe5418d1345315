/// Installs the global `env_logger`. `RUST_LOG` overrides the default filter,
/// which is `debug` when `verbose` and `info` otherwise.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let result =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .format_timestamp_millis()
            .try_init();
    if let Err(e) = result {
        log::debug!("logger already initialized: {e}");
    }
}
