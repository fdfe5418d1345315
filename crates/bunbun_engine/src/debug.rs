use std::fmt;

/// Verbose frame tracing, switched on by the `debug_enabled` config flag.
/// Output goes through `log::debug!`, so `RUST_LOG` still has the last word.
pub struct Debug {
    pub enabled: bool,
}

impl Debug {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn log_fmt(&self, args: fmt::Arguments) {
        if self.enabled {
            log::debug!(target: "bunbun::trace", "{}", args);
        }
    }
}

#[macro_export]
macro_rules! debug_log {
    ($dbg:expr, $($arg:tt)*) => {
        $dbg.log_fmt(format_args!($($arg)*))
    };
}
