//! Logger setup for the binary.

use crate::output::OutputMode;
use env_logger::Env;

/// Default filter for a verbosity level. `RUST_LOG` overrides it.
pub fn default_filter(mode: OutputMode) -> &'static str {
    match mode {
        OutputMode::Quiet => "error",
        OutputMode::Normal => "warn",
        OutputMode::Verbose => "info",
        OutputMode::VeryVerbose => "debug",
    }
}

/// Install the global logger. Calling it twice is harmless.
pub fn init(mode: OutputMode) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(mode)))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters() {
        assert_eq!(default_filter(OutputMode::Quiet), "error");
        assert_eq!(default_filter(OutputMode::Normal), "warn");
        assert_eq!(default_filter(OutputMode::Verbose), "info");
        assert_eq!(default_filter(OutputMode::VeryVerbose), "debug");
    }
}
