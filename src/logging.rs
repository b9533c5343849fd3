//! Logging setup
//!
//! `env_logger` behind the `log` facade. `RUST_LOG` wins over the
//! configured default filter.

/// Install the global logger. Later calls are ignored.
pub fn init(default_filter: &str) {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init("debug");
        init("info");
        log::info!("still logging");
    }
}
