use log::LevelFilter;

/// Initialises `env_logger` at the configured level. `RUST_LOG`, when set,
/// takes precedence.
pub fn setup_logger(config: &super::config::Config) {
    env_logger::Builder::new()
        .filter_level(level_filter(&config.log_level))
        .parse_default_env()
        .init();
}

pub fn level_filter(log_level: &str) -> LevelFilter {
    match log_level.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Off,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_levels_and_silences_the_rest() {
        assert_eq!(level_filter("debug"), LevelFilter::Debug);
        assert_eq!(level_filter("WARN"), LevelFilter::Warn);
        assert_eq!(level_filter("off"), LevelFilter::Off);
        assert_eq!(level_filter("verbose"), LevelFilter::Off);
    }
}
