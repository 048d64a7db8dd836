use std::path::PathBuf;

use clap::Parser;

use stopwatch_core::DEFAULT_TICK_MS;

#[derive(Debug, Parser)]
#[command(name = "stopwatch", version, about = "Terminal stopwatch with laps")]
pub struct Config {
    /// Where preferences (and the log, by default) are kept
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Pump interval; each pump advances the stopwatch by the same amount
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TICK_MS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Log file, defaults to `<data-dir>/stopwatch.log`
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["stopwatch"]).unwrap();
        assert_eq!(config.tick_ms, 10);
        assert!(config.data_dir.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "stopwatch",
            "--data-dir",
            "/tmp/sw",
            "--tick-ms",
            "100",
        ])
        .unwrap();
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/sw")));
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!(Config::try_parse_from(["stopwatch", "--tick-ms", "0"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
