use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

/// Slots in the ring when `--buffer-size` is not given.
pub const DEFAULT_BUFFER_SIZE: usize = 5;

/// Producer/consumer simulation over a bounded ring buffer, with consumers
/// flagging the primes they pull out.
#[derive(Debug, Parser)]
#[command(name = "prime_buffer", version, about)]
pub struct SimulationArgs {
    /// How long the simulation runs, in seconds.
    pub duration: u64,

    /// Upper bound of the random pause before each buffer operation, in milliseconds.
    pub max_wait: u64,

    /// Number of producer threads.
    pub producers: usize,

    /// Number of consumer threads.
    pub consumers: usize,

    /// `yes` traces every insert and remove; any other value keeps quiet.
    pub verbose: String,

    /// Slots in the ring buffer. One of them always stays empty.
    #[arg(
        long,
        default_value_t = DEFAULT_BUFFER_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub buffer_size: usize,
}

/// Validated run parameters handed to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub duration: Duration,
    pub max_wait: Duration,
    pub producers: usize,
    pub consumers: usize,
    pub capacity: usize,
    pub verbose: bool,
}

impl From<SimulationArgs> for SimulationConfig {
    fn from(args: SimulationArgs) -> Self {
        SimulationConfig {
            duration: Duration::from_secs(args.duration),
            max_wait: Duration::from_millis(args.max_wait),
            producers: args.producers,
            consumers: args.consumers,
            capacity: args.buffer_size,
            verbose: args.verbose == "yes",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::error::ErrorKind;
    use clap::Parser;

    use super::{SimulationArgs, SimulationConfig, DEFAULT_BUFFER_SIZE};

    fn parse(args: &[&str]) -> Result<SimulationConfig, clap::Error> {
        SimulationArgs::try_parse_from(std::iter::once("prime_buffer").chain(args.iter().copied()))
            .map(SimulationConfig::from)
    }

    #[test]
    fn test_five_positionals() {
        let config = parse(&["2", "100", "3", "4", "yes"]).expect("arguments were rejected");
        assert_eq!(
            SimulationConfig {
                duration: Duration::from_secs(2),
                max_wait: Duration::from_millis(100),
                producers: 3,
                consumers: 4,
                capacity: DEFAULT_BUFFER_SIZE,
                verbose: true,
            },
            config
        );
    }

    #[test]
    fn test_verbose_needs_exact_yes() {
        for flag in ["no", "Yes", "y", "YES", "true"] {
            let config = parse(&["1", "10", "1", "1", flag]).expect("arguments were rejected");
            assert!(!config.verbose, "{} enabled verbose output", flag);
        }
    }

    #[test]
    fn test_wrong_argument_count() {
        let error = parse(&["2", "100", "1"]).expect_err("three arguments were accepted");
        assert_eq!(ErrorKind::MissingRequiredArgument, error.kind());

        assert!(parse(&["2", "100", "1", "1", "no", "extra"]).is_err());
    }

    #[test]
    fn test_non_numeric_count() {
        let error = parse(&["2", "100", "many", "1", "no"]).expect_err("'many' was accepted");
        assert_eq!(ErrorKind::ValueValidation, error.kind());
    }

    #[test]
    fn test_buffer_size_option() {
        let config =
            parse(&["--buffer-size", "8", "1", "10", "0", "1", "no"]).expect("arguments were rejected");
        assert_eq!(8, config.capacity);
        assert_eq!(0, config.producers);

        let error = parse(&["--buffer-size", "0", "1", "10", "1", "1", "no"])
            .expect_err("an empty buffer was accepted");
        assert_eq!(ErrorKind::ValueValidation, error.kind());
    }
}
