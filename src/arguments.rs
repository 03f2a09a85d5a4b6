use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use lazy_static::lazy_static;
use regex::Regex;

use super::{stdin_line, SearchConfig, SolveError};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Make the drops one at a time, waiting `delay` between two drops
    Step,
    /// Solve the whole search at once
    Batch,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Arguments {
    /// Number of floors in the building. Floors are numbered from 0.
    pub floors: Option<u64>,

    /// The lowest floor from which a probe breaks.
    /// It is only used to answer the drops; the solver never looks at it.
    pub secret: Option<u64>,

    /// Whether to step through the search drop by drop, or to solve it at once
    #[arg(short, long, value_enum, default_value_t = Mode::Step)]
    pub mode: Mode,

    /// Amount of time to wait between two drops in step mode, such as '300ms' or '1s'
    #[arg(short, long, default_value = "0ms", value_parser = parse_duration)]
    pub delay: Duration,

    /// Solve the search for every possible breaking floor of the building,
    /// checking that stepping and batch solving agree, and report statistics
    #[arg(long, conflicts_with = "scenarios")]
    pub sweep: bool,

    /// A YAML file containing a list of searches to solve, such as
    /// `[{floors: 10, secret: 7}, {floors: 100, secret: 42}]`
    #[arg(long)]
    pub scenarios: Option<PathBuf>,

    /// File to which the report should be saved, as JSON,
    /// or as YAML if the file name ends with .yaml or .yml
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// Level of logging verbosity. Set it to "debug" to see every drop.
    #[arg(long, default_value = "warn")]
    pub logging: String,
}

impl Default for Arguments {
    fn default() -> Self {
        Arguments {
            floors: None,
            secret: None,
            mode: Mode::Step,
            delay: Duration::ZERO,
            sweep: false,
            scenarios: None,
            outfile: None,
            logging: "warn".to_string(),
        }
    }
}

impl Arguments {
    pub fn choose_floors(&self) -> Result<u64, SolveError> {
        match self.floors {
            Some(floors) => Ok(floors),
            None => {
                println!("How many floors does the building have? ");
                parse_floor(&stdin_line()?)
            }
        }
    }

    pub fn choose_secret(&self) -> Result<u64, SolveError> {
        match self.secret {
            Some(secret) => Ok(secret),
            None => {
                println!("From which floor does the probe break? ");
                parse_floor(&stdin_line()?)
            }
        }
    }

    pub fn choose_config(&self) -> Result<SearchConfig, SolveError> {
        let floors = self.choose_floors()?;
        let secret = self.choose_secret()?;
        Ok(SearchConfig::new(floors, secret)?)
    }
}

fn parse_floor(s: &str) -> Result<u64, SolveError> {
    let input = s.trim();
    input.parse().map_err(|_| SolveError::MalformedNumber { input: input.into() })
}

fn parse_duration(s: &str) -> Result<Duration, &'static str> {
    lazy_static! {
        static ref DURATION_RE: Regex = Regex::new(r"^(\d+)\s*(min|s|ms|ns)$").unwrap();
    }
    let err_msg = "Invalid duration. \
                        A duration is a number followed by a unit, such as '10ms' or '5s'";
    let caps = DURATION_RE.captures(s).ok_or(err_msg)?;
    let val: u64 = caps[1].parse().map_err(|_| err_msg)?;
    match &caps[2] {
        "min" => Ok(Duration::from_secs(60 * val)),
        "s" => Ok(Duration::from_secs(val)),
        "ms" => Ok(Duration::from_millis(val)),
        "ns" => Ok(Duration::from_nanos(val)),
        _ => Err(err_msg),
    }
}

#[test]
fn test_floors_and_mode() -> Result<(), clap::Error> {
    let args = Arguments::try_parse_from(["eggdrop-rs", "--mode", "batch", "-d", "250ms", "100", "42"])?;
    assert_eq!(args.floors, Some(100));
    assert_eq!(args.secret, Some(42));
    assert_eq!(args.mode, Mode::Batch);
    assert_eq!(args.delay, Duration::from_millis(250));
    assert_eq!(args.choose_config().unwrap(), SearchConfig::new(100, 42).unwrap());
    Ok(())
}

#[test]
fn test_defaults_match_command_line() -> Result<(), clap::Error> {
    let parsed = Arguments::try_parse_from(["eggdrop-rs"])?;
    let default = Arguments::default();
    assert_eq!(parsed.mode, default.mode);
    assert_eq!(parsed.delay, default.delay);
    assert_eq!(parsed.logging, default.logging);
    assert!(!parsed.sweep);
    Ok(())
}

#[test]
fn test_sweep_conflicts_with_scenarios() {
    let res = Arguments::try_parse_from(["eggdrop-rs", "--sweep", "--scenarios", "a.yaml", "10"]);
    assert!(res.is_err());
}

#[test]
fn test_invalid_config_from_arguments() {
    let args = Arguments { floors: Some(10), secret: Some(10), ..Default::default() };
    assert!(matches!(args.choose_config(), Err(SolveError::InvalidConfiguration { .. })));
}

#[test]
fn test_parse_floor() {
    assert_eq!(parse_floor(" 12\n").unwrap(), 12);
    assert!(matches!(parse_floor("-1"), Err(SolveError::MalformedNumber { .. })));
}

#[test]
fn test_parse_duration() {
    assert_eq!(parse_duration("2s"), Ok(Duration::from_secs(2)));
    assert_eq!(parse_duration("29 s"), Ok(Duration::from_secs(29)));
    assert_eq!(parse_duration("2min"), Ok(Duration::from_secs(120)));
    assert_eq!(parse_duration("1000 ms"), Ok(Duration::from_secs(1)));
    assert!(parse_duration("1 2 ms").is_err());
    assert!(parse_duration("ms").is_err());
    assert!(parse_duration("").is_err());
}
