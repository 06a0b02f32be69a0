use std::{ffi::OsString, fmt::Display, fmt::Formatter, str::FromStr};

use clap::Parser;
use log::info;

use crate::error::{BurrowsError, Result};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Forward (transform / encode) or inverse (invert / decode). Selected by the literal
/// tokens `-` and `+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Forward,
    Inverse,
}

impl FromStr for Mode {
    type Err = BurrowsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(Mode::Forward),
            "+" => Ok(Mode::Inverse),
            other => Err(BurrowsError::InvalidArgument(format!(
                "direction must be '-' or '+', got '{}'",
                other
            ))),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Which part of the front-end to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Block sort only
    Bwt,
    /// Move-to-front only
    Mtf,
    /// Block sort followed by move-to-front
    Pipeline,
}

impl FromStr for Stage {
    type Err = BurrowsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bwt" => Ok(Stage::Bwt),
            "mtf" => Ok(Stage::Mtf),
            "pipeline" => Ok(Stage::Pipeline),
            other => Err(BurrowsError::InvalidArgument(format!(
                "unknown stage '{}' (expected bwt, mtf or pipeline)",
                other
            ))),
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the rotation ranking algorithms
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Algorithms {
    /// Pick per block based on how repetitive the data looks
    Auto,
    /// Comparison sort of rotation offsets
    Simple,
    /// Prefix doubling with counting sorts
    Doubling,
}

impl FromStr for Algorithms {
    type Err = BurrowsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Algorithms::Auto),
            "simple" => Ok(Algorithms::Simple),
            "doubling" => Ok(Algorithms::Doubling),
            other => Err(BurrowsError::InvalidArgument(format!(
                "unknown algorithm '{}' (expected auto, simple or doubling)",
                other
            ))),
        }
    }
}

impl Display for Algorithms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Opts {
    /// Forward or inverse
    pub op_mode: Mode,
    /// Stage(s) to run
    pub stage: Stage,
    /// Ranking algorithm used by the forward block sort
    pub algorithm: Algorithms,
    /// Input file, or stdin when None
    pub input: Option<String>,
    /// Output file, or stdout when None
    pub output: Option<String>,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl Opts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Forward,
            stage: Stage::Pipeline,
            algorithm: Algorithms::Auto,
            input: None,
            output: None,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Block-sorting transform and move-to-front coder",
    long_about = "
    Runs the Burrows-Wheeler block sort and/or the move-to-front coder over one
    in-memory block. Reads a file or standard input and writes standard output
    unless --output is given.

    '-' transforms (encodes), '+' inverts (decodes)."
)]
pub struct Args {
    /// '-' to transform / encode, '+' to invert / decode
    #[clap(value_name = "DIRECTION")]
    pub direction: String,

    /// Input file (standard input when omitted)
    #[clap(value_name = "INPUT")]
    pub input: Option<String>,

    /// Output file (standard output when omitted)
    #[clap(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Stage to run: bwt, mtf or pipeline
    #[clap(short = 's', long = "stage", default_value = "pipeline")]
    pub stage: String,

    /// Rotation ranking algorithm: auto, simple or doubling
    #[clap(short = 'a', long = "algorithm", default_value = "auto")]
    pub algorithm: String,

    /// Sets verbosity. -v shows warnings, -vvvv is chatty
    #[clap(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[clap(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl TryFrom<Args> for Opts {
    type Error = BurrowsError;

    /// Validate every token before any input is opened.
    fn try_from(args: Args) -> Result<Self> {
        let verbose = if args.quiet {
            Verbosity::Quiet
        } else {
            match args.verbose {
                0 => Verbosity::Errors,
                1 => Verbosity::Warnings,
                2 => Verbosity::Info,
                3 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        };
        Ok(Opts {
            op_mode: args.direction.parse()?,
            stage: args.stage.parse()?,
            algorithm: args.algorithm.parse()?,
            input: args.input,
            output: args.output,
            verbose,
        })
    }
}

/// Parse a full argument list (program name first) into `Opts`.
///
/// Usage errors from clap become `InvalidArgument`, so they share the exit status of every other
/// error. `--help` and `--version` print and exit here.
pub fn parse_opts<I, T>(argv: I) -> Result<Opts>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let msg = e.to_string();
            return Err(BurrowsError::InvalidArgument(msg.trim_end().to_string()));
        }
    };
    Opts::try_from(args)
}

/// Parse the process arguments into `Opts` and set the log level.
pub fn opts_init() -> Result<Opts> {
    let opts = parse_opts(std::env::args_os())?;
    log::set_max_level(opts.verbose.level_filter());

    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Stage set to {}", opts.stage);
    match &opts.input {
        Some(s) => info!("Getting input from the file {}", s),
        None => info!("Getting input from stdin"),
    }
    Ok(opts)
}
