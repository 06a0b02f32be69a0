//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use burrows::compression::compress::{compress, mtf_encode_stream, transform};
use burrows::compression::decompress::{decompress, inverse_transform, mtf_decode_stream};
use burrows::tools::cli::{opts_init, Mode, Opts, Stage};
use burrows::tools::data_io::{open_input, open_output};
use burrows::Result;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Log to stderr: stdout carries the data. The real level is set in opts_init.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Unable to start the terminal logger.");
    }

    // Configuration errors stop us before any input is opened.
    let opts = match opts_init() {
        Ok(opts) => opts,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&opts) {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("Done.");
}

//----- Figure out what we need to do and go do it
fn run(opts: &Opts) -> Result<()> {
    let input = open_input(opts.input.as_deref())?;
    let output = open_output(opts.output.as_deref())?;

    let written = match (opts.stage, opts.op_mode) {
        (Stage::Bwt, Mode::Forward) => transform(input, output, &opts.algorithm)?,
        (Stage::Bwt, Mode::Inverse) => inverse_transform(input, output)?,
        (Stage::Mtf, Mode::Forward) => mtf_encode_stream(input, output)?,
        (Stage::Mtf, Mode::Inverse) => mtf_decode_stream(input, output)?,
        (Stage::Pipeline, Mode::Forward) => compress(input, output, &opts.algorithm)?,
        (Stage::Pipeline, Mode::Inverse) => decompress(input, output)?,
    };
    info!("{} {} wrote {} bytes.", opts.stage, opts.op_mode, written);
    Ok(())
}
