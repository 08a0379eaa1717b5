//! Timestamp overlay decode CLI
//!
//! Reads a single uncompressed screen grab, recovers the six encoded
//! pipeline clocks and prints them together with the derived latency.

use clap::{CommandFactory, Parser};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use timeoverlay_parse::{
    config::{EncodingParameters, FileConfig, Resolution},
    container, decode,
    decode::{ClockSet, CLOCK_NAMES},
};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "timeoverlay-parse",
    version = timeoverlay_parse::VERSION,
    about = "Decode pipeline clocks burned into a video frame"
)]
struct Args {
    /// The .ppm screen grab to decode.
    input: Option<PathBuf>,

    /// TOML file overriding the encoding parameters.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reject frames that are not exactly this size, e.g. 640x480.
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    expect_size: Option<Resolution>,
}

fn main() {
    // Initialize logging. Diagnostics go to stderr so the decoded
    // values on stdout stay machine-readable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    // No input file is a request for usage, not a failure.
    let Some(input) = args.input.clone() else {
        let mut command = Args::command();
        command.print_help().ok();
        std::process::exit(0);
    };

    let clocks = match run(&input, &args) {
        Ok(clocks) => clocks,
        Err(e) => {
            eprintln!("{}: {e}", input.display());
            std::process::exit(1);
        }
    };

    for (name, value) in CLOCK_NAMES.iter().zip(clocks.slots()) {
        println!("{name} = {value}");
    }
    println!("latency = {}", clocks.latency);
}

fn run(input: &Path, args: &Args) -> Result<ClockSet, Box<dyn std::error::Error>> {
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let params: EncodingParameters = file_config.encoding;
    params.validate()?;

    let file = std::fs::File::open(input).map_err(|e| format!("unable to open file: {e}"))?;
    let mut reader = BufReader::new(file);

    let (header, buffer) = container::parse(&mut reader)?;
    debug!(
        width = header.width,
        height = header.height,
        max_color_value = header.max_color_value,
        "parsed frame"
    );

    // CLI flag wins over the config file.
    if let Some(expected) = args.expect_size.or(file_config.expected_resolution) {
        decode::check_resolution(&header, expected)?;
    }

    Ok(decode::decode(&header, &buffer, &params)?)
}
