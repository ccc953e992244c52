use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use huffpack::config::{CodecConfig, HeaderFormat};
use huffpack::Codec;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Compress,
    Decompress,
}

#[derive(Parser, Debug)]
#[command(version, about = "Compress or decompress a file with Huffman coding")]
struct Args {
    /// Operation to perform
    #[arg(value_enum)]
    mode: Mode,
    /// File to read
    input: PathBuf,
    /// File to write
    output: PathBuf,
    /// JSON codec configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the line-oriented text header instead of the binary one
    #[arg(long)]
    legacy_header: bool,
    /// Print compression statistics as JSON
    #[arg(long)]
    stats: bool,
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => CodecConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CodecConfig::default(),
    };
    if args.legacy_header {
        config.header_format = HeaderFormat::Text;
    }
    let codec = Codec::new(config);

    match args.mode {
        Mode::Compress => {
            let report = codec
                .compress_file(&args.input, &args.output)
                .with_context(|| format!("compressing {}", args.input.display()))?;
            if args.stats {
                println!("{}", report.to_json()?);
            }
        }
        Mode::Decompress => {
            codec
                .decompress_file(&args.input, &args.output)
                .with_context(|| format!("decompressing {}", args.input.display()))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => {
            println!("Operation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
