//! OxiLZ CLI - raw LZ77 stream tool
//!
//! Compresses, decompresses and round-trip checks files with the OxiLZ codec.

mod commands;
mod options;

use clap::{Parser, Subcommand};
use commands::{cmd_compress, cmd_decompress, cmd_roundtrip};
use options::CodecArgs;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "oxilz")]
#[command(author, version, about = "Hash-chained sliding-dictionary LZ77 codec")]
#[command(long_about = "
OxiLZ writes raw LZ77 streams: no header, no checksum. The same codec
settings must be given when compressing and decompressing.

Examples:
  oxilz roundtrip book.txt
  oxilz roundtrip --preset best --json book.txt
  oxilz compress book.txt book.lz
  oxilz decompress book.lz book.out --size 120000
  oxilz compress --dictionary-bits 15 --sector-bits 11 book.txt book.lz
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    codec: CodecArgs,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress and decompress a file in memory and compare the result
    #[command(alias = "r")]
    Roundtrip {
        /// File to check
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Compress a file into a raw stream
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Stream file to write
        output: PathBuf,
    },

    /// Decompress a raw stream
    #[command(alias = "d")]
    Decompress {
        /// Stream file to read
        input: PathBuf,

        /// File to write
        output: PathBuf,

        /// Expected decompressed size in bytes
        #[arg(short, long)]
        size: usize,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: logging already initialized");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = cli.codec.to_config();

    let result = match cli.command {
        Commands::Roundtrip { file, json } => cmd_roundtrip(&file, &config, json),
        Commands::Compress { input, output } => cmd_compress(&input, &output, &config),
        Commands::Decompress {
            input,
            output,
            size,
        } => cmd_decompress(&input, &output, size, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
