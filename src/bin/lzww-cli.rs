//! lzww-cli - Command-line interface for the Wild World text decoder
//!
//! Decodes one or more LZSS text containers in place, or reports on a
//! container without touching it.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lzww::{
    decode_bytes, decode_into, LzwwError, Sink, Termination, MAX_FILE_SIZE, MIN_FILE_SIZE,
};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lzww-cli")]
#[command(about = "A CLI tool for decoding Wild World LZSS text containers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one or more containers, overwriting each file in place
    Decode {
        /// Container files to decode
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write decoded output here instead of in place (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect a container without writing anything
    Info {
        /// Container file to analyze
        input: PathBuf,
    },
}

/// File-backed sink: reset truncates, append writes in order
struct FileSink<'a> {
    path: &'a Path,
    file: Option<File>,
}

impl<'a> FileSink<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, file: None }
    }
}

impl Sink for FileSink<'_> {
    fn reset(&mut self) -> lzww::Result<()> {
        self.file = Some(File::create(self.path)?);
        Ok(())
    }

    fn append(&mut self, bytes: &[u8]) -> lzww::Result<()> {
        let file = self
            .file
            .as_mut()
            .expect("reset is called before the first append");
        file.write_all(bytes)?;
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode { files, output } => {
            decode_batch(&files, output.as_deref(), cli.verbose, cli.quiet)
        }
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Read a container, enforcing the size bounds the format defines
fn load_container(path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("Input file '{}' does not exist", path.display()).into());
    }

    let data = fs::read(path)?;
    if data.len() < MIN_FILE_SIZE || data.len() > MAX_FILE_SIZE {
        return Err(Box::new(LzwwError::SizeOutOfRange(data.len())));
    }

    Ok(data)
}

/// Decode each file independently; one failure does not stop the batch
fn decode_batch(
    files: &[PathBuf],
    output: Option<&Path>,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.is_some() && files.len() != 1 {
        return Err("--output requires exactly one input file".into());
    }

    let progress = if !quiet && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut failures = 0usize;
    for file in files {
        if let Some(ref pb) = progress {
            pb.set_message(file.display().to_string());
        }

        let destination = output.unwrap_or(file);
        if let Err(e) = decode_file(file, destination, verbose, quiet) {
            eprintln!("'{}': {}", file.display(), e);
            failures += 1;
        }

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    if failures > 0 {
        return Err(format!("{} of {} files failed to decode", failures, files.len()).into());
    }
    Ok(())
}

fn decode_file(
    input: &Path,
    output: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Decoding '{}' to '{}'", input.display(), output.display());
    }

    let start_time = Instant::now();
    let container = load_container(input)?;
    let input_size = container.len();

    // The whole container is in memory, so decoding into the input path
    // is safe even though the sink truncates it.
    let mut sink = FileSink::new(output);
    let report = decode_into(&container, &mut sink)?;

    for warning in &report.warnings {
        eprintln!("'{}': warning: {}", input.display(), warning);
    }

    if !quiet {
        let elapsed = start_time.elapsed();
        println!(
            "'{}': {} -> {} bytes, {} chunk(s)",
            input.display(),
            input_size,
            report.stats.output_bytes,
            report.chunks,
        );
        if verbose {
            println!(
                "  literals: {}, matches: {}, time: {:.2?}",
                report.stats.literal_count, report.stats.match_count, elapsed
            );
        }
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let container = load_container(input)?;
    let file_size = container.len();

    println!("Wild World Container Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);

    match lzww::locate_first_chunk(&container) {
        Ok(offset) => println!("  First chunk: offset {}", offset),
        Err(e) => {
            println!("  Status: ✗ {}", e);
            return Ok(());
        }
    }

    // Dry-run decode to report sizes and stream health
    match decode_bytes(&container) {
        Ok(output) => {
            println!("  Chunks: {}", output.report.chunks);
            println!("  Decoded Size: {} bytes", output.data.len());
            println!(
                "  Termination: {}",
                match output.report.termination {
                    Termination::Clean => "clean end",
                    Termination::InputExhausted => "input exhausted mid-stream",
                    Termination::TrailingChunkIgnored => "trailing chunk ignored",
                }
            );
            if output.report.is_clean() {
                println!("  Status: ✓ Valid container");
            } else {
                println!("  Status: ⚠ Decoded with warnings");
                for warning in &output.report.warnings {
                    println!("    warning: {}", warning);
                }
            }
            if verbose {
                println!(
                    "  Literals: {}, Matches: {}",
                    output.report.stats.literal_count, output.report.stats.match_count
                );
            }
        }
        Err(e) => {
            println!("  Status: ✗ {}", e);
        }
    }

    Ok(())
}
