//! arcpack CLI - extract, pack and list `.arc` archives.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use arcpack::container::{ArcReader, ArcWriter, PackOptions};

/// Tools for `.arc` game archives.
#[derive(Parser, Debug)]
#[command(name = "arcpack")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v for debug, -vv for trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every file of an archive
    Extract {
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// Directory to extract into
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Pack a directory into a new archive
    Pack {
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Store every file raw
        #[arg(long)]
        no_compression: bool,

        /// Files of at most this many bytes are stored raw
        #[arg(long, value_name = "BYTES", default_value_t = PackOptions::default().min_compress_size)]
        min_compress_size: usize,
    },

    /// Print an archive's table of contents
    List {
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    builder.parse_default_env();

    let _ = builder.try_init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Extract { archive, output } => extract(&archive, &output),
        Command::Pack {
            archive,
            dir,
            no_compression,
            min_compress_size,
        } => {
            let options = PackOptions {
                compression: !no_compression,
                min_compress_size,
            };
            pack(&archive, &dir, options)
        }
        Command::List { archive } => list(&archive),
    }
}

fn open_archive(path: &Path) -> Result<ArcReader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    ArcReader::open(BufReader::new(file))
        .with_context(|| format!("Failed to read archive {}", path.display()))
}

fn extract(archive: &Path, output: &Path) -> Result<()> {
    let mut reader = open_archive(archive)?;
    log::info!(
        "{}: {} files (unk1 {}, unk2 {})",
        archive.display(),
        reader.len(),
        reader.header().unk1,
        reader.header().unk2
    );

    let written = reader
        .extract_to(output)
        .with_context(|| format!("Failed to extract into {}", output.display()))?;

    log::info!("extracted {} files into {}", written.len(), output.display());
    Ok(())
}

fn pack(archive: &Path, dir: &Path, options: PackOptions) -> Result<()> {
    log::info!("packing {} into {}", dir.display(), archive.display());

    let mut writer = ArcWriter::new(options);
    let count = writer
        .add_directory(dir)
        .with_context(|| format!("Failed to pack {}", dir.display()))?;

    let file = File::create(archive)
        .with_context(|| format!("Failed to create {}", archive.display()))?;
    let size = writer
        .write_to(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", archive.display()))?;

    log::info!("packed {} files, {} bytes", count, size);
    Ok(())
}

fn list(archive: &Path) -> Result<()> {
    let reader = open_archive(archive)?;

    println!("{:>10} {:>10}  {:<4} name", "size", "stored", "kind");
    for entry in reader.entries() {
        println!(
            "{:>10} {:>10}  {:<4} {}",
            entry.decompressed_size(),
            entry.stored_size(),
            if entry.is_compressed() { "lz" } else { "raw" },
            entry.name
        );
    }

    Ok(())
}
