//! redarc - pack and unpack Red Archive files.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{UnpackOptions, cmd_list, cmd_pack, cmd_test, cmd_unpack};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "redarc")]
#[command(author, version, about = "Red Archive packer and unpacker")]
#[command(long_about = "
Packs the files of a directory into a Red Archive and unpacks archives
whose entries are stored, byte-run coded (level 1) or dictionary coded
(levels 2-6).

Examples:
  redarc pack assets/ ASSETS.RA
  redarc unpack ASSETS.RA out/
  redarc list ASSETS.RA --json
  redarc test ASSETS.RA
")]
struct Cli {
    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack the regular files of a directory into an archive
    #[command(alias = "p")]
    Pack {
        /// Directory whose files are packed
        directory: PathBuf,

        /// Archive to create
        archive: PathBuf,

        /// Show a progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Unpack an archive into a directory
    #[command(alias = "x")]
    Unpack {
        /// Archive to unpack
        archive: PathBuf,

        /// Destination directory (created if missing)
        directory: PathBuf,

        /// Show a progress bar
        #[arg(short = 'P', long)]
        progress: bool,

        /// Decode entries on all cores (needs the `parallel` feature)
        #[arg(long)]
        parallel: bool,
    },

    /// List the entries of an archive
    #[command(alias = "l")]
    List {
        /// Archive to list
        archive: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Decode every entry without writing anything
    #[command(alias = "t")]
    Test {
        /// Archive to test
        archive: PathBuf,
    },
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let quiet = cli.quiet;
    let result = match cli.command {
        Commands::Pack {
            directory,
            archive,
            progress,
        } => cmd_pack(&directory, &archive, progress && !quiet, quiet),
        Commands::Unpack {
            archive,
            directory,
            progress,
            parallel,
        } => {
            let options = UnpackOptions {
                progress: progress && !quiet,
                quiet,
                parallel,
            };
            cmd_unpack(&archive, &directory, &options)
        }
        Commands::List { archive, json } => cmd_list(&archive, json),
        Commands::Test { archive } => cmd_test(&archive, quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
