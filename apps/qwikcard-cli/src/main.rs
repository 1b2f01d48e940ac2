use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod code;
mod commands;
mod util;

use commands::{ConfigCmd, CreateArgs, ExportArgs, ShowArgs, TypesArgs};
use util::GlobalArgs;

#[derive(Parser)]
#[command(
    name = "qwikcard",
    version,
    about = "Create contact profiles and export their QR codes"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new profile, print its link and save the QR code as PNG
    Create(CreateArgs),
    /// Fetch a stored profile and print its action links
    Show(ShowArgs),
    /// Rasterize an existing QR code SVG to a 256x256 PNG
    Export(ExportArgs),
    /// List the supported contact field types
    Types(TypesArgs),
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    qwikcard_otel::init_with_default("warn");
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Types(args) => commands::types::execute(&args),
        Commands::Config { cmd } => commands::config::execute(&cli.global, cmd),
        Commands::Export(args) => {
            let config = util::resolve_config(&cli.global)?;
            commands::export::execute(&config, &args)
        }
        Commands::Create(args) => {
            let config = util::resolve_config(&cli.global)?;
            block_on(commands::create::execute(&config, &args))
        }
        Commands::Show(args) => {
            let config = util::resolve_config(&cli.global)?;
            block_on(commands::show::execute(&config, &args))
        }
    }
}

/// Network commands run on a single-threaded runtime; each awaits one
/// request at a time.
fn block_on<F: std::future::Future<Output = Result<()>>>(fut: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    runtime.block_on(fut)
}
