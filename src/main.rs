use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use zonescan::export::{self, ExportFormat, PreviewLimits};
use zonescan::{ReportBuilder, ScanConfig, Scanner};

#[derive(Parser)]
#[command(name = "zonescan")]
#[command(version)]
#[command(about = "Classifies a source tree into architectural zones and finds dead files", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project and report zones and dead files
    Scan {
        /// Project root (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// TOML file overriding the default conventions
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for the JSON artifact (defaults to <root>/logs)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Worker threads for per-file analysis
        #[arg(short, long)]
        threads: Option<usize>,

        /// Summary format printed to stdout
        #[arg(short, long, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,

        /// Print the summary without writing the artifact
        #[arg(long)]
        no_write: bool,
    },
    /// Show version information
    Version,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "zonescan=debug" } else { "zonescan=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Scan {
            path,
            config,
            out_dir,
            threads,
            format,
            no_write,
        }) => {
            let mut scan_config = match &config {
                Some(file) => ScanConfig::from_file(file)
                    .with_context(|| format!("loading config {}", file.display()))?,
                None => ScanConfig::default(),
            };
            if threads.is_some() {
                scan_config.threads = threads;
            }
            if out_dir.is_some() {
                scan_config.output_dir = out_dir;
            }

            let limits = PreviewLimits::from_config(&scan_config);
            let artifact_dir = scan_config.effective_output_dir(&path);
            let scanner = Scanner::new(scan_config).context("compiling scan conventions")?;
            let output = scanner
                .scan(&path)
                .with_context(|| format!("scanning {}", path.display()))?;
            let report = ReportBuilder::new().build(&output, Local::now());

            let stdout = io::stdout();
            export::export(format, &report, limits, &mut stdout.lock())
                .context("writing summary")?;

            if !no_write {
                let written = export::write_artifact(&report, &artifact_dir)
                    .with_context(|| format!("writing artifact to {}", artifact_dir.display()))?;
                info!(path = %written.display(), "report saved");
            }
        }
        Some(Commands::Version) => {
            println!("zonescan v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("zonescan - dual-architecture source scanner");
            println!("Run 'zonescan scan [PATH]' to scan a project");
            println!("Run 'zonescan --help' for more information");
        }
    }

    Ok(())
}
