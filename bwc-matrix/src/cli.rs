/// # bwc-matrix CLI Interface (Module)
///
/// Command parsing and orchestration for the `bwc-matrix` binary.
///
/// All classification logic lives in [`bwc-matrix-core`]; this module only
/// loads the config, builds the matrix, and prints what was asked for.
///
/// ## Subcommands
/// - `matrix`: the full compatibility matrix as text or JSON
/// - `info`: branch and project of a single version
/// - `previous-unreleased`: unreleased versions other than current, one per line
/// - `check`: compares released bookkeeping against a list of published versions
///
/// For programmatic and integration use call [`run`] with a constructed [`Cli`].
///
/// [`bwc-matrix-core`]: ../../bwc-matrix-core/
use crate::load_config::{load_bwc_versions, load_config};
use crate::report::MatrixReport;
use anyhow::{Context, Result};
use bwc_matrix_core::{BwcProject, FileReleaseRegistry, UnreleasedVersionInfo, Version};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI for bwc-matrix: backward-compatibility test planning for a release line.
#[derive(Parser)]
#[clap(
    name = "bwc-matrix",
    version,
    about = "Classify declared versions into released/unreleased and derive the BWC test matrix"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full compatibility matrix
    Matrix {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the branch and build project of one version
    Info {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Version to look up, e.g. 7.10.2
        version: Version,
    },
    /// List unreleased versions other than the current one
    PreviousUnreleased {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Only versions built by this project path, e.g. :distribution:bwc:bugfix
        #[clap(long)]
        project: Option<String>,
    },
    /// Verify released bookkeeping against the published versions
    Check {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Published versions file; overrides `authoritative.released`
        #[clap(long)]
        released: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Matrix { config, format } => {
            let config = load_config(config)?;
            let bwc = load_bwc_versions(&config)?;
            tracing::info!(command = "matrix", current = %bwc.current(), "Rendering matrix");
            let report = MatrixReport::new(&bwc);
            match format {
                OutputFormat::Text => print!("{report}"),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }
            Ok(())
        }
        Commands::Info { config, version } => {
            let config = load_config(config)?;
            let bwc = load_bwc_versions(&config)?;
            tracing::info!(command = "info", %version, "Looking up version");
            if let Some(info) = bwc.unreleased_info(&version) {
                println!("{}", info_line(info));
                Ok(())
            } else if bwc.retained(&version) {
                println!("{version} is released");
                Ok(())
            } else {
                tracing::error!(command = "info", %version, "Version is not in the matrix");
                anyhow::bail!("{version} is not a retained version of {}", bwc.current())
            }
        }
        Commands::PreviousUnreleased { config, project } => {
            let project = project
                .as_deref()
                .map(str::parse::<BwcProject>)
                .transpose()?;
            let config = load_config(config)?;
            let bwc = load_bwc_versions(&config)?;
            tracing::info!(command = "previous-unreleased", ?project, "Listing previous unreleased");
            for info in bwc
                .previous_unreleased()
                .filter(|info| project.map_or(true, |p| info.project == p))
            {
                println!("{}", info_line(info));
            }
            Ok(())
        }
        Commands::Check { config, released } => {
            let config = load_config(config)?;
            let released = released
                .or_else(|| config.authoritative.released.clone())
                .context("no published versions file: pass --released or set authoritative.released")?;
            let bwc = load_bwc_versions(&config)?;
            let registry = FileReleaseRegistry::new(&released);
            match bwc.check_against(&registry) {
                Ok(()) => {
                    tracing::info!(command = "check", registry = %released.display(), "Bookkeeping consistent");
                    println!("released versions are consistent");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "check", error = %e, "Bookkeeping out of date");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}

fn info_line(info: &UnreleasedVersionInfo) -> String {
    format!("{} {} {}", info.version, info.branch, info.project)
}
