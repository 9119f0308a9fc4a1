//! idefix-setup: generate the Makefile for an Idefix problem directory.

mod args;
mod configure;

use std::path::PathBuf;
use std::process;

use clap::builder::PossibleValuesParser;
use clap::Parser;

use configure::Request;

/// Environment variable naming the Idefix source tree.
const ROOT_ENV: &str = "IDEFIX_DIR";

#[derive(Parser)]
#[command(name = "idefix-setup", version, about = "Configure an Idefix build directory")]
struct Cli {
    /// Target directory (default: current directory)
    directory: Option<PathBuf>,
    /// Enable MHD
    #[arg(long)]
    mhd: bool,
    /// Deprecated: request a GPU architecture with -arch instead
    #[arg(long)]
    gpu: bool,
    /// Override the default compiler
    #[arg(long, value_name = "CXX")]
    cxx: Option<String>,
    /// Target Kokkos architecture (up to one CPU and one GPU)
    #[arg(
        long = "arch",
        value_name = "ARCH",
        num_args = 1..,
        value_parser = PossibleValuesParser::new(idefix_arch::all_archs())
    )]
    archs: Vec<String>,
    /// Enable OpenMP parallelism (not available with GPU architectures)
    #[arg(long)]
    openmp: bool,
    /// Enable MPI parallelism
    #[arg(long)]
    mpi: bool,
    /// Print debug diagnostics
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse_from(args::normalize(std::env::args_os()));
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(root) = std::env::var_os(ROOT_ENV) else {
        anyhow::bail!("{ROOT_ENV} environment variable is not defined.");
    };

    let directory = match cli.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let request = Request {
        directory,
        mhd: cli.mhd,
        gpu: cli.gpu,
        cxx: cli.cxx,
        archs: cli.archs,
        openmp: cli.openmp,
        mpi: cli.mpi,
    };
    let report = configure::run(&PathBuf::from(root), request)?;
    println!("{report}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}
