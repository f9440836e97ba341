use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use minihttpd::net::server::Server;
use minihttpd::{ServerConfig, service};

#[derive(Parser)]
#[command(name = "minihttpd")]
#[command(about = "Serve one HTTP request from stdin/stdout out of a document root", long_about = None)]
struct Cli {
    /// Directory the request path is resolved against
    docroot: PathBuf,

    /// TOML file overriding the default limits
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Accept TCP connections one after another instead of using stdin/stdout
    #[arg(short, long)]
    listen: bool,
}

fn main() -> ExitCode {
    // stdout carries the response, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = cli
        .config
        .as_deref()
        .map(ServerConfig::from_file)
        .unwrap_or_default();

    if !cli.docroot.is_dir() {
        error!(docroot = %cli.docroot.display(), "document root is not a directory");
        return ExitCode::FAILURE;
    }

    if cli.listen {
        return match Server::new(config, cli.docroot).run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!(%err, "listener failed");
                ExitCode::FAILURE
            }
        };
    }

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    match service(stdin, stdout, &cli.docroot, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "request aborted");
            ExitCode::FAILURE
        }
    }
}
