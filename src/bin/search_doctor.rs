//! CLI binary for search-doctor.

use clap::Parser;
use search_doctor::{DiagnosticRunner, DoctorConfig, report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Diagnose which search back-ends are reachable and returning results.
#[derive(Parser)]
#[command(name = "search-doctor", version, about)]
struct Cli {
    /// TOML file overriding probe endpoints, queries and timeouts.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("search_doctor=warn,search_probes=warn")),
        )
        .init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("{info}");
        eprintln!("{}", std::backtrace::Backtrace::force_capture());
    }));

    let cli = Cli::parse();
    let diagnostics = tokio::spawn(run(cli.config));

    tokio::select! {
        joined = diagnostics => match joined {
            Ok(Ok(())) => ExitCode::SUCCESS,
            Ok(Err(err)) => {
                println!("\n[✗] Fatal error: {err}");
                eprintln!("{err:?}");
                ExitCode::FAILURE
            }
            Err(join_err) => {
                println!("\n[✗] Fatal error: {join_err}");
                ExitCode::FAILURE
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            println!("\n\n[!] Diagnostics interrupted");
            ExitCode::SUCCESS
        }
    }
}

async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(ref path) => DoctorConfig::from_file(path)?,
        None => DoctorConfig::default(),
    };
    let runner = DiagnosticRunner::new(config)?;

    let mut stdout = std::io::stdout();
    report::write_banner(&mut stdout)?;
    let outcomes = runner.run(&mut stdout).await?;
    report::write_report(&outcomes, &mut stdout)?;
    Ok(())
}
