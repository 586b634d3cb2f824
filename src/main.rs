//! main.rs
//! Entry point for lst

use lister::config::Config;
use lister::core::{Lister, RenderMode, SystemAccounts};
use lister::utils::cli::{CliAction, handle_args, print_help, print_version};

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LISTER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let opts = match handle_args() {
        CliAction::List(opts) => opts,
        CliAction::Help => {
            print_help();
            return ExitCode::SUCCESS;
        }
        CliAction::Version => {
            print_version();
            return ExitCode::SUCCESS;
        }
        CliAction::Init => {
            let path = Config::default_path();
            return match Config::generate_default(&path) {
                Ok(()) => {
                    println!("Wrote default config to {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("lst: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
        CliAction::Invalid(msg) => {
            eprintln!("lst: {}", msg);
            eprintln!("Try 'lst --help' for more information.");
            return ExitCode::from(2);
        }
    };

    let mut config = Config::load();
    opts.apply(&mut config);

    let accounts = SystemAccounts::new();
    let lister = Lister::new(
        RenderMode::from_detailed(opts.detailed),
        config.formatter(),
        &accounts,
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = lister
        .list_targets(&opts.targets, &mut out)
        .and_then(|summary| out.flush().map(|_| summary));

    match result {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lst: write error: {}", e);
            ExitCode::FAILURE
        }
    }
}
