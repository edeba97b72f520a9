use clap::Parser;
use notesync::application::SyncService;
use notesync::cli::{format_report, Cli};
use notesync::domain::PushMode;
use notesync::error::SyncError;
use notesync::infrastructure::{detect_environment, home_dir, Git2Engine};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Failures are printed; the exit status stays zero
    if let Err(e) = run(cli) {
        println!("{}", e.display_with_suggestions());
    }
}

fn run(cli: Cli) -> Result<(), SyncError> {
    let push_mode = cli
        .push_mode
        .as_deref()
        .map(PushMode::from_str)
        .transpose()
        .map_err(SyncError::Config)?;

    let home = home_dir()?;
    let mut service = SyncService::new(Git2Engine, detect_environment(), std::io::stdout());
    let report = service.run_from_file(&home, &cli.config, push_mode)?;

    println!("{}", format_report(&report));
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "notesync=debug" } else { "error" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("NOTESYNC_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
