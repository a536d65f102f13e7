use runecho::cli::{failure_status, print_error, Cli};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the diagnostics filter (e.g. `runecho=debug`)
const LOG_ENV: &str = "RUNECHO_LOG";

fn main() {
    init_tracing();

    match Cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(failure_status(&e));
        }
    }
}

/// Diagnostics go to stderr and stay quiet unless asked for
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
