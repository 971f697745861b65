use clap::Parser;

fn main() {
    let cli = sentry_notify::cli::Cli::parse();
    if let Err(e) = sentry_notify::cmd::dispatch(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
