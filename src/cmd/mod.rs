//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function sets up logging and routes the parsed CLI
//! to the appropriate subcommand handler: [`send`], [`resolve`],
//! [`validate`], or [`init`]. Each handler lives in its own submodule.

pub mod init;
pub mod resolve;
pub mod send;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::NotifierError;
use crate::logging;

pub fn dispatch(cli: Cli) -> Result<(), NotifierError> {
    let log_format = logging::resolve_format(cli.pretty, cli.json);
    logging::init(&cli.log_level, log_format);

    match cli.command {
        Some(Commands::Send(args)) => send::execute(*args),
        Some(Commands::Resolve(ref args)) => resolve::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Init(ref args)) => init::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  sentry-notify v{version} \u{2014} best-effort Sentry notifications\n\n  \
         No command provided. To get started:\n\n    \
         sentry-notify init                   Generate a starter config\n    \
         sentry-notify send \"Task failed\"     Send a notification\n    \
         sentry-notify resolve                Show the effective client settings\n    \
         sentry-notify --help                 See all commands and options\n"
    );
}
