//! Interactive wizard for step-by-step config generation.

use std::path::{Path, PathBuf};

use console::style;
use dialoguer::{Confirm, Input, Password, Select};

use crate::cli::{ConfigFormat, InitArgs};
use crate::config::model::ConfigFile;
use crate::config::validation::{validate, validate_dsn};
use crate::config::{KEY_DSN, KEY_ENVIRONMENT, KEY_NAME, KEY_RELEASE, KEY_SITE, SENTRY_SECTION};
use crate::error::NotifierError;

use super::serialize::serialize_config;

/// Map a `dialoguer::Error` to a `NotifierError`.
fn map_prompt_err(e: dialoguer::Error) -> NotifierError {
    NotifierError::Io(std::io::Error::other(e.to_string()))
}

pub fn run(args: &InitArgs) -> Result<(), NotifierError> {
    // Ensure we're running in an interactive terminal
    if !console::Term::stdout().is_term() {
        return Err(NotifierError::Io(std::io::Error::other(
            "interactive mode requires a terminal (TTY). Use sentry-notify init without -i for non-interactive mode.",
        )));
    }

    println!(
        "\n  {} Config Wizard\n  {}\n",
        style("sentry-notify").cyan().bold(),
        style("─────────────────────────").dim()
    );

    // Step 1: Output settings
    println!("  {}\n", style("Step 1: Output").bold());
    let format = prompt_format(args)?;
    let output = prompt_output(args, &format)?;

    // Step 2: Connection
    println!("\n  {}\n", style("Step 2: Connection").bold());
    let mut config = ConfigFile::default();
    let dsn: String = Password::new()
        .with_prompt("Sentry DSN")
        .validate_with(|input: &String| -> Result<(), String> { validate_dsn(input) })
        .interact()
        .map_err(map_prompt_err)?;
    config.set(SENTRY_SECTION, KEY_DSN, dsn);

    // Step 3: Event metadata
    println!("\n  {}\n", style("Step 3: Event metadata").bold());
    prompt_optional(&mut config, KEY_ENVIRONMENT, "Environment (blank to leave unset)")?;
    prompt_optional(
        &mut config,
        KEY_RELEASE,
        "Release (blank to use the git HEAD at send time)",
    )?;
    prompt_optional(&mut config, KEY_SITE, "Site tag (blank to leave unset)")?;
    prompt_optional(&mut config, KEY_NAME, "Server name (blank to leave unset)")?;

    // Validate the assembled config
    if let Err(errors) = validate(&config) {
        eprintln!(
            "\n  {} Config has validation errors:",
            style("!").red().bold()
        );
        for e in &errors {
            eprintln!("    {e}");
        }
        return Err(NotifierError::ConfigValidation { errors });
    }

    // Step 4: Review
    println!("\n  {}\n", style("Step 4: Review").bold());
    print_summary(&config, &format, &output);

    let confirm = Confirm::new()
        .with_prompt(format!("Write config to {}?", output.display()))
        .default(true)
        .interact()
        .map_err(map_prompt_err)?;

    if !confirm {
        println!("  Aborted.");
        return Ok(());
    }

    // Handle existing file
    if output.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", output.display()))
            .default(false)
            .interact()
            .map_err(map_prompt_err)?;
        if !overwrite {
            println!("  Aborted.");
            return Ok(());
        }
    }

    let content = serialize_config(&config, &format)?;
    std::fs::write(&output, content)?;
    println!(
        "\n  {} Created {}",
        style("✓").green().bold(),
        output.display()
    );
    Ok(())
}

fn prompt_format(args: &InitArgs) -> Result<ConfigFormat, NotifierError> {
    let formats = &["yaml", "json", "toml"];
    let default_idx = match args.format {
        ConfigFormat::Yaml => 0,
        ConfigFormat::Json => 1,
        ConfigFormat::Toml => 2,
    };

    let selection = Select::new()
        .with_prompt("Config format")
        .items(formats)
        .default(default_idx)
        .interact()
        .map_err(map_prompt_err)?;

    Ok(match selection {
        1 => ConfigFormat::Json,
        2 => ConfigFormat::Toml,
        _ => ConfigFormat::Yaml,
    })
}

fn prompt_output(args: &InitArgs, format: &ConfigFormat) -> Result<PathBuf, NotifierError> {
    let default_path = args.output.as_ref().map_or_else(
        || format!("sentry-notify.{}", format.extension()),
        |p| p.display().to_string(),
    );

    let path_str: String = Input::new()
        .with_prompt("Output file path")
        .default(default_path)
        .interact_text()
        .map_err(map_prompt_err)?;

    Ok(PathBuf::from(path_str))
}

fn prompt_optional(config: &mut ConfigFile, key: &str, prompt: &str) -> Result<(), NotifierError> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(String::new())
        .allow_empty(true)
        .interact_text()
        .map_err(map_prompt_err)?;

    let value = value.trim();
    if !value.is_empty() {
        config.set(SENTRY_SECTION, key, value);
    }
    Ok(())
}

fn print_summary(config: &ConfigFile, format: &ConfigFormat, output: &Path) {
    let show = |key: &str| {
        config
            .scalar(SENTRY_SECTION, key)
            .ok()
            .flatten()
            .unwrap_or_else(|| "-".into())
    };

    println!(
        "  {}",
        style("┌─────────────────────────────────────────────┐").dim()
    );
    println!(
        "  {}  Format:      {:<32}{}",
        style("│").dim(),
        format.extension(),
        style("│").dim()
    );
    println!(
        "  {}  Output:      {:<32}{}",
        style("│").dim(),
        output.display(),
        style("│").dim()
    );
    println!(
        "  {}  DSN:         {:<32}{}",
        style("│").dim(),
        "(hidden)",
        style("│").dim()
    );
    for (label, key) in [
        ("Environment:", KEY_ENVIRONMENT),
        ("Release:", KEY_RELEASE),
        ("Site:", KEY_SITE),
        ("Name:", KEY_NAME),
    ] {
        println!(
            "  {}  {:<12} {:<32}{}",
            style("│").dim(),
            label,
            show(key),
            style("│").dim()
        );
    }
    println!(
        "  {}\n",
        style("└─────────────────────────────────────────────┘").dim()
    );
}
