//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::{API_HOST_ENV, Config, TOKEN_ENV};
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "ghteam Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!("Config file: {}", config_path.display().to_string().cyan());
    println!();

    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            if std::env::var(TOKEN_ENV).is_ok() {
                println!("{} Token provided via {}", "✓".green(), TOKEN_ENV);
            }
            println!();
            println!(
                "Run {} to create a configuration file.",
                "ghteam init".cyan()
            );
            println!();
            return Ok(());
        }
    };

    // Token status
    if std::env::var(TOKEN_ENV).is_ok() {
        println!("{} Token provided via {} (overrides config)", "✓".green(), TOKEN_ENV);
    } else if let Some(masked) = config.masked_token() {
        println!("{} Token configured ({})", "✓".green(), masked.dimmed());
    } else {
        println!("{} Token not configured", "✗".red());
        println!("  → Run 'ghteam init' to configure");
    }

    // API host status (only show if custom)
    let config = config.with_env_overrides().with_overrides(None, opts.api_host.clone());
    match config.api_host {
        Some(ref host) => println!("{} Custom API host: {}", "○".dimmed(), host.cyan()),
        None => println!("{} API host: {}", "○".dimmed(), "https://api.github.com".dimmed()),
    }
    if std::env::var(API_HOST_ENV).is_ok() {
        println!("  (from {})", API_HOST_ENV);
    }

    println!(
        "{} Page size: {}",
        "○".dimmed(),
        config.preferences.per_page
    );
    if let Some(ref format) = config.preferences.format {
        println!("{} Preferred format: {}", "○".dimmed(), format);
    }

    println!();
    Ok(())
}
