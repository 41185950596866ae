//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};
use reqwest::Method;

use crate::cli::args::GlobalOptions;
use crate::client::{GithubClient, Requester};
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Run the init command
///
/// Prompts for a token, verifies it against `GET /user`, and writes the
/// config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to ghteam!".bold().green());
    println!("Let's set up your GitHub configuration.\n");

    let token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter a GitHub personal access token (needs read:org / admin:org)")
        .interact()?;

    let api_host = match opts.api_host.clone() {
        Some(host) => Some(host),
        None => {
            let enterprise = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Are you using GitHub Enterprise Server?")
                .default(false)
                .interact()?;
            if enterprise {
                let host: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("API root (e.g. https://github.example.com/api/v3)")
                    .interact_text()?;
                Some(host)
            } else {
                None
            }
        }
    };

    println!("\n{}", "Verifying token...".cyan());
    let client = GithubClient::new(Some(token.clone()), api_host.clone())?;
    let response = client
        .request_json_and_check(Method::GET, "/user", None, &[])
        .await?;
    let login = response
        .body
        .get("login")
        .and_then(|l| l.as_str())
        .ok_or_else(|| ApiError::InvalidResponse("GET /user returned no login".into()))?;
    println!("{} Authenticated as {}", "✓".green(), login.bold());

    // Keep existing preferences when re-initializing
    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    config.token = Some(token);
    config.api_host = api_host;
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "ghteam status".cyan());
    println!("  {} - Show a team", "ghteam team get <TEAM_ID>".cyan());

    Ok(())
}
