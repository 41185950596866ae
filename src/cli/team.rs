//! Team management commands

use colored::Colorize;
use dialoguer::Confirm;
use log::debug;
use serde_json::json;

use crate::cli::args::{GlobalOptions, PaginationArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::{Resource, Team};
use crate::client::params::{EditTeam, MemberRoleFilter, MembershipRole, RepoPermission, TeamPrivacy};
use crate::client::{Completable, PaginatedList};
use crate::error::Result;
use crate::models::display::team_record;
use crate::models::{MemberDisplay, MembershipDisplay, RepoDisplay, TeamDisplay};
use crate::output::Formattable;
use crate::output::json::print_json;
use crate::output::table::format_record;

/// Options for `team edit`, as typed on the command line
#[derive(Debug, Clone, Default)]
pub struct EditArgs {
    pub name: String,
    pub description: Option<String>,
    pub permission: Option<RepoPermission>,
    pub privacy: Option<TeamPrivacy>,
    pub parent: Option<u64>,
    pub no_parent: bool,
}

impl EditArgs {
    /// Build the edit, rejecting an empty name before anything is sent.
    pub fn to_edit(&self) -> Result<EditTeam> {
        let mut edit = EditTeam::new(self.name.as_str());
        if let Some(description) = &self.description {
            edit = edit.description(description.as_str());
        }
        if let Some(permission) = self.permission {
            edit = edit.permission(permission);
        }
        if let Some(privacy) = self.privacy {
            edit = edit.privacy(privacy);
        }
        if let Some(parent) = self.parent {
            edit = edit.parent_team_id(parent);
        } else if self.no_parent {
            edit = edit.no_parent();
        }
        edit.to_body()?;
        Ok(edit)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Drain a list, or fetch just the requested page.
async fn fetch_list<T: Resource>(
    list: PaginatedList<T>,
    pagination: &PaginationArgs,
    per_page: usize,
) -> Result<Vec<T>> {
    let mut list = list.with_pagination(pagination.to_params(per_page));
    if pagination.single_page() {
        Ok(list.next_page().await?.unwrap_or_default())
    } else {
        list.collect_all().await
    }
}

fn print_dry_run_header() {
    eprintln!("{}", "DRY RUN - no changes will be made".yellow());
    eprintln!();
}

/// Print a status-coded answer in the chosen format
fn print_check(format: OutputFormat, key: &str, value: bool, yes: String, no: String) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({ key: value })),
        _ => {
            if value {
                println!("{} {}", "✓".green(), yes);
            } else {
                println!("{} {}", "✗".red(), no);
            }
            Ok(())
        }
    }
}

/// Display team detail
fn display_team_detail(team: &Team, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            let record = team_record(team);
            println!();
            for (field, value) in record {
                if field == "NAME" {
                    println!("{}: {}", "Team".bold(), value);
                } else {
                    println!("{}: {}", field.to_lowercase().dimmed(), value);
                }
            }
            println!();
        }
        OutputFormat::Table => println!("{}", format_record(&team_record(team))),
        OutputFormat::Json => print_json(team)?,
    }
    Ok(())
}

// ============================================================================
// Read Commands
// ============================================================================

/// Show a team
pub async fn get(opts: &GlobalOptions, team_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut team = ctx.team(team_id);
    team.ensure_loaded().await?;
    display_team_detail(&team, ctx.format)
}

/// List team members
pub async fn members(
    opts: &GlobalOptions,
    team_id: u64,
    role: Option<MemberRoleFilter>,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let users = fetch_list(ctx.team(team_id).get_members(role)?, pagination, ctx.per_page()).await?;
    debug!("Team {} has {} members listed", team_id, users.len());

    let rows: Vec<MemberDisplay> = users.iter().map(MemberDisplay::from).collect();
    rows.print(ctx.format)
}

/// Show one user's membership in a team
pub async fn membership(opts: &GlobalOptions, team_id: u64, login: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let membership = ctx.team(team_id).get_membership(&ctx.user(login)).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&membership),
        format => vec![MembershipDisplay::new(login, &membership)].print(format),
    }
}

/// Check whether a user is a team member
pub async fn has_member(opts: &GlobalOptions, team_id: u64, login: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let is_member = ctx.team(team_id).has_in_members(&ctx.user(login)).await?;
    print_check(
        ctx.format,
        "member",
        is_member,
        format!("{} is a member of team {}", login, team_id),
        format!("{} is not a member of team {}", login, team_id),
    )
}

/// List team repositories
pub async fn repos(opts: &GlobalOptions, team_id: u64, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let repos = fetch_list(ctx.team(team_id).get_repos()?, pagination, ctx.per_page()).await?;

    let rows: Vec<RepoDisplay> = repos.iter().map(RepoDisplay::from).collect();
    rows.print(ctx.format)
}

/// Check whether a repository is managed by a team
pub async fn has_repo(opts: &GlobalOptions, team_id: u64, full_name: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let repo = ctx.repo(full_name)?;
    let managed = ctx.team(team_id).has_in_repos(&repo).await?;
    print_check(
        ctx.format,
        "managed",
        managed,
        format!("{} is managed by team {}", full_name, team_id),
        format!("{} is not managed by team {}", full_name, team_id),
    )
}

/// List child teams
pub async fn subteams(opts: &GlobalOptions, team_id: u64, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let teams = fetch_list(ctx.team(team_id).get_subteams()?, pagination, ctx.per_page()).await?;

    let rows: Vec<TeamDisplay> = teams.iter().map(TeamDisplay::from).collect();
    rows.print(ctx.format)
}

// ============================================================================
// Mutating Commands
// ============================================================================

/// Edit a team
pub async fn edit(opts: &GlobalOptions, team_id: u64, args: &EditArgs, dry_run: bool) -> Result<()> {
    let edit = args.to_edit()?;

    if dry_run {
        print_dry_run_header();
        eprintln!("Would edit team {} with:", team_id);
        eprintln!("{}", serde_json::to_string_pretty(&edit.to_body()?)?);
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let mut team = ctx.team(team_id);
    team.edit(edit).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&team)?,
        _ => eprintln!(
            "{} Team {} updated: \"{}\"",
            "✓".green(),
            team_id,
            team.name.known().map(String::as_str).unwrap_or(&args.name)
        ),
    }
    Ok(())
}

/// Delete a team
pub async fn delete(opts: &GlobalOptions, team_id: u64, yes: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        print_dry_run_header();
        eprintln!("Would delete team {}", team_id);
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let mut team = ctx.team(team_id);

    // Confirmation prompt unless --yes
    if !yes {
        let name = team.name().await?.unwrap_or("--").to_string();
        eprintln!(
            "{} Delete team \"{}\" (ID: {})? This cannot be undone.",
            "⚠".yellow(),
            name,
            team_id
        );
        eprintln!();

        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = team.delete().await?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({ "deleted": deleted, "team_id": team_id }))?,
        _ if deleted => eprintln!("{} Team {} deleted", "✓".green(), team_id),
        _ => eprintln!("{} Team {} was not deleted", "✗".red(), team_id),
    }
    Ok(())
}

/// Add a user to a team, or change their role
pub async fn add_member(
    opts: &GlobalOptions,
    team_id: u64,
    login: &str,
    role: Option<MembershipRole>,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        print_dry_run_header();
        eprintln!(
            "Would add {} to team {} as {}",
            login.bold(),
            team_id,
            role.unwrap_or_default()
        );
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let membership = ctx
        .team(team_id)
        .add_membership(&ctx.user(login), role)
        .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&membership)?,
        _ => eprintln!(
            "{} {} added to team {} (role: {}, state: {})",
            "✓".green(),
            login,
            team_id,
            membership.role.known().map(String::as_str).unwrap_or("--"),
            membership.state_name.known().map(String::as_str).unwrap_or("--")
        ),
    }
    Ok(())
}

/// Remove a user's membership
pub async fn remove_member(opts: &GlobalOptions, team_id: u64, login: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        print_dry_run_header();
        eprintln!("Would remove {} from team {}", login.bold(), team_id);
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let removed = ctx
        .team(team_id)
        .remove_membership(&ctx.user(login))
        .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({ "removed": removed, "login": login }))?,
        _ if removed => eprintln!("{} {} removed from team {}", "✓".green(), login, team_id),
        _ => eprintln!("{} {} was not removed from team {}", "✗".red(), login, team_id),
    }
    Ok(())
}

/// Grant a team access to a repository
pub async fn add_repo(
    opts: &GlobalOptions,
    team_id: u64,
    full_name: &str,
    permission: Option<RepoPermission>,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        print_dry_run_header();
        match permission {
            Some(p) => eprintln!("Would grant team {} {} access to {}", team_id, p, full_name.bold()),
            None => eprintln!("Would add {} to team {}", full_name.bold(), team_id),
        }
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let repo = ctx.repo(full_name)?;
    let team = ctx.team(team_id);
    match permission {
        Some(permission) => team.set_repo_permission(&repo, permission).await?,
        None => team.add_to_repos(&repo).await?,
    }

    match ctx.format {
        OutputFormat::Json => print_json(&json!({ "added": true, "repository": full_name }))?,
        _ => eprintln!("{} {} added to team {}", "✓".green(), full_name, team_id),
    }
    Ok(())
}

/// Revoke a team's access to a repository
pub async fn remove_repo(opts: &GlobalOptions, team_id: u64, full_name: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        print_dry_run_header();
        eprintln!("Would remove {} from team {}", full_name.bold(), team_id);
        return Ok(());
    }

    let ctx = CommandContext::new(opts)?;
    let repo = ctx.repo(full_name)?;
    ctx.team(team_id).remove_from_repos(&repo).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({ "removed": true, "repository": full_name }))?,
        _ => eprintln!("{} {} removed from team {}", "✓".green(), full_name, team_id),
    }
    Ok(())
}
