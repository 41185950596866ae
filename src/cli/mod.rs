//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};

use crate::client::params::{MemberRoleFilter, MembershipRole, RepoPermission, TeamPrivacy};

pub mod args;
pub mod context;
pub mod init;
pub mod status;
pub mod team;

pub use args::{OutputFormat, PaginationArgs};
pub use context::CommandContext;

/// ghteam - manage GitHub organization teams from the terminal
#[derive(Parser, Debug)]
#[command(name = "ghteam")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json); defaults to the configured preference
    #[arg(
        long,
        global = true,
        env = "GHTEAM_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "GHTEAM_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// API root, e.g. https://github.example.com/api/v3
    #[arg(long, global = true, env = "GHTEAM_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GHTEAM_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize ghteam configuration
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Inspect and manage a team
    #[command(subcommand)]
    Team(TeamCommands),
}

/// Confirmation and preview flags for mutating commands
#[derive(Args, Debug, Clone, Default)]
pub struct MutationArgs {
    /// Show what would change without sending anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Team subcommands
#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// Show a team
    Get {
        /// Numeric team ID
        team_id: u64,
    },

    /// Rename a team or change its settings
    Edit {
        /// Numeric team ID
        team_id: u64,

        /// New team name (required by the API)
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Default repository permission
        #[arg(long, value_enum)]
        permission: Option<RepoPermission>,

        /// Visibility
        #[arg(long, value_enum)]
        privacy: Option<TeamPrivacy>,

        /// Parent team ID
        #[arg(long, conflicts_with = "no_parent")]
        parent: Option<u64>,

        /// Detach from the parent team
        #[arg(long)]
        no_parent: bool,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Delete a team
    Delete {
        /// Numeric team ID
        team_id: u64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// List team members
    Members {
        /// Numeric team ID
        team_id: u64,

        /// Filter by role
        #[arg(long, value_enum)]
        role: Option<MemberRoleFilter>,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show a user's membership in the team
    Membership {
        /// Numeric team ID
        team_id: u64,
        /// User login
        login: String,
    },

    /// Add a user to the team (or change their role)
    AddMember {
        /// Numeric team ID
        team_id: u64,
        /// User login
        login: String,

        /// Role; defaults to member
        #[arg(long, value_enum)]
        role: Option<MembershipRole>,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Remove a user from the team
    RemoveMember {
        /// Numeric team ID
        team_id: u64,
        /// User login
        login: String,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Check whether a user belongs to the team
    HasMember {
        /// Numeric team ID
        team_id: u64,
        /// User login
        login: String,
    },

    /// List repositories the team can access
    Repos {
        /// Numeric team ID
        team_id: u64,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Grant the team access to a repository
    AddRepo {
        /// Numeric team ID
        team_id: u64,
        /// Repository as owner/name
        repo: String,

        /// Permission to grant
        #[arg(long, value_enum)]
        permission: Option<RepoPermission>,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Revoke the team's access to a repository
    RemoveRepo {
        /// Numeric team ID
        team_id: u64,
        /// Repository as owner/name
        repo: String,

        #[command(flatten)]
        mutation: MutationArgs,
    },

    /// Check whether the team can access a repository
    HasRepo {
        /// Numeric team ID
        team_id: u64,
        /// Repository as owner/name
        repo: String,
    },

    /// List child teams
    Subteams {
        /// Numeric team ID
        team_id: u64,

        #[command(flatten)]
        pagination: PaginationArgs,
    },
}
