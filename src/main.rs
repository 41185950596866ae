//! ghteam CLI - manage GitHub organization teams

use clap::Parser;
use log::LevelFilter;

use ghteam::cli::args::GlobalOptions;
use ghteam::cli::team::{self, EditArgs};
use ghteam::cli::{Cli, Commands, TeamCommands};
use ghteam::error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => ghteam::cli::init::run(&opts).await,
        Commands::Status => ghteam::cli::status::run(&opts),
        Commands::Version => {
            println!("ghteam version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Team(cmd) => match cmd {
            TeamCommands::Get { team_id } => team::get(&opts, team_id).await,
            TeamCommands::Edit {
                team_id,
                name,
                description,
                permission,
                privacy,
                parent,
                no_parent,
                mutation,
            } => {
                let args = EditArgs {
                    name,
                    description,
                    permission,
                    privacy,
                    parent,
                    no_parent,
                };
                team::edit(&opts, team_id, &args, mutation.dry_run).await
            }
            TeamCommands::Delete {
                team_id,
                yes,
                mutation,
            } => team::delete(&opts, team_id, yes, mutation.dry_run).await,
            TeamCommands::Members {
                team_id,
                role,
                pagination,
            } => team::members(&opts, team_id, role, &pagination).await,
            TeamCommands::Membership { team_id, login } => {
                team::membership(&opts, team_id, &login).await
            }
            TeamCommands::AddMember {
                team_id,
                login,
                role,
                mutation,
            } => team::add_member(&opts, team_id, &login, role, mutation.dry_run).await,
            TeamCommands::RemoveMember {
                team_id,
                login,
                mutation,
            } => team::remove_member(&opts, team_id, &login, mutation.dry_run).await,
            TeamCommands::HasMember { team_id, login } => {
                team::has_member(&opts, team_id, &login).await
            }
            TeamCommands::Repos {
                team_id,
                pagination,
            } => team::repos(&opts, team_id, &pagination).await,
            TeamCommands::AddRepo {
                team_id,
                repo,
                permission,
                mutation,
            } => {
                team::add_repo(&opts, team_id, &repo, permission, mutation.dry_run).await
            }
            TeamCommands::RemoveRepo {
                team_id,
                repo,
                mutation,
            } => team::remove_repo(&opts, team_id, &repo, mutation.dry_run).await,
            TeamCommands::HasRepo { team_id, repo } => team::has_repo(&opts, team_id, &repo).await,
            TeamCommands::Subteams {
                team_id,
                pagination,
            } => team::subteams(&opts, team_id, &pagination).await,
        },
    }
}
