//! Team display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{NONE, show, truncate_string};
use crate::client::models::Team;

/// Team row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TeamDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "SLUG")]
    pub slug: String,

    /// Default repository permission
    #[tabled(rename = "PERMISSION")]
    pub permission: String,

    #[tabled(rename = "PRIVACY")]
    pub privacy: String,

    /// Parent team name (nested teams)
    #[tabled(rename = "PARENT")]
    pub parent: String,
}

impl From<&Team> for TeamDisplay {
    fn from(team: &Team) -> Self {
        let parent = team
            .parent
            .known()
            .map(|p| {
                p.name
                    .known()
                    .cloned()
                    .or_else(|| p.identity().map(|id| id.to_string()))
                    .unwrap_or_else(|| NONE.to_string())
            })
            .unwrap_or_else(|| NONE.to_string());

        Self {
            id: show(&team.id),
            name: show(&team.name),
            slug: show(&team.slug),
            permission: show(&team.permission),
            privacy: show(&team.privacy),
            parent,
        }
    }
}

/// Field/value pairs describing one team in detail.
pub fn team_record(team: &Team) -> Vec<(&'static str, String)> {
    let description = team
        .description
        .known()
        .map(|d| truncate_string(d, 60))
        .unwrap_or_else(|| NONE.to_string());
    let organization = team
        .organization
        .known()
        .map(|org| show(&org.login))
        .unwrap_or_else(|| NONE.to_string());
    let row = TeamDisplay::from(team);

    vec![
        ("ID", row.id),
        ("NAME", row.name),
        ("SLUG", row.slug),
        ("DESCRIPTION", description),
        ("ORGANIZATION", organization),
        ("PERMISSION", row.permission),
        ("PRIVACY", row.privacy),
        ("MEMBERS", show(&team.members_count)),
        ("REPOS", show(&team.repos_count)),
        ("PARENT", row.parent),
        ("URL", show(&team.url)),
    ]
}
