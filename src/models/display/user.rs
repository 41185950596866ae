//! Member and membership display models

use serde::Serialize;
use tabled::Tabled;

use super::common::show;
use crate::client::models::{NamedUser, TeamMembership};

/// Team member row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MemberDisplay {
    #[tabled(rename = "LOGIN")]
    pub login: String,

    #[tabled(rename = "ID")]
    pub id: String,

    /// `User`, `Organization` or `Bot`
    #[tabled(rename = "TYPE")]
    pub user_type: String,

    #[tabled(rename = "SITE ADMIN")]
    pub site_admin: String,
}

impl From<&NamedUser> for MemberDisplay {
    fn from(user: &NamedUser) -> Self {
        Self {
            login: show(&user.login),
            id: show(&user.id),
            user_type: show(&user.user_type),
            site_admin: show(&user.site_admin),
        }
    }
}

/// Membership row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MembershipDisplay {
    #[tabled(rename = "LOGIN")]
    pub login: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    /// `active` or `pending`
    #[tabled(rename = "STATE")]
    pub state: String,
}

impl MembershipDisplay {
    pub fn new(login: &str, membership: &TeamMembership) -> Self {
        Self {
            login: login.to_string(),
            role: show(&membership.role),
            state: show(&membership.state_name),
        }
    }
}
