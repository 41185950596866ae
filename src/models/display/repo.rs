//! Repository display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{NONE, show, truncate_string};
use crate::client::models::Repository;

/// Repository row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RepoDisplay {
    /// `owner/name`
    #[tabled(rename = "REPOSITORY")]
    pub full_name: String,

    #[tabled(rename = "PRIVATE")]
    pub private: String,

    #[tabled(rename = "BRANCH")]
    pub default_branch: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&Repository> for RepoDisplay {
    fn from(repo: &Repository) -> Self {
        Self {
            full_name: repo.identity().unwrap_or_else(|_| NONE.to_string()),
            private: show(&repo.private),
            default_branch: show(&repo.default_branch),
            description: repo
                .description
                .known()
                .map(|d| truncate_string(d, 50))
                .unwrap_or_else(|| NONE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::RepoJson;
    use crate::client::mock::MockRequester;
    use crate::client::models::Resource;
    use std::sync::Arc;

    #[test]
    fn test_repo_display() {
        let mock = Arc::new(MockRequester::new());
        let json = RepoJson::new("octocat", "Hello-World").private(true).build();
        let repo = Repository::from_fields(mock, json.as_object().unwrap(), false);

        let row = RepoDisplay::from(&repo);
        assert_eq!(row.full_name, "octocat/Hello-World");
        assert_eq!(row.private, "true");
        assert_eq!(row.default_branch, "--");
        assert_eq!(row.description, "--");
    }
}
