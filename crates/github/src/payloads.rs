//! Wire shapes of the GitHub REST responses and their conversion to domain types.
//!
//! Only the fields IssueLens uses are declared; everything else in the
//! payload is ignored by serde.

use chrono::{DateTime, Utc};
use pipeline::{
    Issue, IssueNumber, IssueState, LookupError, OwnerLogin, Repository, RepositoryFullName,
    RepositoryNumericId, Timestamp,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryPayload {
    id: u64,
    full_name: String,
    name: String,
    description: Option<String>,
    html_url: Option<String>,
    #[serde(default)]
    open_issues_count: u64,
}

impl RepositoryPayload {
    pub(crate) fn into_repository(self, operation: &str) -> Result<Repository, LookupError> {
        let full_name =
            RepositoryFullName::new(self.full_name).ok_or_else(|| LookupError::Deserialization {
                operation: operation.to_string(),
                message: "repository has an empty full_name".to_string(),
            })?;
        Ok(Repository {
            id: RepositoryNumericId::new(self.id),
            full_name,
            name: self.name,
            description: self.description,
            html_url: self.html_url,
            open_issues_count: self.open_issues_count,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssuePayload {
    number: u64,
    title: String,
    state: IssueState,
    html_url: Option<String>,
    user: Option<UserPayload>,
    created_at: Option<DateTime<Utc>>,
}

impl From<IssuePayload> for Issue {
    fn from(payload: IssuePayload) -> Self {
        Issue {
            number: IssueNumber::new(payload.number),
            title: payload.title,
            state: payload.state,
            html_url: payload.html_url,
            author: payload.user.and_then(|user| OwnerLogin::new(user.login)),
            created_at: payload.created_at.map(Timestamp::from_utc),
        }
    }
}
