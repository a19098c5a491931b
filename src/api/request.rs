//! Request types for the timesheet API.
//!
//! Authentication is handled upstream; the acting user arrives in the body of
//! every `POST`, and in `X-Actor-*` headers on `GET`.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::models::{ActingUser, ReviewAction, UserGroup};
use crate::workflow::EntryEdit;

/// Header carrying the actor's email on `GET` requests.
pub const ACTOR_EMAIL_HEADER: &str = "x-actor-email";
/// Header carrying the actor's first name.
pub const ACTOR_FIRST_NAME_HEADER: &str = "x-actor-first-name";
/// Header carrying the actor's last name.
pub const ACTOR_LAST_NAME_HEADER: &str = "x-actor-last-name";
/// Header carrying the actor's groups, comma separated (`HR,Supervisor`).
pub const ACTOR_GROUPS_HEADER: &str = "x-actor-groups";

/// Body of `POST .../start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    /// Who is acting.
    pub actor: ActingUser,
}

/// Body of `POST .../entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEntriesRequest {
    /// Who is acting.
    pub actor: ActingUser,
    /// Day edits to apply.
    #[serde(default)]
    pub entries: Vec<EntryEdit>,
}

/// Body of `POST .../submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// Who is acting.
    pub actor: ActingUser,
    /// Day edits to apply before submitting.
    #[serde(default)]
    pub entries: Vec<EntryEdit>,
    /// Comment for the reviewer.
    #[serde(default)]
    pub comment: String,
}

/// Body of `POST .../review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Who is acting.
    pub actor: ActingUser,
    /// `approve`, `verify`, `reject` or `retract`.
    pub action: ReviewAction,
    /// Comment for the owner.
    #[serde(default)]
    pub comment: String,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn parse_group(raw: &str) -> Result<UserGroup, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "hr" => Ok(UserGroup::Hr),
        "supervisor" => Ok(UserGroup::Supervisor),
        other => Err(format!("unknown group '{}'", other)),
    }
}

/// Reads the acting user from the `X-Actor-*` headers.
///
/// Returns an error message if the email header is missing or a group is
/// unknown.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<ActingUser, String> {
    let email = header_str(headers, ACTOR_EMAIL_HEADER)
        .ok_or_else(|| format!("missing header: {}", ACTOR_EMAIL_HEADER))?;

    let groups = match header_str(headers, ACTOR_GROUPS_HEADER) {
        Some(raw) => raw
            .split(',')
            .filter(|g| !g.trim().is_empty())
            .map(parse_group)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(ActingUser {
        email: email.to_string(),
        first_name: header_str(headers, ACTOR_FIRST_NAME_HEADER)
            .unwrap_or_default()
            .to_string(),
        last_name: header_str(headers, ACTOR_LAST_NAME_HEADER)
            .unwrap_or_default()
            .to_string(),
        groups,
    })
}
