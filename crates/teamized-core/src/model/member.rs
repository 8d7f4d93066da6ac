// ── Team membership types ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::id::Id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    #[default]
    Member,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Id,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub role_text: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub user: User,
}

impl Member {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            role: MemberRole::Member,
            role_text: String::new(),
            is_admin: false,
            is_owner: false,
            user: User::default(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, MemberRole::Owner | MemberRole::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRequest {
    pub role: MemberRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    pub id: Id,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub uses_left: u32,
    #[serde(default)]
    pub uses_used: u32,
    #[serde(default)]
    pub valid_until: Option<NaiveDateTime>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InviteRequest {
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDateTime>,
}
