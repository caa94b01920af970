//! Profile Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile entity — the authenticated end user
///
/// Created on first successful authentication if absent. The email is set
/// from the auth identity and never changes afterwards; [`ProfileUpdate`]
/// deliberately has no email field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<i64>,
    /// Back-reference to the auth identity
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<String>,
}

/// Create profile payload (first sign-in hook)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCreate {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

/// Update profile payload (profile-edit flow; email is immutable)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
