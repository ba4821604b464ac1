//! Discord API types.

use serde::{Deserialize, Serialize};

/// Discord user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: String,

    /// Username
    pub username: String,

    /// Discriminator (legacy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,

    /// Global display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,

    /// Avatar hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Whether this is a bot
    #[serde(default)]
    pub bot: bool,
}

/// Discord guild (server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guild {
    /// Guild ID
    pub id: String,

    /// Guild name
    pub name: String,

    /// Icon hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Owner ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    /// Whether the current user owns the guild (guild listings only)
    #[serde(default)]
    pub owner: bool,

    /// Permissions of the current user in the guild (guild listings only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,

    /// Enabled guild features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// Discord guild member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMember {
    /// The member's user record (absent in some gateway payloads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Guild-specific nickname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,

    /// IDs of the member's roles
    #[serde(default)]
    pub roles: Vec<String>,

    /// When the member joined the guild
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,

    /// Whether the member is server-deafened
    #[serde(default)]
    pub deaf: bool,

    /// Whether the member is server-muted
    #[serde(default)]
    pub mute: bool,
}
