//! Endpoint path templates.
//!
//! Paths are relative to the versioned API base URL. The table is a plain
//! value held by the client, so alternate tables can be injected without
//! touching global state.

/// Path builders for the REST routes this client touches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Endpoints;

impl Endpoints {
    /// `GET /guilds/{guild_id}`
    #[must_use]
    pub fn guild(self, guild_id: &str) -> String {
        format!("/guilds/{guild_id}")
    }

    /// `GET /guilds/{guild_id}/members/{user_id}`
    #[must_use]
    pub fn guild_member(self, guild_id: &str, user_id: &str) -> String {
        format!("/guilds/{guild_id}/members/{user_id}")
    }

    /// `GET /guilds/{guild_id}/members/{user_id}/roles/{role_id}`
    #[must_use]
    pub fn guild_member_role(self, guild_id: &str, user_id: &str, role_id: &str) -> String {
        format!("/guilds/{guild_id}/members/{user_id}/roles/{role_id}")
    }

    /// `GET /users/{user_id}/guilds`
    ///
    /// Pass `@me` for the authenticated user's guilds.
    #[must_use]
    pub fn user_guilds(self, user_id: &str) -> String {
        format!("/users/{user_id}/guilds")
    }
}
