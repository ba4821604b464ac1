//! The public client facade.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::{
    cache::GuildCache,
    config::WebApiConfig,
    endpoints::Endpoints,
    error::{WebApiError, WebApiResult},
    oauth::{encode_query, AuthorizeOptions},
    rest::{HttpRestClient, RequestOptions, RestClient},
    types::{Guild, GuildMember},
};

/// Client for the guild and member routes of the Discord REST API.
///
/// The REST transport is held by composition behind [`RestClient`], so a
/// fake transport can be substituted in tests. Bot tokens are passed per
/// call rather than stored on the client.
pub struct Discord {
    rest: Arc<dyn RestClient>,
    endpoints: Endpoints,
    guild_cache: GuildCache,
    config: WebApiConfig,
}

impl Discord {
    /// Create a client backed by [`HttpRestClient`].
    pub fn new(config: WebApiConfig) -> WebApiResult<Self> {
        let rest = Arc::new(HttpRestClient::new(&config)?);
        Ok(Self::with_rest_client(config, rest))
    }

    /// Create a client over an existing REST capability.
    #[must_use]
    pub fn with_rest_client(config: WebApiConfig, rest: Arc<dyn RestClient>) -> Self {
        Self {
            rest,
            endpoints: Endpoints,
            guild_cache: GuildCache::new(),
            config,
        }
    }

    /// Replace the guild cache, e.g. to shorten the freshness window.
    #[must_use]
    pub fn with_guild_cache(mut self, cache: GuildCache) -> Self {
        self.guild_cache = cache;
        self
    }

    /// The guild cache. Normal use goes through [`Self::get_guild`]; this
    /// accessor exists for inspection.
    #[must_use]
    pub const fn guild_cache(&self) -> &GuildCache {
        &self.guild_cache
    }

    /// Fetch a guild member.
    #[instrument(skip(self, bot_token))]
    pub async fn get_guild_member(
        &self,
        guild_id: &str,
        user_id: &str,
        bot_token: &str,
    ) -> WebApiResult<GuildMember> {
        let value = self
            .rest
            .request(
                Method::GET,
                &self.endpoints.guild_member(guild_id, user_id),
                None,
                RequestOptions::bot(bot_token),
            )
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a member's role association. The response body is returned
    /// as-is; Discord serves an empty body on some routes in this family.
    #[instrument(skip(self, bot_token))]
    pub async fn get_guild_member_role(
        &self,
        guild_id: &str,
        user_id: &str,
        role_id: &str,
        bot_token: &str,
    ) -> WebApiResult<Value> {
        self.rest
            .request(
                Method::GET,
                &self.endpoints.guild_member_role(guild_id, user_id, role_id),
                None,
                RequestOptions::bot(bot_token),
            )
            .await
    }

    async fn fetch_guild(&self, guild_id: &str, bot_token: &str) -> WebApiResult<Guild> {
        let value = self
            .rest
            .request(
                Method::GET,
                &self.endpoints.guild(guild_id),
                None,
                RequestOptions::bot(bot_token),
            )
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a guild, serving from the cache while the entry is fresh.
    ///
    /// A fetch failure propagates to the caller; the cache is written only
    /// on success, so a stale entry survives a failed refresh.
    #[instrument(skip(self, bot_token))]
    pub async fn get_guild(&self, guild_id: &str, bot_token: &str) -> WebApiResult<Guild> {
        if let Some(guild) = self.guild_cache.fresh(guild_id) {
            return Ok(guild);
        }

        let guild = self.fetch_guild(guild_id, bot_token).await?;
        self.guild_cache.insert(guild_id, guild.clone());

        Ok(guild)
    }

    /// List the guilds the authenticated bot is in, refreshing the cache
    /// entry for every guild returned.
    #[instrument(skip(self, bot_token))]
    pub async fn get_all_guilds(&self, bot_token: &str) -> WebApiResult<Vec<Guild>> {
        let value = self
            .rest
            .request(
                Method::GET,
                &self.endpoints.user_guilds("@me"),
                None,
                RequestOptions::bot(bot_token),
            )
            .await?;

        let guilds: Vec<Guild> = serde_json::from_value(value)?;

        for guild in &guilds {
            self.guild_cache.insert(guild.id.clone(), guild.clone());
        }
        debug!(count = guilds.len(), "guild cache refreshed from listing");

        Ok(guilds)
    }

    /// Build an OAuth2 authorization URL from the configured application
    /// credentials.
    ///
    /// Unset optional parameters are omitted from the query string rather
    /// than sent empty.
    pub fn authorize_url(&self, options: &AuthorizeOptions) -> WebApiResult<String> {
        let client_id = self.config.client_id.as_deref().ok_or_else(|| {
            WebApiError::InvalidConfig("client_id is required to build an authorization URL".into())
        })?;

        let query = encode_query(&[
            (
                "response_type",
                json!(options.response_type.as_deref().unwrap_or("code")),
            ),
            ("client_id", json!(client_id)),
            (
                "redirect_uri",
                json!(self.config.redirect_uri.as_deref().unwrap_or("")),
            ),
            ("scope", json!(options.scope.as_deref().unwrap_or(""))),
            ("state", json!(options.state.as_deref().unwrap_or(""))),
            ("prompt", json!(options.prompt.as_deref().unwrap_or(""))),
        ]);

        Ok(format!(
            "{}/oauth2/authorize?{query}",
            self.config.api_url.trim_end_matches('/')
        ))
    }
}
