//! Discord web API client.
//!
//! A small async client for the guild and member routes of Discord's REST
//! API, plus OAuth2 authorization-URL helpers. Guild lookups are served
//! from a short-lived in-memory cache.
//!
//! The HTTP transport sits behind the [`RestClient`] capability; the
//! bundled [`HttpRestClient`] handles retries and rate limiting, and tests
//! substitute an in-process fake.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod cache;
mod client;
mod config;
mod endpoints;
mod error;
mod oauth;
mod rest;
mod types;

pub use cache::{CacheEntry, GuildCache, GUILD_CACHE_TTL};
pub use client::Discord;
pub use config::{RetryConfig, WebApiConfig};
pub use endpoints::Endpoints;
pub use error::{WebApiError, WebApiResult};
pub use oauth::{encode_query, AuthorizeOptions};
pub use rest::{Auth, HttpRestClient, RequestOptions, RestClient};
pub use types::{Guild, GuildMember, User};
