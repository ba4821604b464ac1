//! Time-based cache for guild lookups.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::types::Guild;

/// Freshness window for cached guild entries.
pub const GUILD_CACHE_TTL: Duration = Duration::from_millis(10_000);

/// A cached guild snapshot and the time of its last successful fetch.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The guild as returned by the API.
    pub guild: Guild,

    /// When the guild was last fetched.
    pub last_updated: Instant,
}

/// In-memory guild cache keyed by guild id.
///
/// Entries are overwritten whole on every successful fetch and are never
/// evicted. The lock is held only across map access, never across a network
/// await, so concurrent misses for the same id may both fetch; the last
/// write wins.
#[derive(Debug)]
pub struct GuildCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for GuildCache {
    fn default() -> Self {
        Self::with_ttl(GUILD_CACHE_TTL)
    }
}

impl GuildCache {
    /// Create a cache with the standard freshness window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with a custom freshness window.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Return the cached guild while its entry is still within the
    /// freshness window.
    ///
    /// An expired entry is left in place; the caller is expected to
    /// re-fetch and overwrite it.
    #[must_use]
    pub fn fresh(&self, guild_id: &str) -> Option<Guild> {
        let entries = self.entries.lock();
        let entry = entries.get(guild_id)?;

        if entry.last_updated.elapsed() <= self.ttl {
            debug!(guild_id, "guild cache hit");
            return Some(entry.guild.clone());
        }

        debug!(guild_id, "guild cache entry expired");
        None
    }

    /// Store a freshly fetched guild, overwriting any previous entry.
    pub fn insert(&self, guild_id: impl Into<String>, guild: Guild) {
        self.entries.lock().insert(
            guild_id.into(),
            CacheEntry {
                guild,
                last_updated: Instant::now(),
            },
        );
    }

    /// Age of the entry for `guild_id`, if one exists.
    #[must_use]
    pub fn age(&self, guild_id: &str) -> Option<Duration> {
        self.entries
            .lock()
            .get(guild_id)
            .map(|entry| entry.last_updated.elapsed())
    }

    /// Number of cached guilds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
