//! Resolver Sessions
//!
//! Keeps one `LocationResolver` per session so the at-most-once guarantee
//! holds per session in a process that serves many of them.

use crate::application::LocationResolver;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Identifier of a client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session id from its hyphenated string form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct SessionEntry {
    resolver: Arc<LocationResolver>,
    last_seen: Instant,
}

type ResolverFactory = dyn Fn(SessionId) -> LocationResolver + Send + Sync;

/// DashMap-backed registry of per-session resolvers.
///
/// Sessions idle for longer than the TTL are evicted; a session that comes
/// back after eviction gets a fresh resolver and may resolve again.
pub struct ResolverSessions {
    sessions: Arc<DashMap<SessionId, SessionEntry>>,
    factory: Arc<ResolverFactory>,
}

impl ResolverSessions {
    /// Create a registry that builds resolvers with `factory`.
    ///
    /// The factory runs while the session's map shard is locked, so it
    /// must not call back into the registry.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(SessionId) -> LocationResolver + Send + Sync + 'static,
    {
        Self {
            sessions: Arc::new(DashMap::new()),
            factory: Arc::new(factory),
        }
    }

    /// Get the session's resolver, creating it on first use.
    pub fn get_or_create(&self, id: SessionId) -> Arc<LocationResolver> {
        let mut entry = self.sessions.entry(id).or_insert_with(|| {
            tracing::debug!("creating resolver for session {}", id);
            SessionEntry {
                resolver: Arc::new((self.factory)(id)),
                last_seen: Instant::now(),
            }
        });
        entry.last_seen = Instant::now();
        entry.resolver.clone()
    }

    /// Get the session's resolver without creating one.
    pub fn get(&self, id: SessionId) -> Option<Arc<LocationResolver>> {
        self.sessions.get(&id).map(|e| e.resolver.clone())
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, id: SessionId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Number of live sessions.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    /// Remove sessions not seen within the TTL.
    pub fn cleanup_expired(&self, ttl: Duration) -> usize {
        Self::evict(&self.sessions, ttl)
    }

    /// Start the background garbage collection task.
    pub fn start_gc(&self, ttl: Duration, interval: Duration) -> tokio::task::JoinHandle<()> {
        let sessions = self.sessions.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let removed = Self::evict(&sessions, ttl);
                if removed > 0 {
                    tracing::debug!("session GC removed {} expired entries", removed);
                }
            }
        })
    }

    fn evict(sessions: &DashMap<SessionId, SessionEntry>, ttl: Duration) -> usize {
        let now = Instant::now();
        let expired: Vec<SessionId> = sessions
            .iter()
            .filter(|e| now.duration_since(e.value().last_seen) > ttl)
            .map(|e| *e.key())
            .collect();

        // Re-check under the entry lock; the session may have been touched
        expired
            .into_iter()
            .filter(|id| {
                sessions
                    .remove_if(id, |_, e| now.duration_since(e.last_seen) > ttl)
                    .is_some()
            })
            .count()
    }
}
