/// Server-side session store
///
/// Sessions are keyed by an opaque random token carried in the `sid` cookie.
/// The token itself encodes nothing; it resolves to an [`Identity`] only
/// through the store. Sessions are time-bounded (24 hours by default) and
/// explicitly destroyed on logout.
///
/// The store is a trait so the backing can be swapped: the in-memory
/// implementation here serves both production single-node deployments and
/// tests; a persistent implementation can be added without touching handlers.
///
/// # Example
///
/// ```
/// use internlink_shared::auth::session::{Identity, InMemorySessionStore, SessionStore};
/// use internlink_shared::models::account::Role;
/// use std::time::Duration;
/// use uuid::Uuid;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemorySessionStore::new(Duration::from_secs(24 * 3600));
/// let token = store
///     .create(Identity { account_id: Uuid::new_v4(), role: Role::Student })
///     .await;
///
/// assert!(store.get(&token).await.is_some());
/// store.destroy(&token).await;
/// assert!(store.get(&token).await.is_none());
/// # }
/// ```
use crate::models::account::Role;
use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Length of generated session tokens
const TOKEN_LENGTH: usize = 48;

/// The authenticated identity a session resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// Account ID of the logged-in user
    pub account_id: Uuid,

    /// Role recorded at login time
    pub role: Role,
}

/// Abstraction over session persistence
///
/// Implementations must treat tokens as opaque and never derive identity from
/// token contents.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session for `identity` and returns its token
    async fn create(&self, identity: Identity) -> String;

    /// Resolves a token to its identity, if the session exists and has not expired
    async fn get(&self, token: &str) -> Option<Identity>;

    /// Destroys the session for `token` (idempotent)
    async fn destroy(&self, token: &str);
}

struct Session {
    identity: Identity,
    expires_at: Instant,
}

/// In-memory session store with TTL expiry
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    /// Creates a store whose sessions expire `ttl` after creation
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn generate_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, identity: Identity) -> String {
        let token = Self::generate_token();
        let session = Session {
            identity,
            expires_at: Instant::now() + self.ttl,
        };
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    async fn get(&self, token: &str) -> Option<Identity> {
        // Expired entries are dropped on access rather than by a sweeper task
        let expired = {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return None,
                Some(s) if s.expires_at > Instant::now() => return Some(s.identity),
                Some(_) => true,
            }
        };
        if expired {
            self.sessions.write().await.remove(token);
        }
        None
    }

    async fn destroy(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            account_id: Uuid::new_v4(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let id = identity(Role::Student);
        let token = store.create(id).await;

        assert_eq!(token.len(), TOKEN_LENGTH);
        assert_eq!(store.get(&token).await, Some(id));
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let t1 = store.create(identity(Role::Student)).await;
        let t2 = store.create(identity(Role::Company)).await;
        assert_ne!(t1, t2);
    }

    #[tokio::test]
    async fn test_destroy_invalidates_token() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let token = store.create(identity(Role::Company)).await;

        store.destroy(&token).await;
        assert!(store.get(&token).await.is_none());

        // Destroying again is a no-op
        store.destroy(&token).await;
    }

    #[tokio::test]
    async fn test_unknown_token_is_none() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        assert!(store.get("no-such-token").await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_expire() {
        let store = InMemorySessionStore::new(Duration::from_millis(10));
        let token = store.create(identity(Role::Student)).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(store.get(&token).await.is_none());
    }
}
