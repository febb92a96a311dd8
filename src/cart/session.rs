use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

use super::CartError;
use crate::domain::PlanId;

/// Opaque identifier of one buyer session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for the per-session cart, provided by the surrounding web layer.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_cart(&self, session: &SessionId) -> Result<Vec<PlanId>, CartError>;
    async fn save_cart(&self, session: &SessionId, cart: Vec<PlanId>) -> Result<(), CartError>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    carts: RwLock<HashMap<SessionId, Vec<PlanId>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load_cart(&self, session: &SessionId) -> Result<Vec<PlanId>, CartError> {
        Ok(self.carts.read().await.get(session).cloned().unwrap_or_default())
    }

    async fn save_cart(&self, session: &SessionId, cart: Vec<PlanId>) -> Result<(), CartError> {
        let mut carts = self.carts.write().await;
        if cart.is_empty() {
            carts.remove(session);
        } else {
            carts.insert(session.clone(), cart);
        }
        Ok(())
    }
}
