use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{CartError, SessionId, SessionStore};
use crate::clients::PlanCatalog;
use crate::domain::{Plan, PlanId};
use crate::plan_actor::CatalogError;

/// The resolved contents of a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub plans: Vec<Plan>,
    pub total: u64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// One session's cart: a duplicate-free list of plan ids.
///
/// Adding checks stock but reserves nothing; stock is only taken at
/// checkout or approval.
#[derive(Clone)]
pub struct CartStore {
    session: SessionId,
    sessions: Arc<dyn SessionStore>,
    catalog: PlanCatalog,
}

impl CartStore {
    pub fn new(session: SessionId, sessions: Arc<dyn SessionStore>, catalog: PlanCatalog) -> Self {
        Self { session, sessions, catalog }
    }

    /// Adds the plan if it exists and has stock. Returns `false` if it was
    /// already in the cart.
    #[instrument(skip(self), fields(session = %self.session))]
    pub async fn add(&self, plan_id: PlanId) -> Result<bool, CartError> {
        if self.catalog.stock(plan_id).await? == 0 {
            info!("Rejecting add for out-of-stock plan");
            return Err(CartError::OutOfStock(plan_id));
        }

        let mut cart = self.sessions.load_cart(&self.session).await?;
        if cart.contains(&plan_id) {
            debug!("Already in cart");
            return Ok(false);
        }
        cart.push(plan_id);
        self.sessions.save_cart(&self.session, cart).await?;
        debug!("Added to cart");
        Ok(true)
    }

    #[instrument(skip(self), fields(session = %self.session))]
    pub async fn remove(&self, plan_id: PlanId) -> Result<(), CartError> {
        let mut cart = self.sessions.load_cart(&self.session).await?;
        let before = cart.len();
        cart.retain(|id| *id != plan_id);
        if cart.len() != before {
            self.sessions.save_cart(&self.session, cart).await?;
            debug!("Removed from cart");
        }
        Ok(())
    }

    /// The raw stored ids, including any that no longer resolve.
    pub async fn plan_ids(&self) -> Result<Vec<PlanId>, CartError> {
        self.sessions.load_cart(&self.session).await
    }

    /// Resolves the cart against the catalog, dropping deleted plans.
    #[instrument(skip(self), fields(session = %self.session))]
    pub async fn snapshot(&self) -> Result<CartSnapshot, CartError> {
        let mut plans = Vec::new();
        for id in self.plan_ids().await? {
            match self.catalog.get(id).await {
                Ok(plan) => plans.push(plan),
                Err(CatalogError::NotFound(_)) => debug!(plan_id = id, "Dropping deleted plan from cart"),
                Err(e) => return Err(e.into()),
            }
        }
        let total = plans.iter().map(|p| p.price).sum();
        Ok(CartSnapshot { plans, total })
    }

    #[instrument(skip(self), fields(session = %self.session))]
    pub async fn clear(&self) -> Result<(), CartError> {
        self.sessions.save_cart(&self.session, Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::cart::MemorySessionStore;
    use crate::domain::PlanForm;
    use std::sync::atomic::{AtomicU64, Ordering};

    async fn setup() -> (PlanCatalog, Arc<MemorySessionStore>) {
        let next = Arc::new(AtomicU64::new(1));
        let (actor, client) = ResourceActor::<Plan>::new("plans", 32, move || next.fetch_add(1, Ordering::SeqCst));
        tokio::spawn(actor.run());
        let catalog = PlanCatalog::new(client);
        catalog.create_or_update(PlanForm::new("Netflix Premium", 199, 2)).await.unwrap();
        catalog.create_or_update(PlanForm::new("Disney+ Hotstar", 299, 0)).await.unwrap();
        catalog.create_or_update(PlanForm::new("Zee5 Premium", 99, 5)).await.unwrap();
        (catalog, Arc::new(MemorySessionStore::new()))
    }

    #[tokio::test]
    async fn test_add_twice_keeps_one_entry() {
        let (catalog, sessions) = setup().await;
        let cart = CartStore::new(SessionId::new("s1"), sessions, catalog);

        assert!(cart.add(1).await.unwrap());
        assert!(!cart.add(1).await.unwrap());
        assert_eq!(cart.plan_ids().await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_out_of_stock_add_leaves_cart_empty() {
        let (catalog, sessions) = setup().await;
        let cart = CartStore::new(SessionId::new("s1"), sessions, catalog);

        assert_eq!(cart.add(2).await, Err(CartError::OutOfStock(2)));
        assert_eq!(cart.add(9).await, Err(CartError::Catalog(CatalogError::NotFound(9))));
        assert!(cart.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_totals_and_skips_deleted_plans() {
        let (catalog, sessions) = setup().await;
        let cart = CartStore::new(SessionId::new("s1"), sessions, catalog.clone());
        cart.add(1).await.unwrap();
        cart.add(3).await.unwrap();

        let snapshot = cart.snapshot().await.unwrap();
        assert_eq!(snapshot.total, 298);

        catalog.delete(1).await.unwrap();
        let snapshot = cart.snapshot().await.unwrap();
        assert_eq!(snapshot.plans.len(), 1);
        assert_eq!(snapshot.total, 99);
        assert_eq!(cart.plan_ids().await.unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (catalog, sessions) = setup().await;
        let cart = CartStore::new(SessionId::new("s1"), sessions.clone(), catalog.clone());
        let other = CartStore::new(SessionId::new("s2"), sessions, catalog);
        cart.add(1).await.unwrap();
        cart.add(3).await.unwrap();
        other.add(3).await.unwrap();

        cart.remove(1).await.unwrap();
        cart.remove(1).await.unwrap();
        assert_eq!(cart.plan_ids().await.unwrap(), vec![3]);

        cart.clear().await.unwrap();
        assert!(cart.plan_ids().await.unwrap().is_empty());
        assert_eq!(other.plan_ids().await.unwrap(), vec![3]);
    }
}
