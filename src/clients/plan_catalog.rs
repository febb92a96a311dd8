use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{default_plans, Plan, PlanForm, PlanId};
use crate::plan_actor::{CatalogError, PlanAction, PlanActionResult};

/// Client for the plan inventory.
///
/// All stock mutation goes through the catalog actor; `try_decrement` is a
/// single action there, so two concurrent buyers can never both take the
/// last unit.
#[derive(Clone)]
pub struct PlanCatalog {
    inner: ResourceClient<Plan>,
}

impl_basic_client!(PlanCatalog, Plan, CatalogError);

fn catalog_error(id: PlanId) -> impl FnOnce(FrameworkError) -> CatalogError {
    move |e| match e {
        FrameworkError::NotFound(_) => CatalogError::NotFound(id),
        FrameworkError::Rejected(reason) => CatalogError::InvalidInput(reason),
        other => CatalogError::ActorCommunicationError(other.to_string()),
    }
}

impl PlanCatalog {
    /// All plans in ascending id order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Plan>, CatalogError> {
        debug!("Sending request");
        self.inner.list().await.map_err(|e| CatalogError::ActorCommunicationError(e.to_string()))
    }

    /// Adds a plan when `form.id` is empty, edits the existing one otherwise.
    #[instrument(skip(self, form), fields(plan_id = ?form.id))]
    pub async fn create_or_update(&self, form: PlanForm) -> Result<Plan, CatalogError> {
        match form.id {
            Some(id) => {
                let plan = self.inner.update(id, form).await.map_err(catalog_error(id))?;
                info!(price = plan.price, stock = plan.stock, "Plan updated");
                Ok(plan)
            }
            None => {
                let id = self.inner.create(form).await.map_err(|e| match e {
                    FrameworkError::Rejected(reason) => CatalogError::InvalidInput(reason),
                    other => CatalogError::ActorCommunicationError(other.to_string()),
                })?;
                info!(plan_id = id, "Plan added");
                self.get(id).await
            }
        }
    }

    /// Takes one unit of stock if any is left.
    #[instrument(skip(self))]
    pub async fn try_decrement(&self, id: PlanId) -> Result<bool, CatalogError> {
        debug!("Sending request");
        match self.inner.perform_action(id, PlanAction::TryDecrement).await.map_err(catalog_error(id))? {
            PlanActionResult::TryDecrement(taken) => {
                if !taken {
                    debug!("No stock left");
                }
                Ok(taken)
            }
            other => Err(CatalogError::ActorCommunicationError(format!("Unexpected result: {other:?}"))),
        }
    }

    #[instrument(skip(self))]
    pub async fn stock(&self, id: PlanId) -> Result<u64, CatalogError> {
        debug!("Sending request");
        match self.inner.perform_action(id, PlanAction::CheckStock).await.map_err(catalog_error(id))? {
            PlanActionResult::CheckStock(level) => Ok(level),
            other => Err(CatalogError::ActorCommunicationError(format!("Unexpected result: {other:?}"))),
        }
    }

    /// Removes the plan. Orders that reference it keep their snapshot.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: PlanId) -> Result<(), CatalogError> {
        self.inner.delete(id).await.map_err(catalog_error(id))?;
        info!("Plan deleted");
        Ok(())
    }

    /// Inserts the launch catalog if there are no plans yet. Returns how many
    /// plans were added.
    #[instrument(skip(self))]
    pub async fn seed_defaults(&self) -> Result<usize, CatalogError> {
        if !self.list().await?.is_empty() {
            debug!("Catalog already populated, skipping seed");
            return Ok(0);
        }
        let defaults = default_plans();
        let count = defaults.len();
        for form in defaults {
            if let Err(e) = self.create_or_update(form).await {
                warn!(error = %e, "Failed to seed plan");
                return Err(e);
            }
        }
        info!(count, "Seeded default catalog");
        Ok(count)
    }
}
