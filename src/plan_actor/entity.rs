use crate::actor_framework::Entity;
use crate::domain::{parse_amount, Plan, PlanForm, PlanId};
use super::actions::{PlanAction, PlanActionResult};

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Entity for Plan {
    type Id = PlanId;
    type CreateParams = PlanForm;
    type Patch = PlanForm;
    type Action = PlanAction;
    type ActionResult = PlanActionResult;

    /// Creates a new Plan from an admin form.
    ///
    /// # Errors
    /// Fails if the form has no non-blank name. Unparseable price or stock
    /// default to zero.
    fn from_create_params(id: PlanId, params: PlanForm) -> Result<Self, String> {
        let name = non_blank(params.name).ok_or_else(|| "plan name is required".to_string())?;
        Ok(Self {
            id,
            name,
            price: parse_amount(params.price.as_deref(), 0),
            stock: parse_amount(params.stock.as_deref(), 0),
            logo: params.logo.unwrap_or_default(),
            description: params.description.unwrap_or_default(),
        })
    }

    /// Applies an admin edit. Absent fields are left alone, blank names are
    /// ignored, and invalid amounts keep the current value.
    fn on_update(&mut self, patch: PlanForm) -> Result<(), String> {
        if let Some(name) = non_blank(patch.name) {
            self.name = name;
        }
        self.price = parse_amount(patch.price.as_deref(), self.price);
        self.stock = parse_amount(patch.stock.as_deref(), self.stock);
        if let Some(logo) = patch.logo {
            self.logo = logo;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: PlanAction) -> Result<PlanActionResult, String> {
        match action {
            PlanAction::CheckStock => Ok(PlanActionResult::CheckStock(self.stock)),
            PlanAction::TryDecrement => match self.stock.checked_sub(1) {
                Some(remaining) => {
                    self.stock = remaining;
                    Ok(PlanActionResult::TryDecrement(true))
                }
                None => Ok(PlanActionResult::TryDecrement(false)),
            },
        }
    }
}
