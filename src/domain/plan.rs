use serde::{Deserialize, Serialize};

pub type PlanId = u64;

/// A sellable subscription offering.
///
/// `price` is in the smallest currency unit. `stock` is unsigned, so it can
/// only reach zero through the conditional decrement, never go below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub price: u64,
    pub stock: u64,
    pub logo: String,
    pub description: String,
}

/// Admin form for adding or editing a plan.
///
/// Price and stock arrive as raw text. They are parsed leniently when the
/// form is applied: anything that is not a non-negative integer keeps the
/// previous value (zero for a new plan).
#[derive(Debug, Clone, Default)]
pub struct PlanForm {
    pub id: Option<PlanId>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
}

impl PlanForm {
    pub fn new(name: impl Into<String>, price: u64, stock: u64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.to_string()),
            stock: Some(stock.to_string()),
            ..Self::default()
        }
    }

    pub fn edit(id: PlanId) -> Self {
        Self { id: Some(id), ..Self::default() }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_stock(mut self, stock: impl Into<String>) -> Self {
        self.stock = Some(stock.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Parses an admin-supplied amount, falling back to `previous` for anything
/// that is not a non-negative integer.
pub fn parse_amount(raw: Option<&str>, previous: u64) -> u64 {
    match raw.map(str::trim) {
        None | Some("") => previous,
        Some(text) => text.parse::<u64>().unwrap_or_else(|_| {
            tracing::warn!(input = text, kept = previous, "Ignoring invalid amount");
            previous
        }),
    }
}

/// The storefront's launch catalog, inserted when the catalog starts empty.
pub fn default_plans() -> Vec<PlanForm> {
    [
        ("Netflix Premium", 199, "netflix.png", "4K UHD • 4 Screens • 30 Days", 10),
        ("Amazon Prime Video", 149, "prime.png", "Full HD • All Devices • 30 Days", 15),
        ("Disney+ Hotstar", 299, "hotstar.png", "Sports + Movies + Web Series", 8),
        ("Sony LIV Premium", 129, "sonyliv.png", "Full HD • Originals • TV Shows", 12),
        ("Zee5 Premium", 99, "zee5.png", "Regional content • 30 Days", 20),
    ]
    .into_iter()
    .map(|(name, price, logo, description, stock)| {
        PlanForm::new(name, price, stock).with_logo(logo).with_description(description)
    })
    .collect()
}
