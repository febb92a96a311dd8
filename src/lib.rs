//! # Plan Store
//!
//! Order reconciliation for a subscription-plan storefront: carts become
//! orders, plan stock is guarded against overselling, and orders move from
//! `pending` to `approved` with one-time side effects.
//!
//! ## Layout
//!
//! - **Resource actors** - [`actor_framework::ResourceActor`] owns the plan
//!   and order rows and serves one request at a time, so conditional writes
//!   (stock decrement, approval) are indivisible.
//! - **Clients** - [`clients::PlanCatalog`] and [`clients::OrderLedger`] wrap
//!   the actors with typed, instrumented methods.
//! - **Carts** - [`cart::CartStore`] keeps a per-session set of plan ids in an
//!   injected [`cart::SessionStore`].
//! - **Channels** - [`notify::NotificationGateway`] for the owner and
//!   [`notify::FulfillmentNotifier`] for the buyer, both best-effort.
//! - **Orchestration** - [`reconcile::ReconciliationService`] runs checkout,
//!   payment-reference submission and approval.
//! - **System** - [`app_system::StoreSystem`] starts and stops everything.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let config = AppConfig::from_env()?;
//! let system = StoreSystem::start(&config);
//!
//! let cart = system.service.cart(SessionId::new("buyer-1"));
//! cart.add(1).await?;
//! let orders = system
//!     .service
//!     .submit_cart_payment(SessionId::new("buyer-1"), PaymentSubmission::new("UTR123"))
//!     .await?;
//! system.service.approve(orders[0].id).await?;
//!
//! system.shutdown().await?;
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod cart;
pub mod clients;
pub mod domain;
pub mod notify;
pub mod order_actor;
pub mod plan_actor;
pub mod reconcile;

#[cfg(test)]
mod mock_framework;
