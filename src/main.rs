use plan_store::app_system::{setup_tracing, AppConfig, StoreSystem};
use plan_store::cart::SessionId;
use plan_store::domain::PaymentSubmission;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(format!("Failed to read .env: {e}"));
        }
    }
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    setup_tracing(&config.log_filter);

    info!("Starting plan store");

    let system = StoreSystem::start(&config);
    let service = system.service.clone();

    let seeded = service.catalog().seed_defaults().await.map_err(|e| e.to_string())?;
    info!(seeded, "Catalog ready");

    let session = SessionId::new("demo-buyer");
    let span = tracing::info_span!("manual_payment", session = %session);
    let orders = async {
        let cart = service.cart(session.clone());
        cart.add(1).await.map_err(|e| e.to_string())?;
        cart.add(3).await.map_err(|e| e.to_string())?;
        let snapshot = cart.snapshot().await.map_err(|e| e.to_string())?;
        info!(items = snapshot.plans.len(), total = snapshot.total, "Cart ready");

        let payment = PaymentSubmission::new("UTR123456").with_buyer("Demo Buyer", "buyer@example.com");
        service.submit_cart_payment(session.clone(), payment).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    for order in &orders {
        match service.approve(order.id).instrument(tracing::info_span!("admin_approval")).await {
            Ok(report) => {
                let json = serde_json::to_string(&report.order).map_err(|e| e.to_string())?;
                info!(
                    order_id = order.id,
                    stock_decremented = report.stock_decremented,
                    fulfillment_sent = report.fulfillment_sent,
                    order = %json,
                    "Order approved"
                );
            }
            Err(e) => error!(order_id = order.id, error = %e, "Approval failed"),
        }
    }

    service.cart(session.clone()).add(2).await.map_err(|e| e.to_string())?;
    match service.checkout_card(session.clone()).await {
        Ok(receipt) => info!(total = receipt.total, "Card checkout successful"),
        Err(e) => info!(error = %e, "Card checkout not completed"),
    }

    drop(service);
    system.shutdown().await?;

    info!("Plan store stopped");
    Ok(())
}
