//! # Mock Framework
//!
//! Utilities for testing clients and the reconciliation service in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then helpers
//! like [`expect_create`] or [`expect_action`] to assert on each request and
//! answer it. [`RecordingGateway`] and [`RecordingNotifier`] stand in for the
//! outbound channels and remember what they were asked to send.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::domain::{Order, OrderId, Plan};
use crate::notify::{FulfillmentNotifier, NotificationGateway};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls, so the test plays the
/// actor: it inspects each request and decides the reply.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Owner channel double.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<String>>,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the message but reports a delivery failure.
    pub fn failing() -> Self {
        let gateway = Self::default();
        gateway.failing.store(true, Ordering::SeqCst);
        gateway
    }

    /// Never answers within `delay`.
    pub fn hanging(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Self::default() }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationGateway for RecordingGateway {
    async fn send(&self, text: &str) -> bool {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.sent.lock().unwrap().push(text.to_string());
        !self.failing.load(Ordering::SeqCst)
    }
}

/// Buyer email double.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(OrderId, Option<Plan>)>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.failing.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn sent(&self) -> Vec<(OrderId, Option<Plan>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl FulfillmentNotifier for RecordingNotifier {
    async fn send(&self, order: &Order, plan: Option<&Plan>) -> bool {
        self.sent.lock().unwrap().push((order.id, plan.cloned()));
        !self.failing.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::PlanCatalog;
    use crate::plan_actor::{PlanAction, PlanActionResult};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Plan>(10);
        let catalog = PlanCatalog::new(client);

        let decrement = tokio::spawn(async move { catalog.try_decrement(4).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, 4);
        assert!(matches!(action, PlanAction::TryDecrement));
        responder.send(Ok(PlanActionResult::TryDecrement(false))).unwrap();

        assert_eq!(decrement.await.unwrap(), Ok(false));
    }

    #[tokio::test]
    async fn test_recording_doubles() {
        let gateway = RecordingGateway::failing();
        assert!(!gateway.send("hi").await);
        assert_eq!(gateway.sent(), vec!["hi".to_string()]);
    }
}
