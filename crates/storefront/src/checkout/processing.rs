//! Step 3: payment processing.
//!
//! A spawned task walks through the status messages at a fixed interval and,
//! once the processing time has elapsed, charges a [`PaymentGateway`]. The
//! task publishes through a `watch` channel and is owned by a
//! [`ProcessingHandle`]; dropping or cancelling the handle aborts the task,
//! so nothing is ever published into a closed checkout.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use techsolutions_api_client::ApiClient;
use techsolutions_core::PaymentMethod;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, sleep_until};
use uuid::Uuid;

/// Interval and total duration of the simulated processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingTiming {
    /// Time between status messages.
    pub status_interval: Duration,
    /// Time from start until the gateway is charged.
    pub total: Duration,
}

impl Default for ProcessingTiming {
    fn default() -> Self {
        Self {
            status_interval: Duration::from_millis(600),
            total: Duration::from_millis(3000),
        }
    }
}

/// A charge to run once processing completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub method: PaymentMethod,
    pub amount: Decimal,
    /// Order number, used as the gateway reference.
    pub reference: String,
}

/// A charge the gateway accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub reference: String,
    pub transaction_id: String,
    pub message: String,
}

/// A charge the gateway refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PaymentFailure {
    pub message: String,
}

impl PaymentFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of the processing step.
pub type PaymentOutcome = Result<PaymentReceipt, PaymentFailure>;

/// Something that can take a payment.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> PaymentOutcome;
}

/// Local gateway that accepts every charge on an enabled method.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGateway {
    disabled: HashSet<PaymentMethod>,
}

impl SimulatedGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse charges on `method`.
    #[must_use]
    pub fn with_disabled(mut self, method: PaymentMethod) -> Self {
        self.disabled.insert(method);
        self
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &ChargeRequest) -> PaymentOutcome {
        if self.disabled.contains(&request.method) {
            return Err(PaymentFailure::new(format!(
                "La pasarela {} no está habilitada",
                request.method.as_str()
            )));
        }

        let token: String = Uuid::new_v4().simple().to_string().chars().take(12).collect();
        Ok(PaymentReceipt {
            reference: request.reference.clone(),
            transaction_id: format!("{}-{}", request.method.as_str().to_uppercase(), token),
            message: "Pago procesado correctamente".to_owned(),
        })
    }
}

/// Gateway that charges through the backend payments API.
#[derive(Clone)]
pub struct RemoteGateway {
    client: ApiClient,
}

impl RemoteGateway {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentGateway for RemoteGateway {
    async fn charge(&self, request: &ChargeRequest) -> PaymentOutcome {
        match self
            .client
            .charge(request.method.as_str(), request.amount, &request.reference)
            .await
        {
            Ok(receipt) => Ok(PaymentReceipt {
                transaction_id: receipt.referencia.clone(),
                reference: receipt.referencia,
                message: receipt.mensaje,
            }),
            Err(e) => {
                tracing::warn!(error = %e, reference = %request.reference, "Remote charge failed");
                Err(PaymentFailure::new(e.user_message()))
            }
        }
    }
}

/// Status messages shown while processing, in order.
#[must_use]
pub fn status_messages(method: PaymentMethod) -> [String; 5] {
    [
        format!("Conectando con {}...", method.display_name()),
        "Verificando datos de pago...".to_owned(),
        "Procesando transacción...".to_owned(),
        "Generando comprobante...".to_owned(),
        "Enviando confirmación por correo...".to_owned(),
    ]
}

/// What the processing task has published so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStatus {
    Running { message: String },
    Finished(PaymentOutcome),
}

/// Owner of a running processing task.
pub struct ProcessingHandle {
    task: JoinHandle<()>,
    status: watch::Receiver<ProcessingStatus>,
}

impl ProcessingHandle {
    /// Start processing `request` on the current runtime.
    #[must_use]
    pub fn spawn(
        gateway: Arc<dyn PaymentGateway>,
        request: ChargeRequest,
        timing: ProcessingTiming,
    ) -> Self {
        let [first, rest @ ..] = status_messages(request.method);
        let (tx, status) = watch::channel(ProcessingStatus::Running { message: first });

        let task = tokio::spawn(async move {
            let deadline = Instant::now() + timing.total;
            for message in rest {
                sleep(timing.status_interval).await;
                tx.send_replace(ProcessingStatus::Running { message });
            }
            sleep_until(deadline).await;

            let outcome = gateway.charge(&request).await;
            match &outcome {
                Ok(receipt) => tracing::info!(
                    reference = %receipt.reference,
                    transaction_id = %receipt.transaction_id,
                    "Payment accepted"
                ),
                Err(failure) => tracing::warn!(
                    reference = %request.reference,
                    reason = %failure,
                    "Payment refused"
                ),
            }
            tx.send_replace(ProcessingStatus::Finished(outcome));
        });

        Self { task, status }
    }

    /// Latest published status.
    #[must_use]
    pub fn status(&self) -> ProcessingStatus {
        self.status.borrow().clone()
    }

    /// Wait until the task publishes something new.
    ///
    /// Returns `false` once the task is gone.
    pub async fn changed(&mut self) -> bool {
        self.status.changed().await.is_ok()
    }

    /// Stop the task; nothing is published afterwards.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ProcessingHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            tracing::debug!("Cancelling payment processing");
        }
        self.task.abort();
    }
}
