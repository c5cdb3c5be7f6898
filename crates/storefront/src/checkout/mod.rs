//! Checkout wizard.
//!
//! Four linear steps:
//!
//! | Step | State | Leaves via |
//! |------|-------|------------|
//! | 1 | [`Step::PaymentSelect`] | [`Checkout::continue_to_contact`] |
//! | 2 | [`Step::ContactInfo`] | [`Checkout::start_processing`], or back to 1 |
//! | 3 | [`Step::Processing`] | [`Checkout::poll`] once the charge settles |
//! | 4 | [`Step::Confirmation`] | terminal; [`Checkout::close`] |
//!
//! A failed charge drops back to step 2 with the gateway's message. Closing
//! at any step cancels the processing task.
//!
//! Totals follow the cart on steps 1 and 2 ([`Checkout::refresh_totals`]).
//! [`Checkout::start_processing`] charges the lines the cart holds at that
//! moment; from then on the charged lines and total are fixed, and only
//! those lines are taken out of the cart on success.

pub mod order;
pub mod processing;
pub mod validation;

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use techsolutions_core::{DocumentType, Email, PaymentMethod, Totals};
use thiserror::Error;

use crate::cart::{CartItem, Notification};

pub use processing::{
    ChargeRequest, PaymentFailure, PaymentGateway, PaymentOutcome, PaymentReceipt,
    ProcessingHandle, ProcessingStatus, ProcessingTiming, RemoteGateway, SimulatedGateway,
};
pub use validation::{ContactForm, CustomerInfo, FieldError, ValidContact, validate_contact};

/// Message queued after a successful payment.
pub const SUCCESS_MESSAGE: &str = "🎉 ¡Pago exitoso! Tu comprobante ha sido enviado al correo.";

/// Wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    PaymentSelect = 1,
    ContactInfo = 2,
    Processing = 3,
    Confirmation = 4,
}

impl Step {
    /// 1-based position for the progress indicator.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

/// Why a checkout transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Tu carrito está vacío")]
    EmptyCart,

    #[error("Selecciona un método de pago")]
    NoPaymentMethod,

    #[error("Completa todos los campos requeridos")]
    IncompleteContact(Vec<FieldError>),

    #[error(
        "Paso incorrecto: se esperaba el paso {}, el checkout está en el paso {}",
        expected.number(),
        actual.number()
    )]
    WrongStep { expected: Step, actual: Step },
}

impl CheckoutError {
    /// Warning shown to the visitor.
    #[must_use]
    pub fn notification(&self) -> Notification {
        Notification::warning(self.to_string())
    }
}

/// Receipt data shown on step 4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub order_number: String,
    pub method: PaymentMethod,
    pub document_type: DocumentType,
    pub total: Decimal,
    /// Lines covered by the charge.
    pub items: Vec<CartItem>,
    pub email: Email,
    pub customer: CustomerInfo,
    pub transaction_id: String,
}

/// Result of [`Checkout::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Not processing.
    Idle,
    /// Step 3 with the latest status message.
    Processing { message: String },
    /// Just moved to step 4. The caller takes the charged lines out of the cart.
    Completed,
    /// Charge refused; back on step 2.
    Failed { message: String },
}

struct Pending {
    handle: ProcessingHandle,
    order_number: String,
    contact: ValidContact,
    items: Vec<CartItem>,
    total: Decimal,
}

/// One visitor's checkout.
pub struct Checkout {
    step: Step,
    totals: Totals,
    payment_method: Option<PaymentMethod>,
    document_type: Option<DocumentType>,
    contact: ContactForm,
    field_errors: Vec<FieldError>,
    status_message: Option<String>,
    last_error: Option<String>,
    pending: Option<Pending>,
    confirmation: Option<Confirmation>,
}

impl Checkout {
    /// Open a checkout for a cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when the cart has no units.
    pub fn open(item_count: u32, totals: Totals) -> Result<Self, CheckoutError> {
        if item_count == 0 {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            step: Step::PaymentSelect,
            totals,
            payment_method: None,
            document_type: None,
            contact: ContactForm::default(),
            field_errors: Vec::new(),
            status_message: None,
            last_error: None,
            pending: None,
            confirmation: None,
        })
    }

    /// Follow the cart's current totals. Ignored once processing has started.
    pub fn refresh_totals(&mut self, totals: Totals) {
        if self.step <= Step::ContactInfo {
            self.totals = totals;
        }
    }

    fn expect_step(&self, expected: Step) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    /// # Errors
    ///
    /// Only allowed on step 1.
    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.expect_step(Step::PaymentSelect)?;
        self.payment_method = Some(method);
        Ok(())
    }

    /// Step 1 to step 2.
    ///
    /// # Errors
    ///
    /// Refused until a payment method is selected.
    pub fn continue_to_contact(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(Step::PaymentSelect)?;
        if self.payment_method.is_none() {
            return Err(CheckoutError::NoPaymentMethod);
        }
        self.step = Step::ContactInfo;
        self.revalidate();
        Ok(())
    }

    /// Step 2 back to step 1. Entered contact data is kept.
    ///
    /// # Errors
    ///
    /// Only allowed on step 2.
    pub fn back_to_payment(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(Step::ContactInfo)?;
        self.step = Step::PaymentSelect;
        self.last_error = None;
        Ok(())
    }

    /// # Errors
    ///
    /// Only allowed on step 2.
    pub fn select_document_type(
        &mut self,
        document_type: DocumentType,
    ) -> Result<(), CheckoutError> {
        self.expect_step(Step::ContactInfo)?;
        self.document_type = Some(document_type);
        self.revalidate();
        Ok(())
    }

    /// Replace the contact form and re-run validation.
    ///
    /// # Errors
    ///
    /// Only allowed on step 2.
    pub fn update_contact(&mut self, form: ContactForm) -> Result<&[FieldError], CheckoutError> {
        self.expect_step(Step::ContactInfo)?;
        self.contact = form;
        self.revalidate();
        Ok(&self.field_errors)
    }

    fn revalidate(&mut self) {
        self.field_errors = validate_contact(self.document_type, &self.contact)
            .err()
            .unwrap_or_default();
    }

    /// Whether the current step's forward button is enabled: a method is
    /// picked on step 1, the contact form validates on step 2.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        match self.step {
            Step::PaymentSelect => self.payment_method.is_some(),
            Step::ContactInfo => self.field_errors.is_empty(),
            Step::Processing | Step::Confirmation => false,
        }
    }

    /// Step 2 to step 3: validate, then start charging `gateway` for `items`.
    ///
    /// # Errors
    ///
    /// Refused off step 2, when `items` is empty, or when the contact form
    /// does not validate.
    pub fn start_processing(
        &mut self,
        items: &[CartItem],
        gateway: Arc<dyn PaymentGateway>,
        timing: ProcessingTiming,
    ) -> Result<(), CheckoutError> {
        self.expect_step(Step::ContactInfo)?;
        if items.iter().all(|item| item.quantity == 0) {
            return Err(CheckoutError::EmptyCart);
        }
        let method = self.payment_method.ok_or(CheckoutError::NoPaymentMethod)?;
        let contact = validate_contact(self.document_type, &self.contact).map_err(|errors| {
            self.field_errors.clone_from(&errors);
            CheckoutError::IncompleteContact(errors)
        })?;

        self.totals = Totals::from_subtotal(items.iter().map(CartItem::line_total).sum());
        let total = self.totals.total;

        let order_number = order::new_order_number();
        let request = ChargeRequest {
            method,
            amount: total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            reference: order_number.clone(),
        };
        tracing::info!(
            order_number = %order_number,
            method = %method,
            amount = %request.amount,
            "Starting payment processing"
        );

        let handle = ProcessingHandle::spawn(gateway, request, timing);
        if let ProcessingStatus::Running { message } = handle.status() {
            self.status_message = Some(message);
        }
        self.pending = Some(Pending {
            handle,
            order_number,
            contact,
            items: items.to_vec(),
            total,
        });
        self.last_error = None;
        self.step = Step::Processing;
        Ok(())
    }

    /// Pull the processing task's latest status into the checkout.
    pub fn poll(&mut self) -> Progress {
        let Some(pending) = self.pending.as_ref() else {
            return Progress::Idle;
        };

        match pending.handle.status() {
            ProcessingStatus::Running { message } => {
                self.status_message = Some(message.clone());
                Progress::Processing { message }
            }
            ProcessingStatus::Finished(outcome) => {
                let Some(pending) = self.pending.take() else {
                    return Progress::Idle;
                };
                self.status_message = None;
                self.settle(outcome, pending)
            }
        }
    }

    fn settle(&mut self, outcome: PaymentOutcome, pending: Pending) -> Progress {
        let Pending {
            order_number,
            contact,
            items,
            total,
            ..
        } = pending;

        match (outcome, self.payment_method) {
            (Ok(receipt), Some(method)) => {
                self.confirmation = Some(Confirmation {
                    order_number,
                    method,
                    document_type: contact.customer.document_type(),
                    total,
                    items,
                    email: contact.email,
                    customer: contact.customer,
                    transaction_id: receipt.transaction_id,
                });
                self.step = Step::Confirmation;
                tracing::info!(order_number = %receipt.reference, "Checkout completed");
                Progress::Completed
            }
            (Ok(_), None) => {
                self.step = Step::ContactInfo;
                let message = CheckoutError::NoPaymentMethod.to_string();
                self.last_error = Some(message.clone());
                Progress::Failed { message }
            }
            (Err(failure), _) => {
                self.step = Step::ContactInfo;
                self.last_error = Some(failure.message.clone());
                Progress::Failed {
                    message: failure.message,
                }
            }
        }
    }

    /// Cancel any pending charge and discard every selection.
    pub fn close(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::info!(
                order_number = %pending.order_number,
                "Checkout closed during processing"
            );
            pending.handle.cancel();
        }
        self.step = Step::PaymentSelect;
        self.payment_method = None;
        self.document_type = None;
        self.contact = ContactForm::default();
        self.field_errors.clear();
        self.status_message = None;
        self.last_error = None;
        self.confirmation = None;
    }

    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub const fn totals(&self) -> Totals {
        self.totals
    }

    #[must_use]
    pub const fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    #[must_use]
    pub const fn document_type(&self) -> Option<DocumentType> {
        self.document_type
    }

    #[must_use]
    pub const fn contact(&self) -> &ContactForm {
        &self.contact
    }

    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Latest step 3 status message.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Message of the last refused charge.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub const fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time::sleep;

    use super::*;

    fn totals() -> Totals {
        Totals::from_subtotal(Decimal::from(25))
    }

    fn line(id: i64, price: i64, quantity: u32) -> CartItem {
        CartItem {
            id: techsolutions_core::ProductId::new(id),
            name: format!("Producto {id}"),
            price: Decimal::from(price),
            emoji: "📦".to_owned(),
            quantity,
        }
    }

    /// Subtotal 25, matching [`totals`].
    fn items() -> Vec<CartItem> {
        vec![line(1, 10, 2), line(2, 5, 1)]
    }

    fn boleta() -> ContactForm {
        ContactForm {
            email: "ana@correo.pe".to_owned(),
            dni: "12345678".to_owned(),
            nombre_cliente: "Ana Torres".to_owned(),
            ..ContactForm::default()
        }
    }

    fn at_contact_step() -> Checkout {
        let mut checkout = Checkout::open(3, totals()).unwrap();
        checkout.select_payment_method(PaymentMethod::Yape).unwrap();
        checkout.continue_to_contact().unwrap();
        checkout
    }

    fn ready_to_pay() -> Checkout {
        let mut checkout = at_contact_step();
        checkout.select_document_type(DocumentType::Boleta).unwrap();
        checkout.update_contact(boleta()).unwrap();
        checkout
    }

    struct Refusing;

    #[async_trait]
    impl PaymentGateway for Refusing {
        async fn charge(&self, _request: &ChargeRequest) -> PaymentOutcome {
            Err(PaymentFailure::new("Fondos insuficientes"))
        }
    }

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl PaymentGateway for Counting {
        async fn charge(&self, request: &ChargeRequest) -> PaymentOutcome {
            self.0.fetch_add(1, Ordering::SeqCst);
            SimulatedGateway::new().charge(request).await
        }
    }

    #[test]
    fn test_open_refuses_empty_cart() {
        let err = Checkout::open(0, Totals::default()).err().unwrap();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(err.notification(), Notification::warning("Tu carrito está vacío"));
    }

    #[test]
    fn test_cannot_leave_step_one_without_method() {
        let mut checkout = Checkout::open(1, totals()).unwrap();
        assert_eq!(checkout.step(), Step::PaymentSelect);
        assert!(!checkout.can_continue());
        assert_eq!(
            checkout.continue_to_contact(),
            Err(CheckoutError::NoPaymentMethod)
        );
        assert_eq!(checkout.step(), Step::PaymentSelect);
    }

    #[test]
    fn test_back_navigation_only_from_contact() {
        let mut checkout = Checkout::open(1, totals()).unwrap();
        assert!(checkout.back_to_payment().is_err());

        let mut checkout = at_contact_step();
        checkout.back_to_payment().unwrap();
        assert_eq!(checkout.step(), Step::PaymentSelect);
        assert!(checkout.can_continue());
        assert_eq!(checkout.payment_method(), Some(PaymentMethod::Yape));
    }

    #[test]
    fn test_contact_fields_locked_on_step_one() {
        let mut checkout = Checkout::open(1, totals()).unwrap();
        assert!(matches!(
            checkout.select_document_type(DocumentType::Factura),
            Err(CheckoutError::WrongStep {
                expected: Step::ContactInfo,
                actual: Step::PaymentSelect
            })
        ));
    }

    #[test]
    fn test_every_update_revalidates() {
        let mut checkout = at_contact_step();
        assert!(!checkout.can_continue());

        checkout.select_document_type(DocumentType::Factura).unwrap();
        let errors = checkout
            .update_contact(ContactForm {
                email: "compras@empresa.pe".to_owned(),
                ruc: "2012345678".to_owned(),
                razon_social: "Empresa SAC".to_owned(),
                direccion_fiscal: "Av. Arequipa 123".to_owned(),
                ..ContactForm::default()
            })
            .unwrap()
            .to_vec();
        assert_eq!(errors, vec![FieldError::Ruc]);
        assert!(!checkout.can_continue());

        checkout.select_document_type(DocumentType::Boleta).unwrap();
        checkout.update_contact(boleta()).unwrap();
        assert!(checkout.can_continue());
    }

    #[tokio::test]
    async fn test_invalid_email_blocks_processing() {
        let mut checkout = at_contact_step();
        checkout.select_document_type(DocumentType::Boleta).unwrap();
        checkout
            .update_contact(ContactForm {
                email: "ana@correo".to_owned(),
                ..boleta()
            })
            .unwrap();

        let err = checkout
            .start_processing(&items(), Arc::new(SimulatedGateway::new()), ProcessingTiming::default())
            .err()
            .unwrap();
        assert_eq!(err, CheckoutError::IncompleteContact(vec![FieldError::Email]));
        assert_eq!(err.to_string(), "Completa todos los campos requeridos");
        assert_eq!(checkout.step(), Step::ContactInfo);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_payment_reaches_confirmation() {
        let mut checkout = ready_to_pay();
        checkout
            .start_processing(&items(), Arc::new(SimulatedGateway::new()), ProcessingTiming::default())
            .unwrap();
        assert_eq!(checkout.step(), Step::Processing);
        assert_eq!(checkout.status_message(), Some("Conectando con Yape..."));

        sleep(Duration::from_millis(1300)).await;
        assert_eq!(
            checkout.poll(),
            Progress::Processing {
                message: "Procesando transacción...".to_owned()
            }
        );

        sleep(Duration::from_secs(2)).await;
        assert_eq!(checkout.poll(), Progress::Completed);
        assert_eq!(checkout.step(), Step::Confirmation);

        let confirmation = checkout.confirmation().unwrap();
        assert!(confirmation.order_number.starts_with("ORD-"));
        assert_eq!(confirmation.method, PaymentMethod::Yape);
        assert_eq!(confirmation.document_type, DocumentType::Boleta);
        assert_eq!(confirmation.total, Decimal::new(2950, 2));
        assert_eq!(confirmation.email.as_str(), "ana@correo.pe");
        assert!(confirmation.transaction_id.starts_with("YAPE-"));

        assert_eq!(checkout.poll(), Progress::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refused_payment_returns_to_contact() {
        let mut checkout = ready_to_pay();
        checkout
            .start_processing(&items(), Arc::new(Refusing), ProcessingTiming::default())
            .unwrap();

        sleep(Duration::from_secs(4)).await;
        assert_eq!(
            checkout.poll(),
            Progress::Failed {
                message: "Fondos insuficientes".to_owned()
            }
        );
        assert_eq!(checkout.step(), Step::ContactInfo);
        assert_eq!(checkout.last_error(), Some("Fondos insuficientes"));
        assert!(checkout.can_continue());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_during_processing_cancels_charge() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut checkout = ready_to_pay();
        checkout
            .start_processing(
                &items(),
                Arc::new(Counting(Arc::clone(&calls))),
                ProcessingTiming::default(),
            )
            .unwrap();

        sleep(Duration::from_millis(700)).await;
        checkout.close();
        sleep(Duration::from_secs(5)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(checkout.poll(), Progress::Idle);
        assert_eq!(checkout.step(), Step::PaymentSelect);
        assert_eq!(checkout.payment_method(), None);
        assert_eq!(checkout.document_type(), None);
    }

    #[test]
    fn test_totals_follow_cart_before_processing() {
        let mut checkout = Checkout::open(3, totals()).unwrap();
        checkout.refresh_totals(Totals::from_subtotal(Decimal::from(100)));
        assert_eq!(checkout.totals().total, Decimal::from(118));

        checkout.select_payment_method(PaymentMethod::Yape).unwrap();
        checkout.continue_to_contact().unwrap();
        checkout.refresh_totals(Totals::from_subtotal(Decimal::from(50)));
        assert_eq!(checkout.totals().total, Decimal::from(59));
    }

    #[test]
    fn test_processing_refuses_empty_cart() {
        let mut checkout = ready_to_pay();
        let err = checkout
            .start_processing(&[], Arc::new(SimulatedGateway::new()), ProcessingTiming::default())
            .err()
            .unwrap();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(checkout.step(), Step::ContactInfo);
    }

    #[tokio::test(start_paused = true)]
    async fn test_charge_covers_cart_at_payment_time() {
        let mut checkout = ready_to_pay();
        let mut cart = items();
        cart.push(line(3, 100, 1));

        checkout
            .start_processing(&cart, Arc::new(SimulatedGateway::new()), ProcessingTiming::default())
            .unwrap();
        assert_eq!(checkout.totals().total, Decimal::new(14750, 2));

        checkout.refresh_totals(totals());
        assert_eq!(checkout.totals().total, Decimal::new(14750, 2));

        sleep(Duration::from_secs(4)).await;
        assert_eq!(checkout.poll(), Progress::Completed);

        let confirmation = checkout.confirmation().unwrap();
        assert_eq!(confirmation.total, Decimal::new(14750, 2));
        assert_eq!(confirmation.items, cart);

        checkout.refresh_totals(totals());
        assert_eq!(checkout.totals().total, Decimal::new(14750, 2));
    }
}
