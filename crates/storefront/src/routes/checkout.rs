//! Checkout route handlers.
//!
//! Every handler re-renders the checkout modal for the current step. Refused
//! transitions keep the step and add a warning toast. The open checkout is
//! found through the id stored in the visitor session.
//!
//! The cart stays editable while the modal is open, so every handler reloads
//! it and refreshes the checkout's totals before rendering.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use techsolutions_core::{DocumentType, PaymentMethod};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::cart::{CartItem, Notification};
use crate::checkout::{Checkout, CheckoutError, ContactForm, Progress, SUCCESS_MESSAGE};
use crate::error::{Result, add_breadcrumb};
use crate::models::session_keys;
use crate::routes::cart::load_cart;
use crate::state::{AppState, SharedCheckout};
use crate::views::{CheckoutView, NotificationView, notifications};

/// Checkout modal fragment. `view` is `None` once the modal is closed.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout.html")]
pub struct CheckoutTemplate {
    pub view: Option<CheckoutView>,
    pub notifications: Vec<NotificationView>,
}

impl CheckoutTemplate {
    fn render(checkout: &Checkout, notes: Vec<Notification>) -> Self {
        Self {
            view: Some(CheckoutView::new(checkout)),
            notifications: notifications(notes),
        }
    }

    fn closed(notes: Vec<Notification>) -> Self {
        Self {
            view: None,
            notifications: notifications(notes),
        }
    }
}

/// Payment method form data.
#[derive(Debug, Deserialize)]
pub struct MethodForm {
    pub method: PaymentMethod,
}

/// Document type form data.
#[derive(Debug, Deserialize)]
pub struct DocumentForm {
    pub document_type: DocumentType,
}

async fn current_checkout(
    state: &AppState,
    session: &Session,
) -> Result<Option<(Uuid, SharedCheckout)>> {
    let Some(id) = session.get::<Uuid>(session_keys::CHECKOUT_ID).await? else {
        return Ok(None);
    };
    Ok(state.checkout(id).await.map(|checkout| (id, checkout)))
}

fn expired() -> Response {
    CheckoutTemplate::closed(vec![Notification::warning(
        "Tu sesión de pago expiró. Vuelve a intentarlo.",
    )])
    .into_response()
}

/// Apply a transition to the visitor's checkout and re-render it.
///
/// `action` sees the cart's current lines.
async fn transition<F>(state: &AppState, session: &Session, action: F) -> Result<Response>
where
    F: FnOnce(&mut Checkout, &[CartItem]) -> std::result::Result<(), CheckoutError>,
{
    let Some((_, shared)) = current_checkout(state, session).await? else {
        return Ok(expired());
    };
    let cart = load_cart(session).await;
    let mut checkout = shared.lock().await;
    checkout.refresh_totals(cart.totals());

    let notes = match action(&mut *checkout, cart.items()) {
        Ok(()) => Vec::new(),
        Err(e) => {
            tracing::debug!(
                error = %e,
                step = checkout.step().number(),
                "Checkout transition refused"
            );
            vec![e.notification()]
        }
    };

    Ok(CheckoutTemplate::render(&checkout, notes).into_response())
}

/// Open the checkout at step 1. An empty cart is refused with a warning.
#[instrument(skip(state, session))]
pub async fn open(State(state): State<AppState>, session: Session) -> Result<Response> {
    if let Some((id, previous)) = current_checkout(&state, &session).await? {
        previous.lock().await.close();
        state.remove_checkout(id).await;
    }

    let cart = load_cart(&session).await;
    match Checkout::open(cart.item_count(), cart.totals()) {
        Ok(checkout) => {
            let view = CheckoutTemplate::render(&checkout, Vec::new());
            let id = state.insert_checkout(checkout).await;
            session.insert(session_keys::CHECKOUT_ID, id).await?;
            add_breadcrumb("checkout", "Opened checkout");
            Ok(view.into_response())
        }
        Err(e) => Ok(CheckoutTemplate::closed(vec![e.notification()]).into_response()),
    }
}

/// Select the payment method on step 1.
#[instrument(skip(state, session))]
pub async fn select_method(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MethodForm>,
) -> Result<Response> {
    transition(&state, &session, |c, _| c.select_payment_method(form.method)).await
}

/// Step 1 to step 2.
#[instrument(skip(state, session))]
pub async fn continue_to_contact(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response> {
    transition(&state, &session, |c, _| c.continue_to_contact()).await
}

/// Step 2 back to step 1.
#[instrument(skip(state, session))]
pub async fn back_to_payment(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response> {
    transition(&state, &session, |c, _| c.back_to_payment()).await
}

/// Select factura or boleta on step 2.
#[instrument(skip(state, session))]
pub async fn select_document(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<DocumentForm>,
) -> Result<Response> {
    transition(&state, &session, |c, _| {
        c.select_document_type(form.document_type)
    })
    .await
}

/// Live validation of the contact fields on step 2.
#[instrument(skip(state, session, form))]
pub async fn update_contact(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    transition(&state, &session, |c, _| c.update_contact(form).map(|_| ())).await
}

/// Validate the contact step and start processing.
#[instrument(skip(state, session, form))]
pub async fn pay(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let gateway = state.gateway();
    let timing = state.timing();
    transition(&state, &session, |c, items| {
        c.update_contact(form)?;
        c.start_processing(items, gateway, timing)
    })
    .await
}

/// Poll step 3.
///
/// On success the charged lines leave the cart and `cart-updated` is
/// triggered so the badge follows.
#[instrument(skip(state, session))]
pub async fn status(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some((_, shared)) = current_checkout(&state, &session).await? else {
        return Ok(expired());
    };
    let mut cart = load_cart(&session).await;
    let mut checkout = shared.lock().await;
    checkout.refresh_totals(cart.totals());

    match checkout.poll() {
        Progress::Completed => {
            if let Some(confirmation) = checkout.confirmation() {
                cart.remove_charged(&confirmation.items).await;
            }
            add_breadcrumb("checkout", "Payment completed");
            Ok((
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CheckoutTemplate::render(
                    &checkout,
                    vec![Notification::success(SUCCESS_MESSAGE)],
                ),
            )
                .into_response())
        }
        Progress::Failed { message } => Ok(CheckoutTemplate::render(
            &checkout,
            vec![Notification::error(format!("❌ {message}"))],
        )
        .into_response()),
        Progress::Processing { .. } | Progress::Idle => {
            Ok(CheckoutTemplate::render(&checkout, Vec::new()).into_response())
        }
    }
}

/// Close the checkout from any step, cancelling pending processing.
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Response> {
    if let Some((id, shared)) = current_checkout(&state, &session).await? {
        shared.lock().await.close();
        state.remove_checkout(id).await;
    }
    session.remove::<Uuid>(session_keys::CHECKOUT_ID).await?;
    Ok(CheckoutTemplate::closed(Vec::new()).into_response())
}
