//! View models for templates.
//!
//! Everything here is a pure projection of cart, catalog or checkout state
//! into pre-formatted strings. Templates do no arithmetic and no formatting.

use techsolutions_core::{DocumentType, PaymentMethod, Totals, format_soles};

use crate::cart::{CartItem, Notification, badge_label};
use crate::catalog::{CATEGORIES, PRICE_RANGES, Product, ProductFilter};
use crate::checkout::{Checkout, Confirmation, ContactForm, FieldError, Step};

/// `1 producto` / `N productos`.
#[must_use]
pub fn pluralize_products(count: u32) -> String {
    if count == 1 {
        "1 producto".to_owned()
    } else {
        format!("{count} productos")
    }
}

/// A queued toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub kind: &'static str,
    pub message: String,
}

impl From<Notification> for NotificationView {
    fn from(n: Notification) -> Self {
        Self {
            kind: n.kind.as_str(),
            message: n.message,
        }
    }
}

/// Convert drained notifications for rendering.
#[must_use]
pub fn notifications(items: Vec<Notification>) -> Vec<NotificationView> {
    items.into_iter().map(NotificationView::from).collect()
}

/// `<option>` in a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Product card on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub emoji: String,
    pub price: String,
    pub old_price: Option<String>,
    pub discount: Option<String>,
    pub reviews: String,
}

impl From<&Product> for ProductCardView {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            brand: p.category.to_uppercase(),
            emoji: p.emoji.clone(),
            price: format_soles(p.price),
            old_price: p.old_price.map(format_soles),
            discount: (p.discount > 0).then(|| format!("{}% OFF", p.discount)),
            reviews: format!("({})", p.rating),
        }
    }
}

/// Listing page state.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub products: Vec<ProductCardView>,
    pub search: String,
    pub categories: Vec<OptionView>,
    pub price_ranges: Vec<OptionView>,
    pub result_label: String,
    pub filtered: bool,
}

impl ListingView {
    #[must_use]
    pub fn new(products: &[Product], filter: &ProductFilter) -> Self {
        let options = |choices: &'static [(&'static str, &'static str)],
                       current: &str|
         -> Vec<OptionView> {
            choices
                .iter()
                .map(|&(value, label)| OptionView {
                    value,
                    label,
                    selected: value == current.trim(),
                })
                .collect()
        };

        Self {
            products: products.iter().map(ProductCardView::from).collect(),
            search: filter.search.clone(),
            categories: options(CATEGORIES, &filter.category),
            price_ranges: options(PRICE_RANGES, &filter.price),
            result_label: pluralize_products(u32::try_from(products.len()).unwrap_or(u32::MAX)),
            filtered: filter.is_active(),
        }
    }
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub quantity: u32,
    pub decrement: i64,
    pub increment: i64,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            emoji: item.emoji.clone(),
            quantity: item.quantity,
            decrement: i64::from(item.quantity) - 1,
            increment: i64::from(item.quantity) + 1,
            unit_price: format_soles(item.price),
            line_total: format_soles(item.line_total()),
        }
    }
}

/// Formatted subtotal, IGV and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl From<Totals> for TotalsView {
    fn from(t: Totals) -> Self {
        Self {
            subtotal: format_soles(t.subtotal),
            tax: format_soles(t.tax),
            total: format_soles(t.total),
        }
    }
}

/// Cart page and cart fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub totals: TotalsView,
    pub item_count: u32,
    pub count_label: String,
    pub badge: Option<String>,
}

impl CartView {
    #[must_use]
    pub fn new(items: &[CartItem], totals: Totals, item_count: u32) -> Self {
        Self {
            items: items.iter().map(CartItemView::from).collect(),
            totals: totals.into(),
            item_count,
            count_label: pluralize_products(item_count),
            badge: badge_label(item_count),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Payment method card on step 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Step 4 receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationView {
    pub order_number: String,
    pub method: &'static str,
    pub document_label: &'static str,
    pub sent_label: &'static str,
    pub total: String,
    pub email: String,
    pub holder: String,
    pub transaction_id: String,
}

impl From<&Confirmation> for ConfirmationView {
    fn from(c: &Confirmation) -> Self {
        Self {
            order_number: c.order_number.clone(),
            method: c.method.display_name(),
            document_label: c.document_type.label(),
            sent_label: c.document_type.sent_label(),
            total: format_soles(c.total),
            email: c.email.as_str().to_owned(),
            holder: c.customer.holder().to_owned(),
            transaction_id: c.transaction_id.clone(),
        }
    }
}

/// The checkout modal at any step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutView {
    pub step: u8,
    pub methods: Vec<MethodView>,
    pub selected_method: Option<&'static str>,
    pub document_types: Vec<OptionView>,
    pub is_factura: bool,
    pub is_boleta: bool,
    pub contact: ContactForm,
    hints: Vec<(&'static str, &'static str)>,
    pub can_continue: bool,
    pub status_message: String,
    pub error: Option<String>,
    pub totals: TotalsView,
    pub confirmation: Option<ConfirmationView>,
}

impl CheckoutView {
    #[must_use]
    pub fn new(checkout: &Checkout) -> Self {
        let method = checkout.payment_method();
        let document = checkout.document_type();
        let contact = checkout.contact().clone();

        let hints = checkout
            .field_errors()
            .iter()
            .filter(|&&error| !field_value(&contact, error).trim().is_empty())
            .map(|&error| (error.field(), error.hint()))
            .collect();

        Self {
            step: checkout.step().number(),
            methods: PaymentMethod::ALL
                .iter()
                .map(|&m| MethodView {
                    value: m.as_str(),
                    label: m.display_name(),
                    selected: method == Some(m),
                })
                .collect(),
            selected_method: method.map(PaymentMethod::display_name),
            document_types: [DocumentType::Factura, DocumentType::Boleta]
                .iter()
                .map(|&d| OptionView {
                    value: d.as_str(),
                    label: d.label(),
                    selected: document == Some(d),
                })
                .collect(),
            is_factura: document == Some(DocumentType::Factura),
            is_boleta: document == Some(DocumentType::Boleta),
            contact,
            hints,
            can_continue: checkout.can_continue(),
            status_message: checkout.status_message().unwrap_or_default().to_owned(),
            error: checkout.last_error().map(str::to_owned),
            totals: checkout.totals().into(),
            confirmation: checkout.confirmation().map(ConfirmationView::from),
        }
    }

    /// Inline hint for a form field, if it has one.
    #[must_use]
    pub fn hint(&self, field: &str) -> Option<&'static str> {
        self.hints
            .iter()
            .find(|(name, _)| *name == field)
            .map(|&(_, hint)| hint)
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.step == Step::Processing.number()
    }
}

/// Hints are only shown for fields the visitor has typed into.
fn field_value(form: &ContactForm, error: FieldError) -> &str {
    match error {
        FieldError::DocumentType => "",
        FieldError::Email => &form.email,
        FieldError::Ruc => &form.ruc,
        FieldError::RazonSocial => &form.razon_social,
        FieldError::DireccionFiscal => &form.direccion_fiscal,
        FieldError::Dni => &form.dni,
        FieldError::NombreCliente => &form.nombre_cliente,
    }
}
