//! Cart store.
//!
//! Holds the visitor's line items, keeps them persisted through a
//! [`CartStorage`] port and derives totals and the header badge from them.
//! The store is rebuilt from storage on every request, so totals are never
//! cached.
//!
//! Persistence failures are logged and swallowed: a cart that cannot be
//! saved still answers for the current request, and a cart that cannot be
//! read (absent or corrupt) starts empty.

pub mod coupon;
mod notification;
pub mod storage;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use techsolutions_core::{ProductId, Totals};

pub use notification::{Notification, NotificationKind};
pub use storage::{CART_KEY, CartStorage, MemoryStorage, SessionStorage, StorageError};

/// Emoji shown when a product has none.
pub const DEFAULT_EMOJI: &str = "📦";

/// Badge values above this show as `99+`.
const BADGE_MAX: u32 = 99;

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_owned()
}

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// What the cart needs to know about a product being added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub emoji: Option<String>,
}

/// The visitor's cart.
pub struct CartStore<S> {
    storage: S,
    items: Vec<CartItem>,
    notifications: Vec<Notification>,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart from storage.
    ///
    /// Absent, unreadable or corrupt data yields an empty cart.
    pub async fn load(storage: S) -> Self {
        let items = match storage.get(CART_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(mut items) => {
                    items.retain(|item| item.quantity > 0);
                    items
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable cart");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read cart from storage");
                Vec::new()
            }
        };

        Self {
            storage,
            items,
            notifications: Vec::new(),
        }
    }

    /// Write the whole item list back to storage.
    pub async fn save(&self) {
        let raw = match serde_json::to_string(&self.items) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(CART_KEY, raw).await {
            tracing::error!(error = %e, "Failed to persist cart");
        }
    }

    /// Add one unit of a product.
    pub async fn add(&mut self, product: NewItem) {
        let name = product.name.clone();
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                id: product.id,
                name: product.name,
                price: product.price,
                emoji: product.emoji.unwrap_or_else(default_emoji),
                quantity: 1,
            });
        }

        self.save().await;
        self.notifications
            .push(Notification::success(format!("✨ {name} agregado al carrito")));
        tracing::debug!(product_id = %product.id, count = self.item_count(), "Added to cart");
    }

    /// Remove a product line. Unknown ids are ignored.
    pub async fn remove(&mut self, id: ProductId) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return;
        }

        self.save().await;
        self.notifications
            .push(Notification::info("🗑️ Producto removido"));
    }

    /// Set a line's quantity; zero or negative removes the line.
    ///
    /// Unknown ids are ignored.
    pub async fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id).await;
            return;
        }

        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return;
        };
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.save().await;
    }

    /// Empty the cart.
    pub async fn clear(&mut self) {
        self.items.clear();
        self.save().await;
    }

    /// Take paid lines out of the cart.
    ///
    /// Each charged quantity is subtracted from the matching line; units
    /// added after the charge started stay in the cart. With an unchanged
    /// cart this empties it.
    pub async fn remove_charged(&mut self, charged: &[CartItem]) {
        for paid in charged {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == paid.id) {
                item.quantity = item.quantity.saturating_sub(paid.quantity);
            }
        }
        self.items.retain(|item| item.quantity > 0);
        self.save().await;
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subtotal, IGV and total of the current items.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::from_subtotal(self.items.iter().map(CartItem::line_total).sum())
    }

    /// Total number of units.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Header badge text; `None` hides the badge.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        badge_label(self.item_count())
    }

    /// Queue a message for the visitor.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Drain queued messages.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

/// Badge text for a unit count.
#[must_use]
pub fn badge_label(count: u32) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_MAX => Some(format!("{BADGE_MAX}+")),
        n => Some(n.to_string()),
    }
}
