//! Session keys.

/// Keys used in the visitor session.
pub mod keys {
    /// Serialized cart items (see `cart::CART_KEY`).
    pub const CART: &str = crate::cart::CART_KEY;

    /// Id of the visitor's open checkout.
    pub const CHECKOUT_ID: &str = "checkout_id";
}
