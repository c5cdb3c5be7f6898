//! Promotional coupon codes accepted on the cart page.
//!
//! Codes are only acknowledged; totals are always computed from the items.

use super::Notification;

const COUPONS: &[(&str, u8)] = &[("DESCUENTO10", 10), ("DESCUENTO20", 20), ("FALABELLA", 15)];

/// Discount percentage for a code (case-insensitive, trimmed).
#[must_use]
pub fn lookup(code: &str) -> Option<u8> {
    let code = code.trim().to_uppercase();
    COUPONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|&(_, percent)| percent)
}

/// Message to show for a submitted code.
#[must_use]
pub fn apply(code: &str) -> Notification {
    if code.trim().is_empty() {
        return Notification::warning("Por favor, ingresa un código de cupón");
    }

    match lookup(code) {
        Some(percent) => {
            Notification::success(format!("✅ Cupón aplicado: {percent}% de descuento"))
        }
        None => Notification::error("❌ Cupón inválido"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup(" descuento20 "), Some(20));
        assert_eq!(lookup("FALABELLA"), Some(15));
        assert_eq!(lookup("GRATIS"), None);
    }

    #[test]
    fn test_apply_messages() {
        assert_eq!(
            apply(""),
            Notification::warning("Por favor, ingresa un código de cupón")
        );
        assert_eq!(
            apply("descuento10"),
            Notification::success("✅ Cupón aplicado: 10% de descuento")
        );
        assert_eq!(apply("X"), Notification::error("❌ Cupón inválido"));
    }
}
