//! Order numbers: `ORD-{year}-{6 uppercase base-36 characters}`.

use chrono::Datelike;
use rand::Rng;
use rand::seq::IndexedRandom;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 6;

/// Build an order number for `year` from `rng`.
pub fn order_number<R: Rng + ?Sized>(year: i32, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36.choose(rng).map_or('0', |&b| char::from(b)))
        .collect();
    format!("ORD-{year}-{suffix}")
}

/// Order number for the current local year.
#[must_use]
pub fn new_order_number() -> String {
    order_number(chrono::Local::now().year(), &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_order_number_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let number = order_number(2025, &mut rng);

        let suffix = number.strip_prefix("ORD-2025-").unwrap_or_default();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_new_order_number_uses_current_year() {
        let year = chrono::Local::now().year();
        assert!(new_order_number().starts_with(&format!("ORD-{year}-")));
    }
}
