//! In-memory promotions book.
//!
//! Promotions are not persisted: the book is seeded at startup and lives in
//! the admin state for the life of the process.

use chrono::NaiveDate;
use serde::Deserialize;
use techsolutions_core::{PromotionId, PromotionStatus};
use thiserror::Error;

/// A discount campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub id: PromotionId,
    /// `PROMO-001`, `PROMO-002`, ...
    pub code: String,
    pub name: String,
    /// Percentage, 1 to 100.
    pub discount: u8,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub status: PromotionStatus,
}

/// Counters above the promotions table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromotionStats {
    pub active: usize,
    pub scheduled: usize,
    pub finished: usize,
    /// Mean discount, rounded to the nearest whole percent.
    pub average_discount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromotionError {
    #[error("Complete todos los campos")]
    MissingFields,
    #[error("El descuento debe estar entre 1 y 100")]
    InvalidDiscount,
    #[error("La fecha de fin no puede ser anterior a la de inicio")]
    EndsBeforeStart,
}

/// New promotion form. Empty dates default to today.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromotionForm {
    pub name: String,
    pub discount: String,
    pub starts_on: String,
    pub ends_on: String,
}

/// All promotions, in creation order.
#[derive(Debug, Clone)]
pub struct PromotionBook {
    promotions: Vec<Promotion>,
    next_seq: i64,
}

impl PromotionBook {
    /// The two launch campaigns.
    #[must_use]
    pub fn seeded() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let promotions = vec![
            Promotion {
                id: PromotionId::new(1),
                code: "PROMO-001".to_owned(),
                name: "Black Friday 2025".to_owned(),
                discount: 25,
                starts_on: date(2025, 11, 28),
                ends_on: date(2025, 11, 30),
                status: PromotionStatus::Active,
            },
            Promotion {
                id: PromotionId::new(2),
                code: "PROMO-002".to_owned(),
                name: "Cyber Monday".to_owned(),
                discount: 30,
                starts_on: date(2025, 12, 1),
                ends_on: date(2025, 12, 2),
                status: PromotionStatus::Scheduled,
            },
        ];

        Self {
            promotions,
            next_seq: 3,
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            promotions: Vec::new(),
            next_seq: 1,
        }
    }

    #[must_use]
    pub fn list(&self) -> &[Promotion] {
        &self.promotions
    }

    #[must_use]
    pub fn stats(&self) -> PromotionStats {
        let count = |status| self.promotions.iter().filter(|p| p.status == status).count();

        let average_discount = if self.promotions.is_empty() {
            0
        } else {
            let sum: u32 = self.promotions.iter().map(|p| u32::from(p.discount)).sum();
            let len = u32::try_from(self.promotions.len()).unwrap_or(u32::MAX);
            (sum + len / 2) / len
        };

        PromotionStats {
            active: count(PromotionStatus::Active),
            scheduled: count(PromotionStatus::Scheduled),
            finished: count(PromotionStatus::Finished),
            average_discount,
        }
    }

    /// Add a scheduled promotion.
    ///
    /// Codes come from a sequence that never goes back, so deleting a
    /// promotion does not free its code.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError`] when the name or discount is missing or the
    /// discount is outside 1..=100.
    pub fn create(
        &mut self,
        form: &PromotionForm,
        today: NaiveDate,
    ) -> Result<Promotion, PromotionError> {
        let name = form.name.trim();
        let discount = form.discount.trim();
        if name.is_empty() || discount.is_empty() {
            return Err(PromotionError::MissingFields);
        }
        let discount: u8 = discount
            .parse()
            .ok()
            .filter(|d| (1..=100).contains(d))
            .ok_or(PromotionError::InvalidDiscount)?;

        let starts_on = parse_date(&form.starts_on).unwrap_or(today);
        let ends_on = parse_date(&form.ends_on).unwrap_or(today);
        if ends_on < starts_on {
            return Err(PromotionError::EndsBeforeStart);
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let promotion = Promotion {
            id: PromotionId::new(seq),
            code: format!("PROMO-{seq:03}"),
            name: name.to_owned(),
            discount,
            starts_on,
            ends_on,
            status: PromotionStatus::Scheduled,
        };
        self.promotions.push(promotion.clone());

        tracing::info!(code = %promotion.code, discount, "Promotion created");
        Ok(promotion)
    }

    /// Remove a promotion. Returns whether it existed.
    pub fn delete(&mut self, id: PromotionId) -> bool {
        let before = self.promotions.len();
        self.promotions.retain(|p| p.id != id);
        before != self.promotions.len()
    }
}

impl Default for PromotionBook {
    fn default() -> Self {
        Self::seeded()
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
