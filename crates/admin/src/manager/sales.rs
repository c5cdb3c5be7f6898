//! Sales summary per period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use techsolutions_core::SaleStatus;

use super::Period;

/// One row of the recent sales table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    /// `VTA-2025-0045`
    pub number: String,
    pub date: NaiveDate,
    pub customer: String,
    pub items: u32,
    pub total: Decimal,
    pub status: SaleStatus,
}

/// Headline figures and recent sales for a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    pub period: Period,
    pub total_sales: u32,
    pub revenue: Decimal,
    pub average_ticket: Decimal,
    pub customers: u32,
    /// Only the weekly summary lists individual sales.
    pub sales: Vec<Sale>,
}

impl SalesSummary {
    #[must_use]
    pub fn for_period(period: Period) -> Self {
        match period {
            Period::Week => Self {
                period,
                total_sales: 45,
                revenue: Decimal::new(1_250_000, 2),
                average_ticket: Decimal::new(27_778, 2),
                customers: 38,
                sales: recent_sales(),
            },
            Period::Month => Self {
                period,
                total_sales: 186,
                revenue: Decimal::new(5_230_000, 2),
                average_ticket: Decimal::new(28_118, 2),
                customers: 142,
                sales: Vec::new(),
            },
            Period::Year => Self {
                period,
                total_sales: 2150,
                revenue: Decimal::new(62_500_000, 2),
                average_ticket: Decimal::new(29_070, 2),
                customers: 1580,
                sales: Vec::new(),
            },
        }
    }
}

fn recent_sales() -> Vec<Sale> {
    let sale = |seq: u32, day: u32, customer: &str, items, total: i64, status| Sale {
        number: format!("VTA-2025-{seq:04}"),
        date: NaiveDate::from_ymd_opt(2025, 11, day).unwrap_or_default(),
        customer: customer.to_owned(),
        items,
        total: Decimal::new(total, 0),
        status,
    };

    vec![
        sale(45, 29, "Juan Pérez", 3, 850, SaleStatus::Completed),
        sale(44, 29, "María García", 1, 1200, SaleStatus::Completed),
        sale(43, 28, "Carlos López", 5, 450, SaleStatus::Completed),
        sale(42, 28, "Ana Torres", 2, 680, SaleStatus::Pending),
        sale(41, 27, "Roberto Díaz", 4, 1500, SaleStatus::Completed),
    ]
}
