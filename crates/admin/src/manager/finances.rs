//! Income statements behind a role check.
//!
//! Reports are only reachable through a [`FinanceAccess`] grant, and a grant
//! can only be obtained by a role allowed to read financials. Every grant and
//! every refusal is written to the `audit` tracing target.

use rust_decimal::Decimal;
use techsolutions_core::UserRole;
use thiserror::Error;

use super::Period;

/// Gross income, expenses, net profit and margin for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialReport {
    pub period: Period,
    pub gross_income: Decimal,
    pub expenses: Decimal,
    pub net_profit: Decimal,
    /// Net profit over gross income, whole percent.
    pub margin_percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "Acceso denegado: solo usuarios con rol de GERENTE o CONTADOR pueden acceder a reportes financieros (rol actual: {role})"
)]
pub struct AccessDenied {
    pub role: UserRole,
}

/// Proof that the current operator may read financial reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinanceAccess {
    role: UserRole,
}

impl FinanceAccess {
    /// Check the role and record the attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] for roles other than `Gerente` and `Contador`.
    pub fn grant(role: UserRole) -> Result<Self, AccessDenied> {
        if role.can_view_financials() {
            tracing::info!(target: "audit", %role, "Financial report access granted");
            Ok(Self { role })
        } else {
            tracing::warn!(target: "audit", %role, "Financial report access denied");
            Err(AccessDenied { role })
        }
    }

    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Income statement for `period`.
    #[must_use]
    pub fn report(&self, period: Period) -> FinancialReport {
        tracing::info!(target: "audit", role = %self.role, %period, "Financial report generated");

        let (gross, expenses, margin) = match period {
            Period::Week => (15_200, 8_500, 44),
            Period::Month => (103_700, 74_300, 28),
            Period::Year => (845_000, 582_000, 31),
        };
        let gross_income = Decimal::from(gross);
        let expenses = Decimal::from(expenses);

        FinancialReport {
            period,
            gross_income,
            expenses,
            net_profit: gross_income - expenses,
            margin_percent: margin,
        }
    }
}
