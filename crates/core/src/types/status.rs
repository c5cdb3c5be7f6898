//! Status and classification enums shared by the storefront and the
//! dashboards.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Payment gateway chosen on the first checkout step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    PayPal,
    Yape,
    Plin,
}

impl PaymentMethod {
    /// Every supported gateway, in display order.
    pub const ALL: [Self; 3] = [Self::PayPal, Self::Yape, Self::Plin];

    /// Identifier used in forms and by the payments API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PayPal => "paypal",
            Self::Yape => "yape",
            Self::Plin => "plin",
        }
    }

    /// Human-readable gateway name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PayPal => "PayPal",
            Self::Yape => "Yape",
            Self::Plin => "Plin",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paypal" => Ok(Self::PayPal),
            "yape" => Ok(Self::Yape),
            "plin" => Ok(Self::Plin),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Stock level bucket used by the manager's inventory view.
///
/// `Critical` at 2 units or fewer, `Low` from 3 to 5, `Normal` above 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Normal,
    Low,
    Critical,
}

impl StockLevel {
    /// Highest stock still considered critical.
    pub const CRITICAL_MAX: i32 = 2;
    /// Highest stock still considered low.
    pub const LOW_MAX: i32 = 5;

    /// Classify a stock count.
    #[must_use]
    pub const fn classify(stock: i32) -> Self {
        if stock <= Self::CRITICAL_MAX {
            Self::Critical
        } else if stock <= Self::LOW_MAX {
            Self::Low
        } else {
            Self::Normal
        }
    }

    /// Filter value (`normal` / `bajo` / `critico`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Low => "bajo",
            Self::Critical => "critico",
        }
    }

    /// Badge text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Low => "⚠️ Bajo",
            Self::Critical => "🚨 Crítico",
        }
    }
}

impl std::str::FromStr for StockLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "bajo" => Ok(Self::Low),
            "critico" => Ok(Self::Critical),
            _ => Err(format!("invalid stock level: {s}")),
        }
    }
}

/// Promotion lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    Active,
    #[default]
    Scheduled,
    Finished,
}

impl PromotionStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Activa",
            Self::Scheduled => "Programada",
            Self::Finished => "Finalizada",
        }
    }

    /// CSS class for the status badge.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Scheduled => "scheduled",
            Self::Finished => "finished",
        }
    }
}

/// Sale status shown in the manager's sales table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Completed,
    Pending,
}

impl SaleStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completada",
            Self::Pending => "Pendiente",
        }
    }

    /// CSS class for the status badge.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Completed => "completada",
            Self::Pending => "pendiente",
        }
    }
}

/// Role of a dashboard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Storefront customer.
    Cliente,
    /// Store administrator (products and promotions).
    Admin,
    /// Store manager (sales, finances and inventory).
    Gerente,
    /// Accountant, read access to financial reports.
    Contador,
}

impl UserRole {
    /// Whether the role may read financial reports.
    #[must_use]
    pub const fn can_view_financials(self) -> bool {
        matches!(self, Self::Gerente | Self::Contador)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cliente => write!(f, "cliente"),
            Self::Admin => write!(f, "admin"),
            Self::Gerente => write!(f, "gerente"),
            Self::Contador => write!(f, "contador"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cliente" => Ok(Self::Cliente),
            "admin" => Ok(Self::Admin),
            "gerente" => Ok(Self::Gerente),
            "contador" => Ok(Self::Contador),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_names() {
        assert_eq!(PaymentMethod::PayPal.display_name(), "PayPal");
        assert_eq!("YAPE".parse::<PaymentMethod>().unwrap(), PaymentMethod::Yape);
        assert!("visa".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_stock_level_boundaries() {
        assert_eq!(StockLevel::classify(0), StockLevel::Critical);
        assert_eq!(StockLevel::classify(2), StockLevel::Critical);
        assert_eq!(StockLevel::classify(3), StockLevel::Low);
        assert_eq!(StockLevel::classify(5), StockLevel::Low);
        assert_eq!(StockLevel::classify(6), StockLevel::Normal);
    }

    #[test]
    fn test_only_manager_and_accountant_view_financials() {
        assert!(UserRole::Gerente.can_view_financials());
        assert!(UserRole::Contador.can_view_financials());
        assert!(!UserRole::Admin.can_view_financials());
        assert!(!UserRole::Cliente.can_view_financials());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [UserRole::Cliente, UserRole::Admin, UserRole::Gerente, UserRole::Contador] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
    }
}
