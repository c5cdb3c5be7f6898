//! Manager dashboard data.
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | `sales`      | Sales summary and recent sales per [`Period`]     |
//! | `finances`   | Income statement per period, behind role access   |
//! | `inventory`  | Stock levels, counts and critical alerts          |
//! | `restock`    | Restock requests to suppliers                     |
//!
//! Figures are fixed reference data until the reporting backend exists.

pub mod finances;
pub mod inventory;
pub mod restock;
pub mod sales;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Reporting period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Self; 3] = [Self::Week, Self::Month, Self::Year];

    /// Query value (`semana` / `mes` / `año`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "semana",
            Self::Month => "mes",
            Self::Year => "año",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Week => "Esta semana",
            Self::Month => "Este mes",
            Self::Year => "Este año",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "semana" => Ok(Self::Week),
            "mes" => Ok(Self::Month),
            "año" | "ano" => Ok(Self::Year),
            other => Err(format!("invalid period: {other}")),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `?period=` query on the manager pages.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PeriodQuery {
    pub period: Period,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        assert_eq!("semana".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("AÑO".parse::<Period>().unwrap(), Period::Year);
        assert_eq!("ano".parse::<Period>().unwrap(), Period::Year);
        assert!("trimestre".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_round_trips_as_query_value() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
    }
}
