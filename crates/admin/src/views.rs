//! Shared view models for admin templates.

use techsolutions_core::UserRole;

/// Navigation and operator badge, rendered by `base.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub current_path: &'static str,
    pub role: String,
    pub can_view_financials: bool,
}

impl Layout {
    #[must_use]
    pub fn new(current_path: &'static str, role: UserRole) -> Self {
        Self {
            current_path,
            role: role.to_string(),
            can_view_financials: role.can_view_financials(),
        }
    }

    /// Whether a nav link is the current section.
    #[must_use]
    pub fn is_active(&self, prefix: &str) -> bool {
        self.current_path.starts_with(prefix)
    }
}

/// Banner shown above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: &'static str,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: "info",
            message: message.into(),
        }
    }
}

/// `<option>` in a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Options whose value is also their label.
#[must_use]
pub fn options(values: &[&str], current: &str) -> Vec<OptionView> {
    values
        .iter()
        .map(|&value| OptionView {
            value: value.to_owned(),
            label: value.to_owned(),
            selected: value == current.trim(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_flags_financials_by_role() {
        assert!(Layout::new("/manager/sales", UserRole::Contador).can_view_financials);
        assert!(!Layout::new("/products", UserRole::Admin).can_view_financials);
        assert!(Layout::new("/manager/sales", UserRole::Gerente).is_active("/manager"));
    }

    #[test]
    fn test_options_mark_current() {
        let opts = options(&["Audio", "Tablets"], " Tablets ");
        assert!(!opts.iter().any(|o| o.value == "Audio" && o.selected));
        assert!(opts.iter().any(|o| o.value == "Tablets" && o.selected));
    }
}
