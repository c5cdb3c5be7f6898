//! Warehouse stock levels for the manager.

use rust_decimal::Decimal;
use serde::Deserialize;
use techsolutions_core::StockLevel;

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockItem {
    /// `TECH-001`
    pub code: String,
    pub name: String,
    pub category: String,
    pub stock: i32,
    pub price: Decimal,
    pub emoji: String,
}

impl StockItem {
    #[must_use]
    pub const fn level(&self) -> StockLevel {
        StockLevel::classify(self.stock)
    }
}

/// Warehouse contents.
#[must_use]
pub fn stock_items() -> Vec<StockItem> {
    let item = |n: u32, name: &str, category: &str, stock, price: i64, emoji: &str| StockItem {
        code: format!("TECH-{n:03}"),
        name: name.to_owned(),
        category: category.to_owned(),
        stock,
        price: Decimal::from(price),
        emoji: emoji.to_owned(),
    };

    vec![
        item(1, "Laptop HP ProBook 450", "Computadoras", 15, 2500, "💻"),
        item(2, "Mouse Inalámbrico Logitech", "Accesorios", 2, 85, "🖱️"),
        item(3, "Teclado Mecánico RGB", "Accesorios", 8, 150, "⌨️"),
        item(4, "Monitor Samsung 27\"", "Monitores", 1, 850, "🖥️"),
        item(5, "Audífonos Sony WH-1000", "Audio", 5, 450, "🎧"),
        item(6, "Webcam Logitech C920", "Accesorios", 0, 180, "📷"),
        item(7, "SSD Samsung 1TB", "Almacenamiento", 12, 280, "💾"),
        item(8, "RAM DDR4 16GB", "Componentes", 3, 120, "🔧"),
        item(9, "Cable HDMI 2.0", "Accesorios", 25, 25, "🔌"),
        item(10, "Impresora HP LaserJet", "Impresoras", 2, 650, "🖨️"),
        item(11, "Tablet Samsung Galaxy Tab", "Tablets", 4, 890, "📱"),
        item(12, "Cargador Universal USB-C", "Accesorios", 1, 45, "🔋"),
    ]
}

/// Find an item by code.
#[must_use]
pub fn find<'a>(items: &'a [StockItem], code: &str) -> Option<&'a StockItem> {
    items.iter().find(|item| item.code.eq_ignore_ascii_case(code.trim()))
}

/// Items per stock level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockCounts {
    pub total: usize,
    pub normal: usize,
    pub low: usize,
    pub critical: usize,
}

impl StockCounts {
    #[must_use]
    pub fn of(items: &[StockItem]) -> Self {
        items.iter().fold(
            Self {
                total: items.len(),
                ..Self::default()
            },
            |mut counts, item| {
                match item.level() {
                    StockLevel::Normal => counts.normal += 1,
                    StockLevel::Low => counts.low += 1,
                    StockLevel::Critical => counts.critical += 1,
                }
                counts
            },
        )
    }
}

/// Items that need restocking now.
#[must_use]
pub fn critical_alerts(items: &[StockItem]) -> Vec<&StockItem> {
    items
        .iter()
        .filter(|item| item.level() == StockLevel::Critical)
        .collect()
}

/// `?search=&level=` on the inventory tab. `level` empty or `todos` means all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StockQuery {
    pub search: String,
    pub level: String,
}

impl StockQuery {
    /// Selected level; unknown values mean no level filter.
    #[must_use]
    pub fn level(&self) -> Option<StockLevel> {
        self.level.trim().parse().ok()
    }

    /// Name, code or category substring (case-insensitive) and level.
    #[must_use]
    pub fn matches(&self, item: &StockItem) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || item.name.to_lowercase().contains(&needle)
            || item.code.to_lowercase().contains(&needle)
            || item.category.to_lowercase().contains(&needle);

        text_ok && self.level().is_none_or(|level| item.level() == level)
    }

    #[must_use]
    pub fn apply<'a>(&self, items: &'a [StockItem]) -> Vec<&'a StockItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}
