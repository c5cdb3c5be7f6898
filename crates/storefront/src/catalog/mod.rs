//! Product catalog.
//!
//! Products come either from the built-in seed list or from the inventory
//! API. Remote listings are cached for 5 minutes; when the API cannot be
//! reached the seed list is served instead so the storefront stays usable.

pub mod filter;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use techsolutions_api_client::{ApiClient, InventoryProduct};
use techsolutions_core::ProductId;
use tracing::instrument;

use crate::cart::{DEFAULT_EMOJI, NewItem};

pub use filter::{PRICE_RANGES, PriceRange, ProductFilter};

/// Category slugs and labels, in menu order.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("computadoras", "Computadoras"),
    ("smartphones", "Smartphones"),
    ("audio", "Audio"),
    ("gaming", "Gaming"),
    ("wearables", "Wearables"),
    ("accesorios", "Accesorios"),
];

const CACHE_KEY: &str = "products";
const CACHE_TTL: Duration = Duration::from_secs(300);

/// A product as the storefront lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub codigo: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    /// Percentage off `old_price`.
    pub discount: u8,
    pub emoji: String,
    /// Number of reviews.
    pub rating: u32,
    pub stock: i32,
    pub stock_minimo: i32,
    pub active: bool,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl Product {
    /// What the cart stores for this product.
    #[must_use]
    pub fn to_cart_item(&self) -> NewItem {
        NewItem {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            emoji: Some(self.emoji.clone()),
        }
    }
}

impl From<InventoryProduct> for Product {
    fn from(p: InventoryProduct) -> Self {
        Self {
            id: p.id,
            codigo: p.codigo,
            name: p.nombre,
            category: p
                .categoria
                .map(|c| c.trim().to_lowercase())
                .unwrap_or_default(),
            price: p.precio,
            old_price: None,
            discount: 0,
            emoji: DEFAULT_EMOJI.to_owned(),
            rating: 0,
            stock: p.stock,
            stock_minimo: p.stock_minimo,
            active: p.activo,
            description: p.descripcion,
            image: p.imagen,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: i64,
    name: &str,
    price: i64,
    old_price: i64,
    category: &str,
    discount: u8,
    emoji: &str,
    rating: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        codigo: format!("TECH-{id:03}"),
        name: name.to_owned(),
        category: category.to_owned(),
        price: Decimal::from(price),
        old_price: Some(Decimal::from(old_price)),
        discount,
        emoji: emoji.to_owned(),
        rating,
        stock: 20,
        stock_minimo: 5,
        active: true,
        description: None,
        image: None,
    }
}

/// The built-in product list.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    vec![
        seed(1, "MacBook Pro 16\" M3", 3999, 4399, "computadoras", 9, "💻", 234),
        seed(2, "iPhone 15 Pro Max", 1299, 1499, "smartphones", 13, "📱", 512),
        seed(3, "Samsung Galaxy S24", 899, 1099, "smartphones", 18, "📱", 389),
        seed(4, "Sony WH-1000XM5", 399, 499, "audio", 20, "🎧", 189),
        seed(5, "PS5 Console", 599, 699, "gaming", 14, "🎮", 426),
        seed(6, "Xbox Series X", 499, 599, "gaming", 17, "🎮", 312),
        seed(7, "Apple Watch Series 9", 399, 499, "wearables", 20, "⌚", 312),
        seed(8, "Oculus Quest 3", 499, 599, "wearables", 17, "👓", 245),
        seed(9, "iPad Pro 12.9\"", 1199, 1399, "computadoras", 14, "📱", 523),
        seed(10, "Samsung Monitor 4K", 699, 899, "accesorios", 22, "🖥️", 178),
        seed(11, "AirPods Pro Max", 549, 649, "audio", 15, "🎧", 456),
        seed(12, "GoPro Hero 12", 449, 549, "accesorios", 18, "📹", 234),
    ]
}

/// Where the catalog reads products from.
#[derive(Clone)]
pub enum CatalogSource {
    Seed,
    Remote(ApiClient),
}

/// Product catalog.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    source: CatalogSource,
    seed: Arc<Vec<Product>>,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl Catalog {
    #[must_use]
    pub fn new(source: CatalogSource) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogInner {
                source,
                seed: Arc::new(seed_products()),
                cache,
            }),
        }
    }

    /// Catalog serving only the seed list.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(CatalogSource::Seed)
    }

    /// Active products.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Arc<Vec<Product>> {
        let client = match &self.inner.source {
            CatalogSource::Seed => return Arc::clone(&self.inner.seed),
            CatalogSource::Remote(client) => client,
        };

        if let Some(products) = self.inner.cache.get(CACHE_KEY).await {
            return products;
        }

        match client.list_products().await {
            Ok(products) => {
                let products: Arc<Vec<Product>> = Arc::new(
                    products
                        .into_iter()
                        .filter(|p| p.activo)
                        .map(Product::from)
                        .collect(),
                );
                tracing::debug!(count = products.len(), "Loaded catalog from inventory API");
                self.inner
                    .cache
                    .insert(CACHE_KEY, Arc::clone(&products))
                    .await;
                products
            }
            Err(e) => {
                tracing::warn!(error = %e, "Inventory API unavailable, serving seed catalog");
                Arc::clone(&self.inner.seed)
            }
        }
    }

    /// Look up one active product.
    pub async fn find(&self, id: ProductId) -> Option<Product> {
        self.products().await.iter().find(|p| p.id == id).cloned()
    }

    /// Products passing `filter`.
    pub async fn search(&self, filter: &ProductFilter) -> Vec<Product> {
        filter.apply(&self.products().await)
    }

    /// Drop cached remote listings.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(CACHE_KEY).await;
    }
}
