//! Product management route handlers.
//!
//! Products live in the inventory API. A failed listing renders an empty
//! table with an error notice; a failed save re-renders the form with the
//! backend's message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use techsolutions_api_client::InventoryProduct;
use techsolutions_core::{ProductId, format_soles};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::CurrentRole;
use crate::products::{CATEGORIES, ProductForm, ProductQuery, ProductStats, StockBadge};
use crate::state::AppState;
use crate::views::{Layout, Notice, OptionView, options};

const PATH: &str = "/products";

/// Products page query: filters plus the outcome of a previous action.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductsPageQuery {
    pub search: String,
    pub category: String,
    pub notice: String,
}

impl ProductsPageQuery {
    fn filter(&self) -> ProductQuery {
        ProductQuery {
            search: self.search.clone(),
            category: self.category.clone(),
        }
    }

    fn notice(&self) -> Option<Notice> {
        match self.notice.as_str() {
            "created" => Some(Notice::success("¡Producto Agregado!")),
            "updated" => Some(Notice::success("¡Producto Actualizado!")),
            "deleted" => Some(Notice::success("¡Producto Eliminado!")),
            _ => None,
        }
    }
}

/// Product row for templates.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: String,
    pub codigo: String,
    pub nombre: String,
    pub categoria: String,
    pub precio: String,
    pub stock: StockBadge,
    pub active: bool,
}

impl From<&InventoryProduct> for ProductRowView {
    fn from(p: &InventoryProduct) -> Self {
        Self {
            id: p.id.to_string(),
            codigo: if p.codigo.is_empty() {
                "N/A".to_owned()
            } else {
                p.codigo.clone()
            },
            nombre: p.nombre.clone(),
            categoria: p.categoria.clone().unwrap_or_else(|| "-".to_owned()),
            precio: format_soles(p.precio),
            stock: StockBadge::new(p.stock, p.stock_minimo),
            active: p.activo,
        }
    }
}

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub stats: ProductStats,
    pub products: Vec<ProductRowView>,
    pub search: String,
    pub categories: Vec<OptionView>,
    pub notice: Option<Notice>,
}

/// Create / edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub layout: Layout,
    pub title: &'static str,
    pub action: String,
    pub form: ProductForm,
    pub categories: Vec<OptionView>,
    pub error: Option<String>,
}

impl ProductFormTemplate {
    fn new(role: CurrentRole, editing: Option<ProductId>, form: ProductForm) -> Self {
        let (title, action) = editing.map_or_else(
            || ("📦 Agregar Nuevo Producto", PATH.to_owned()),
            |id| ("✏️ Editar Producto", format!("{PATH}/{id}")),
        );
        Self {
            layout: Layout::new(PATH, role.0),
            title,
            action,
            categories: options(CATEGORIES, &form.categoria),
            form,
            error: None,
        }
    }

    fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Products list page handler.
#[instrument(skip(state, role))]
pub async fn index(
    role: CurrentRole,
    State(state): State<AppState>,
    Query(query): Query<ProductsPageQuery>,
) -> impl IntoResponse {
    let (products, load_error) = match state.api().list_products().await {
        Ok(products) => (products, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch products");
            (Vec::new(), Some(Notice::error(e.user_message())))
        }
    };

    let filter = query.filter();
    ProductsIndexTemplate {
        layout: Layout::new(PATH, role.0),
        stats: ProductStats::from_products(&products),
        products: filter
            .apply(&products)
            .into_iter()
            .map(ProductRowView::from)
            .collect(),
        search: filter.search.clone(),
        categories: options(CATEGORIES, &filter.category),
        notice: load_error.or_else(|| query.notice()),
    }
}

/// New product form handler.
#[instrument(skip(role))]
pub async fn new_product(role: CurrentRole) -> impl IntoResponse {
    let now = chrono::Utc::now().timestamp_millis();
    ProductFormTemplate::new(role, None, ProductForm::blank(now))
}

/// Create product handler.
#[instrument(skip(state, role, form))]
pub async fn create(
    role: CurrentRole,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return ProductFormTemplate::new(role, None, form)
                .with_error(format!("❌ {e}"))
                .into_response();
        }
    };

    match state.api().create_product(&input).await {
        Ok(saved) => {
            tracing::info!(product_id = %saved.id, nombre = %saved.nombre, "Product created");
            Redirect::to("/products?notice=created").into_response()
        }
        Err(e) => {
            tracing::error!(nombre = %input.nombre, error = %e, "Failed to create product");
            ProductFormTemplate::new(role, None, form)
                .with_error(format!("❌ Error al guardar: {}", e.user_message()))
                .into_response()
        }
    }
}

/// Edit product form handler.
#[instrument(skip(state, role))]
pub async fn edit(
    role: CurrentRole,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Response> {
    let product = find_product(&state, id).await?;
    Ok(ProductFormTemplate::new(role, Some(id), ProductForm::from_product(&product)).into_response())
}

/// Update product handler.
#[instrument(skip(state, role, form))]
pub async fn update(
    role: CurrentRole,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return ProductFormTemplate::new(role, Some(id), form)
                .with_error(format!("❌ {e}"))
                .into_response();
        }
    };

    match state.api().update_product(id, &input).await {
        Ok(_) => {
            tracing::info!(product_id = %id, "Product updated");
            Redirect::to("/products?notice=updated").into_response()
        }
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "Failed to update product");
            ProductFormTemplate::new(role, Some(id), form)
                .with_error(format!("❌ Error al guardar: {}", e.user_message()))
                .into_response()
        }
    }
}

/// Delete product handler.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<Redirect> {
    state.api().delete_product(id).await?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(Redirect::to("/products?notice=deleted"))
}

async fn find_product(state: &AppState, id: ProductId) -> Result<InventoryProduct> {
    state
        .api()
        .list_products()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("producto {id}")))
}
