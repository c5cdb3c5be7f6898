//! Promotions route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use techsolutions_core::PromotionId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::CurrentRole;
use crate::promotions::{Promotion, PromotionForm, PromotionStats};
use crate::state::AppState;
use crate::views::{Layout, Notice};

const PATH: &str = "/promotions";

/// Row in the promotions table.
#[derive(Debug, Clone)]
pub struct PromotionView {
    pub id: String,
    pub code: String,
    pub name: String,
    pub discount: u8,
    pub starts_on: String,
    pub ends_on: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl From<&Promotion> for PromotionView {
    fn from(p: &Promotion) -> Self {
        Self {
            id: p.id.to_string(),
            code: p.code.clone(),
            name: p.name.clone(),
            discount: p.discount,
            starts_on: p.starts_on.format("%d/%m/%Y").to_string(),
            ends_on: p.ends_on.format("%d/%m/%Y").to_string(),
            status_label: p.status.label(),
            status_class: p.status.css_class(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PromotionsPageQuery {
    pub created: String,
    pub deleted: String,
}

impl PromotionsPageQuery {
    fn notice(&self) -> Option<Notice> {
        if !self.created.is_empty() {
            Some(Notice::success(format!(
                "✅ Promoción {} creada exitosamente",
                self.created
            )))
        } else if !self.deleted.is_empty() {
            Some(Notice::info("Promoción eliminada"))
        } else {
            None
        }
    }
}

/// Promotions page template.
#[derive(Template, WebTemplate)]
#[template(path = "promotions/index.html")]
pub struct PromotionsTemplate {
    pub layout: Layout,
    pub stats: PromotionStats,
    pub promotions: Vec<PromotionView>,
    pub form: PromotionForm,
    pub error: Option<String>,
    pub notice: Option<Notice>,
}

async fn page(
    state: &AppState,
    role: CurrentRole,
    form: PromotionForm,
    error: Option<String>,
    notice: Option<Notice>,
) -> PromotionsTemplate {
    let book = state.promotions().read().await;
    PromotionsTemplate {
        layout: Layout::new(PATH, role.0),
        stats: book.stats(),
        promotions: book.list().iter().map(PromotionView::from).collect(),
        form,
        error,
        notice,
    }
}

/// Promotions page handler.
#[instrument(skip(state, role))]
pub async fn index(
    role: CurrentRole,
    State(state): State<AppState>,
    Query(query): Query<PromotionsPageQuery>,
) -> impl IntoResponse {
    page(&state, role, PromotionForm::default(), None, query.notice()).await
}

/// Create promotion handler.
#[instrument(skip(state, role, form))]
pub async fn create(
    role: CurrentRole,
    State(state): State<AppState>,
    Form(form): Form<PromotionForm>,
) -> Response {
    let today = chrono::Local::now().date_naive();
    let created = state.promotions().write().await.create(&form, today);

    match created {
        Ok(promotion) => Redirect::to(&format!("{PATH}?created={}", promotion.code)).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "Promotion rejected");
            page(&state, role, form, Some(e.to_string()), None)
                .await
                .into_response()
        }
    }
}

/// Delete promotion handler.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PromotionId>,
) -> Result<Redirect> {
    if !state.promotions().write().await.delete(id) {
        return Err(AppError::NotFound(format!("promoción {id}")));
    }
    tracing::info!(promotion_id = %id, "Promotion deleted");
    Ok(Redirect::to("/promotions?deleted=1"))
}
