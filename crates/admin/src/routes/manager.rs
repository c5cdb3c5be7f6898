//! Manager dashboard route handlers: sales, finances, inventory, restock.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query},
    response::{IntoResponse, Response},
};
use chrono::Datelike;
use techsolutions_core::{StockLevel, format_soles};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::manager::{
    Period, PeriodQuery,
    finances::FinancialReport,
    inventory::{StockCounts, StockItem, StockQuery, critical_alerts, find, stock_items},
    restock::{self, RestockConfirmation, RestockForm, SUPPLIERS, Urgency},
    sales::{Sale, SalesSummary},
};
use crate::middleware::{CurrentRole, RequireFinanceAccess};
use crate::views::{Layout, OptionView, options};

fn period_options(current: Period) -> Vec<OptionView> {
    Period::ALL
        .iter()
        .map(|p| OptionView {
            value: p.as_str().to_owned(),
            label: p.label().to_owned(),
            selected: *p == current,
        })
        .collect()
}

// =============================================================================
// Sales
// =============================================================================

#[derive(Debug, Clone)]
pub struct SaleView {
    pub number: String,
    pub date: String,
    pub customer: String,
    pub items: u32,
    pub total: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl From<&Sale> for SaleView {
    fn from(s: &Sale) -> Self {
        Self {
            number: s.number.clone(),
            date: s.date.format("%d/%m/%Y").to_string(),
            customer: s.customer.clone(),
            items: s.items,
            total: format_soles(s.total),
            status_label: s.status.label(),
            status_class: s.status.css_class(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "manager/sales.html")]
pub struct SalesTemplate {
    pub layout: Layout,
    pub periods: Vec<OptionView>,
    pub period_label: &'static str,
    pub total_sales: u32,
    pub revenue: String,
    pub average_ticket: String,
    pub customers: u32,
    pub sales: Vec<SaleView>,
}

/// Sales summary handler.
#[instrument(skip(role))]
pub async fn sales(role: CurrentRole, Query(query): Query<PeriodQuery>) -> impl IntoResponse {
    let summary = SalesSummary::for_period(query.period);
    SalesTemplate {
        layout: Layout::new("/manager/sales", role.0),
        periods: period_options(summary.period),
        period_label: summary.period.label(),
        total_sales: summary.total_sales,
        revenue: format_soles(summary.revenue),
        average_ticket: format_soles(summary.average_ticket),
        customers: summary.customers,
        sales: summary.sales.iter().map(SaleView::from).collect(),
    }
}

// =============================================================================
// Finances
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "manager/finances.html")]
pub struct FinancesTemplate {
    pub layout: Layout,
    pub periods: Vec<OptionView>,
    pub period_label: &'static str,
    pub gross_income: String,
    pub expenses: String,
    pub net_profit: String,
    pub margin_percent: u32,
}

impl FinancesTemplate {
    fn new(layout: Layout, report: &FinancialReport) -> Self {
        Self {
            layout,
            periods: period_options(report.period),
            period_label: report.period.label(),
            gross_income: format_soles(report.gross_income),
            expenses: format_soles(report.expenses),
            net_profit: format_soles(report.net_profit),
            margin_percent: report.margin_percent,
        }
    }
}

/// Income statement handler. Refused with 403 for roles without access.
#[instrument(skip(access))]
pub async fn finances(
    RequireFinanceAccess(access): RequireFinanceAccess,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let report = access.report(query.period);
    FinancesTemplate::new(Layout::new("/manager/finances", access.role()), &report)
}

// =============================================================================
// Inventory
// =============================================================================

#[derive(Debug, Clone)]
pub struct StockItemView {
    pub code: String,
    pub name: String,
    pub category: String,
    pub stock: i32,
    pub price: String,
    pub emoji: String,
    pub level: &'static str,
    pub level_label: &'static str,
}

impl From<&StockItem> for StockItemView {
    fn from(item: &StockItem) -> Self {
        let level = item.level();
        Self {
            code: item.code.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            stock: item.stock,
            price: format_soles(item.price),
            emoji: item.emoji.clone(),
            level: level.as_str(),
            level_label: level.label(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "manager/inventory.html")]
pub struct InventoryTemplate {
    pub layout: Layout,
    pub counts: StockCounts,
    pub alerts: Vec<StockItemView>,
    pub items: Vec<StockItemView>,
    pub search: String,
    pub levels: Vec<OptionView>,
}

/// Inventory handler with search and level filter.
#[instrument(skip(role))]
pub async fn inventory(role: CurrentRole, Query(query): Query<StockQuery>) -> impl IntoResponse {
    let items = stock_items();
    let selected = query.level();

    let levels = std::iter::once(OptionView {
        value: "todos".to_owned(),
        label: "Todos".to_owned(),
        selected: selected.is_none(),
    })
    .chain(
        [StockLevel::Normal, StockLevel::Low, StockLevel::Critical]
            .into_iter()
            .map(|level| OptionView {
                value: level.as_str().to_owned(),
                label: level.label().to_owned(),
                selected: selected == Some(level),
            }),
    )
    .collect();

    InventoryTemplate {
        layout: Layout::new("/manager/inventory", role.0),
        counts: StockCounts::of(&items),
        alerts: critical_alerts(&items)
            .into_iter()
            .map(StockItemView::from)
            .collect(),
        items: query
            .apply(&items)
            .into_iter()
            .map(StockItemView::from)
            .collect(),
        search: query.search.trim().to_owned(),
        levels,
    }
}

// =============================================================================
// Restock
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "manager/restock.html")]
pub struct RestockTemplate {
    pub layout: Layout,
    pub item: StockItemView,
    pub quantity: String,
    pub suppliers: Vec<OptionView>,
    pub urgencies: Vec<OptionView>,
    pub error: Option<String>,
    pub confirmation: Option<RestockConfirmation>,
}

impl RestockTemplate {
    fn new(role: CurrentRole, item: &StockItem, form: &RestockForm) -> Self {
        Self {
            layout: Layout::new("/manager/inventory", role.0),
            item: StockItemView::from(item),
            quantity: form.quantity.clone(),
            suppliers: options(SUPPLIERS, &form.supplier),
            urgencies: Urgency::ALL
                .iter()
                .map(|u| OptionView {
                    value: u.as_str().to_owned(),
                    label: format!("{} ({})", u.as_str(), u.lead_time()),
                    selected: *u == form.urgency,
                })
                .collect(),
            error: None,
            confirmation: None,
        }
    }
}

fn stock_item(code: &str) -> Result<StockItem> {
    find(&stock_items(), code)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("producto {code}")))
}

/// Restock form handler.
#[instrument(skip(role))]
pub async fn restock_form(role: CurrentRole, Path(code): Path<String>) -> Result<Response> {
    let item = stock_item(&code)?;
    let form = RestockForm {
        quantity: "10".to_owned(),
        ..RestockForm::default()
    };
    Ok(RestockTemplate::new(role, &item, &form).into_response())
}

/// Restock submission handler.
#[instrument(skip(role, form))]
pub async fn restock_submit(
    role: CurrentRole,
    Path(code): Path<String>,
    Form(form): Form<RestockForm>,
) -> Result<Response> {
    let item = stock_item(&code)?;

    let mut page = RestockTemplate::new(role, &item, &form);
    match restock::submit(&item, &form, chrono::Local::now().year()) {
        Ok(confirmation) => page.confirmation = Some(confirmation),
        Err(e) => page.error = Some(e.to_string()),
    }
    Ok(page.into_response())
}
