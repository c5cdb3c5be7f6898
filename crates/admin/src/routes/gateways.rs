//! Payment gateway panel handlers.
//!
//! Every action re-renders the panel with the current gateway list and a
//! notice describing the outcome. Backend failures become error notices.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use techsolutions_api_client::GatewayInfo;
use techsolutions_core::{PaymentMethod, format_soles};
use tracing::instrument;

use crate::gateways::{ChargeForm, VerifyForm};
use crate::middleware::CurrentRole;
use crate::state::AppState;
use crate::views::{Layout, Notice, OptionView};

const PATH: &str = "/gateways";

/// Gateway card.
#[derive(Debug, Clone)]
pub struct GatewayView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

impl From<GatewayInfo> for GatewayView {
    fn from(g: GatewayInfo) -> Self {
        Self {
            id: g.id,
            name: g.nombre,
            description: g.descripcion.unwrap_or_default(),
            enabled: g.habilitada,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "gateways/index.html")]
pub struct GatewaysTemplate {
    pub layout: Layout,
    pub gateways: Vec<GatewayView>,
    pub methods: Vec<OptionView>,
    pub notice: Option<Notice>,
}

async fn page(state: &AppState, role: CurrentRole, notice: Option<Notice>) -> GatewaysTemplate {
    let (gateways, notice) = match state.api().gateways().await {
        Ok(list) => (list.into_iter().map(GatewayView::from).collect(), notice),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch gateways");
            (
                Vec::new(),
                notice.or_else(|| Some(Notice::error(e.user_message()))),
            )
        }
    };

    GatewaysTemplate {
        layout: Layout::new(PATH, role.0),
        gateways,
        methods: PaymentMethod::ALL
            .iter()
            .map(|m| OptionView {
                value: m.as_str().to_owned(),
                label: m.display_name().to_owned(),
                selected: false,
            })
            .collect(),
        notice,
    }
}

/// Gateway panel handler.
#[instrument(skip(state, role))]
pub async fn index(role: CurrentRole, State(state): State<AppState>) -> impl IntoResponse {
    page(&state, role, None).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ToggleForm {
    /// `true` to enable, anything else disables.
    pub enable: String,
}

/// Enable or disable a gateway.
#[instrument(skip(state, role))]
pub async fn toggle(
    role: CurrentRole,
    State(state): State<AppState>,
    Path(gateway): Path<String>,
    Form(form): Form<ToggleForm>,
) -> impl IntoResponse {
    let enable = form.enable == "true";
    let notice = match state.api().configure_gateway(&gateway, enable).await {
        Ok(toggled) => {
            tracing::info!(gateway = %toggled.pasarela, enabled = toggled.habilitada, "Gateway configured");
            Notice::success(toggled.mensaje)
        }
        Err(e) => {
            tracing::error!(gateway = %gateway, error = %e, "Failed to configure gateway");
            Notice::error(e.user_message())
        }
    };
    page(&state, role, Some(notice)).await
}

/// Manual charge through a gateway.
#[instrument(skip(state, role))]
pub async fn charge(
    role: CurrentRole,
    State(state): State<AppState>,
    Form(form): Form<ChargeForm>,
) -> impl IntoResponse {
    let notice = match form.validate() {
        Err(e) => Notice::error(e.to_string()),
        Ok(charge) => match state
            .api()
            .charge(charge.gateway.as_str(), charge.amount, &charge.reference)
            .await
        {
            Ok(receipt) => Notice::success(format!(
                "✅ {}: {} ({})",
                receipt.mensaje,
                format_soles(receipt.monto),
                receipt.referencia
            )),
            Err(e) => {
                tracing::warn!(reference = %charge.reference, error = %e, "Manual charge failed");
                Notice::error(format!("❌ {}", e.user_message()))
            }
        },
    };
    page(&state, role, Some(notice)).await
}

/// Transaction lookup.
#[instrument(skip(state, role))]
pub async fn verify(
    role: CurrentRole,
    State(state): State<AppState>,
    Form(form): Form<VerifyForm>,
) -> impl IntoResponse {
    let notice = match form.validate() {
        Err(e) => Notice::error(e.to_string()),
        Ok((gateway, reference)) => match state.api().verify(gateway.as_str(), &reference).await {
            Ok(v) => Notice::info(format!(
                "Transacción {} en {}: {}",
                v.referencia, v.pasarela, v.estado
            )),
            Err(e) => Notice::error(e.user_message()),
        },
    };
    page(&state, role, Some(notice)).await
}
