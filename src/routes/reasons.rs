use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{NewReason, SignatureReason},
    routes::{ErrorBody, Success},
    startup::AppState,
    store::StoreError,
};

#[tracing::instrument(
    name = "Adding a reason to the catalog",
    skip(body, app_state),
    fields(
        reason = %body.reason,
        add_to_signature_reasons = ?body.add_to_signature_reasons
    )
)]
pub async fn add_reason(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<NewReason>,
) -> Result<Json<Success>, CatalogError> {
    let reason = SignatureReason::parse(&body.reason).map_err(CatalogError::InvalidReason)?;
    let to_signature_reasons = body
        .add_to_signature_reasons
        .unwrap_or(app_state.add_to_signature_reasons_by_default);

    if !app_state.store.add_reason(&reason, to_signature_reasons).await? {
        tracing::info!("reason already catalogued, nothing to add");
    }
    Ok(Json(Success::new()))
}

#[tracing::instrument(name = "Removing an other reason from the catalog", skip(app_state))]
pub async fn delete_reason(
    State(app_state): State<Arc<AppState>>,
    Path(reason): Path<String>,
) -> Result<Json<Success>, CatalogError> {
    if !app_state.store.remove_other_reason(&reason).await? {
        tracing::info!("reason was not catalogued, nothing to remove");
    }
    Ok(Json(Success::new()))
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("invalid reason, {0}")]
    InvalidReason(String),
    #[error("couldn't update the reason catalog, {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::InvalidReason(e) => {
                tracing::error!("{}", e);
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e))).into_response()
            }
            CatalogError::Store(e) => {
                tracing::error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Failed to update reasons")),
                )
                    .into_response()
            }
        }
    }
}
