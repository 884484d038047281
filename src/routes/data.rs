use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{domain::AppData, routes::ErrorBody, startup::AppState, store::StoreError};

#[tracing::instrument(name = "Serving the data document", skip(app_state))]
pub async fn get_data(State(app_state): State<Arc<AppState>>) -> Result<Json<AppData>, DataError> {
    let data = app_state.store.load().await?;
    Ok(Json(data))
}

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("couldn't load the data document, {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for DataError {
    fn into_response(self) -> Response {
        match self {
            DataError::Store(e) => {
                tracing::error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Failed to load data")),
                )
                    .into_response()
            }
        }
    }
}
