use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::Request,
    response::Response,
    routing::{delete, get, post},
    serve::Serve,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Span, info, info_span};
use uuid::Uuid;

use crate::{
    configuration::Settings,
    routes::{add_reason, delete_reason, get_data, health_check},
    store::JsonStore,
};

pub struct AppState {
    pub store: JsonStore,
    pub add_to_signature_reasons_by_default: bool,
}

pub fn run(
    listener: TcpListener,
    store: JsonStore,
    add_to_signature_reasons_by_default: bool,
) -> Serve<TcpListener, Router, Router> {
    // Shared behind an Arc so handlers clone a pointer, not the store.
    let app_state = Arc::new(AppState {
        store,
        add_to_signature_reasons_by_default,
    });
    let app = Router::new()
        .route("/health_check", get(health_check))
        .route("/data", get(get_data))
        .route("/reasons", post(add_reason))
        .route("/reasons/{reason}", delete(delete_reason))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = Uuid::new_v4();
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        request_id = ?request_id,
                        status = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    let status = response.status();
                    span.record("status", status.as_u16());
                    info!(parent: span, ?status, ?latency, "Response sent");
                }),
        );

    axum::serve(listener, app)
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let store = JsonStore::new(configuration.store.data_path);

        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        ))
        .await?;
        let port = listener.local_addr()?.port();
        info!(
            base_url = %configuration.application.base_url,
            port,
            data_path = %store.path().display(),
            "store service listening"
        );

        let server = run(
            listener,
            store,
            configuration.store.add_to_signature_reasons_by_default,
        );

        Ok(Self { server, port })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        Ok(self.server.await?)
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
