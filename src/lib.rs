pub mod auth;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod service;
pub mod settings;
pub mod store;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use handlers::{
    create_booking, delete_bookings, get_bookings, healthz_live, healthz_ready,
    method_not_allowed, preflight, root,
};
use http::Method;
use http::header::CONTENT_TYPE;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::service::BookingService;
use crate::settings::Settings;
use crate::store::FsStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub service: Arc<BookingService>,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    if settings.uses_default_admin_key() {
        warn!(
            "APP_ADMIN_KEY is not set; admin endpoints accept the built-in development key. \
             Set a real key before exposing this service."
        );
    }

    let store = Arc::new(FsStore::new(&settings.data_dir));
    let state = AppState {
        settings: settings.clone(),
        service: Arc::new(BookingService::new(store)),
    };

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Class Booking API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route(
            "/bookings",
            get(get_bookings)
                .post(create_booking)
                .delete(delete_bookings)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(cors_layer).layer(trace_layer)
}
