use axum::{Router, http, middleware};
use http::header::CONTENT_TYPE;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use uuid::Uuid;

use crate::adapters::{
    self,
    http::{app_state::AppState, middleware::rate_limit_middleware},
};

pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let api = adapters::http::routes::router().layer(middleware::from_fn_with_state(
        app_state.clone(),
        rate_limit_middleware,
    ));

    let mut router = Router::new().nest("/api", api);

    if let Some(public_dir) = &app_state.config.public_dir {
        if public_dir.is_dir() {
            router = router.fallback_service(ServeDir::new(public_dir));
        } else {
            tracing::warn!(path = %public_dir.display(), "PUBLIC_DIR is not a directory, static UI disabled");
        }
    }

    router
        .with_state(app_state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http-request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                    request_id = %request_id
                )
            }),
        )
}
