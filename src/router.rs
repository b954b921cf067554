use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{AppState, middleware, routes};

// 위치 관련 API 라우트
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(routes::location::get_client_config))
        .route("/usage", get(routes::location::get_usage))
        .route(
            "/coordinate-to-address",
            post(routes::location::coordinate_to_address),
        )
        .route("/static-map", post(routes::location::static_map))
}

// 주 라우터: /api 하위의 API와 정적 프론트엔드
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .nest("/api", api_routes())
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(axum::middleware::from_fn(middleware::log_errors));

    // 개발 모드에서만 CORS 허용
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
