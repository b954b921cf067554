use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use juso_backend::{
    AppState, config::Config, geocode::KakaoGeocoder, router::build_router, usage::UsageGuard,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 로그 초기화
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드 (KAKAO_REST_API_KEY가 없으면 여기서 중단)
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 애플리케이션 상태: 사용량 가드와 지오코더를 주입
    let state = AppState {
        usage: Arc::new(UsageGuard::new(config.daily_usage_limit)),
        geocoder: Arc::new(KakaoGeocoder::new(config.kakao_rest_api_key.clone())),
        config,
    };

    let app = build_router(state.clone());

    // 서버 시작
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
