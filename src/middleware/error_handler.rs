use axum::{
    body::{Body, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};

// 에러 본문은 { "message": .. } 한 줄이라 이 정도면 충분하다
const ERROR_BODY_LIMIT: usize = 2048;

/// 실패 응답을 로그로 남긴다. 4xx는 상태만, 5xx는 본문까지 기록한다.
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let status = response.status();

    if status.is_client_error() {
        warn!("{} {} -> {}", method, uri, status);
        return response;
    }
    if !status.is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, ERROR_BODY_LIMIT).await {
        Ok(b) => b,
        Err(e) => {
            error!("{} {} -> {} (본문 읽기 실패: {})", method, uri, status, e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    error!(
        "{} {} -> {} {}",
        method,
        uri,
        status,
        String::from_utf8_lossy(&bytes)
    );

    // 본문을 다시 붙이므로 길이 헤더를 지운다
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
