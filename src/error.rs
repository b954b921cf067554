use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::geocode::GeocodeError;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    QuotaExceeded,
    UpstreamRateLimited,
    AddressNotFound,
    Upstream(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                format!("요청 형식이 올바르지 않습니다: {}", detail),
            ),
            AppError::QuotaExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "오늘의 조회 한도를 모두 사용했습니다. 내일 다시 시도해주세요.".to_string(),
            ),
            AppError::UpstreamRateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "주소 변환 요청이 많습니다. 잠시 후 다시 시도해주세요.".to_string(),
            ),
            AppError::AddressNotFound => (
                StatusCode::NOT_FOUND,
                "해당 좌표의 주소를 찾을 수 없습니다.".to_string(),
            ),
            AppError::Upstream(detail) => {
                // 내부 원인은 로그로만 남기고 응답은 일반화한다
                tracing::error!("upstream failure: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "주소 변환 중 서버 오류가 발생했습니다.".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { message });

        (status, body).into_response()
    }
}

impl From<GeocodeError> for AppError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::RateLimited => AppError::UpstreamRateLimited,
            GeocodeError::NotFound => AppError::AddressNotFound,
            GeocodeError::Auth(status) => AppError::Upstream(format!("auth rejected ({})", status)),
            GeocodeError::Upstream(detail) => AppError::Upstream(detail),
            GeocodeError::Network(e) => AppError::Upstream(e.to_string()),
        }
    }
}
