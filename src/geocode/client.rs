use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, header};
use thiserror::Error;

use super::model::{CoordToAddressResponse, extract_address};

const KAKAO_BASE_URL: &str = "https://dapi.kakao.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("업스트림 인증 실패 (status {0})")]
    Auth(u16),
    #[error("업스트림 호출 한도 초과")]
    RateLimited,
    #[error("좌표에 해당하는 주소 없음")]
    NotFound,
    #[error("업스트림 오류: {0}")]
    Upstream(String),
    #[error("네트워크 오류: {0}")]
    Network(#[from] reqwest::Error),
}

/// 역지오코딩 추상화. 핸들러 테스트에서는 스텁으로 대체한다.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn coord_to_address(&self, lat: f64, lng: f64) -> Result<String, GeocodeError>;
}

pub struct KakaoGeocoder {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl KakaoGeocoder {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, KAKAO_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl ReverseGeocoder for KakaoGeocoder {
    async fn coord_to_address(&self, lat: f64, lng: f64) -> Result<String, GeocodeError> {
        // 카카오는 x=경도, y=위도 순서
        let url = format!(
            "{}/v2/local/geo/coord2address.json?x={}&y={}",
            self.base_url, lng, lat
        );

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeocodeError::Auth(status.as_u16()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if !status.is_success() {
            return Err(GeocodeError::Upstream(format!("status {}", status)));
        }

        let body: CoordToAddressResponse = response.json().await?;

        match body.documents.first() {
            Some(doc) => Ok(extract_address(doc)),
            None => Err(GeocodeError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::Query, http::HeaderMap, response::IntoResponse, routing::get};
    use std::collections::HashMap;

    // 업스트림 흉내: 실제 소켓에 바인드해서 상태 코드 변환까지 검증한다
    async fn serve_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("test server");
        });
        format!("http://{}", addr)
    }

    fn upstream_with(handler_body: &'static str, status: StatusCode) -> Router {
        Router::new().route(
            "/v2/local/geo/coord2address.json",
            get(move || async move {
                (
                    status,
                    [(header::CONTENT_TYPE, "application/json")],
                    handler_body,
                )
            }),
        )
    }

    #[tokio::test]
    async fn sends_kakao_credential_and_coordinate_order() {
        let router = Router::new().route(
            "/v2/local/geo/coord2address.json",
            get(
                |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                    let authorized = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|h| h.to_str().ok())
                        == Some("KakaoAK test-rest-key");
                    // x=경도, y=위도
                    let coords_ok = params.get("x").map(String::as_str) == Some("126.986")
                        && params.get("y").map(String::as_str) == Some("37.541");
                    if !authorized || !coords_ok {
                        return (StatusCode::UNAUTHORIZED, "").into_response();
                    }
                    (
                        [(header::CONTENT_TYPE, "application/json")],
                        r#"{"documents":[{"address":{"address_name":"서울 종로구 청운동 1-1"}}]}"#,
                    )
                        .into_response()
                },
            ),
        );
        let base = serve_upstream(router).await;

        let geocoder = KakaoGeocoder::with_base_url("test-rest-key".to_string(), base);
        let address = geocoder
            .coord_to_address(37.541, 126.986)
            .await
            .expect("resolved address");
        assert_eq!(address, "서울 종로구 청운동 1-1");
    }

    #[tokio::test]
    async fn upstream_401_maps_to_auth_error() {
        let base = serve_upstream(upstream_with("", StatusCode::UNAUTHORIZED)).await;
        let geocoder = KakaoGeocoder::with_base_url("bad-key".to_string(), base);

        match geocoder.coord_to_address(37.5, 127.0).await {
            Err(GeocodeError::Auth(401)) => {}
            other => panic!("expected Auth(401), got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn upstream_429_maps_to_rate_limited() {
        let base = serve_upstream(upstream_with("", StatusCode::TOO_MANY_REQUESTS)).await;
        let geocoder = KakaoGeocoder::with_base_url("test-rest-key".to_string(), base);

        assert!(matches!(
            geocoder.coord_to_address(37.5, 127.0).await,
            Err(GeocodeError::RateLimited)
        ));
    }

    #[tokio::test]
    async fn upstream_5xx_maps_to_upstream_error() {
        let base = serve_upstream(upstream_with("", StatusCode::BAD_GATEWAY)).await;
        let geocoder = KakaoGeocoder::with_base_url("test-rest-key".to_string(), base);

        match geocoder.coord_to_address(37.5, 127.0).await {
            Err(GeocodeError::Upstream(detail)) => assert!(detail.contains("502")),
            other => panic!("expected Upstream, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn empty_documents_map_to_not_found() {
        let base =
            serve_upstream(upstream_with(r#"{"documents":[]}"#, StatusCode::OK)).await;
        let geocoder = KakaoGeocoder::with_base_url("test-rest-key".to_string(), base);

        assert!(matches!(
            geocoder.coord_to_address(37.5, 127.0).await,
            Err(GeocodeError::NotFound)
        ));
    }
}
