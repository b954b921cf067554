use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{AppState, error::AppError, middleware::ClientIp, usage::UsageSnapshot};

use super::model::{ClientConfigResponse, CoordinateRequest, CoordinateToAddressResponse};

/// 페이지가 쓸 공개 설정. REST 키는 절대 내려주지 않는다.
#[axum::debug_handler]
pub async fn get_client_config(State(state): State<AppState>) -> Json<ClientConfigResponse> {
    Json(ClientConfigResponse {
        kakao_js_key: state.config.kakao_js_key.clone(),
    })
}

/// 오늘 사용량 조회. 부작용 없음.
#[axum::debug_handler]
pub async fn get_usage(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
) -> Json<UsageSnapshot> {
    Json(state.usage.snapshot(&ip))
}

#[axum::debug_handler]
pub async fn coordinate_to_address(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    payload: Result<Json<CoordinateRequest>, JsonRejection>,
) -> Result<Json<CoordinateToAddressResponse>, AppError> {
    let req = parse_coordinate(payload)?;

    // 외부 호출 전에 한도 슬롯을 선점한다
    let usage_count = state.usage.try_reserve(&ip).ok_or(AppError::QuotaExceeded)?;

    match state.geocoder.coord_to_address(req.lat, req.lng).await {
        Ok(address) => {
            tracing::info!(
                "resolved ({}, {}) -> {} [{}:{}]",
                req.lat,
                req.lng,
                address,
                ip,
                usage_count
            );
            Ok(Json(CoordinateToAddressResponse {
                address,
                lat: req.lat,
                lng: req.lng,
                usage_count,
            }))
        }
        Err(e) => {
            // 실패한 호출은 한도를 소비하지 않는다
            state.usage.release(&ip);
            tracing::warn!("geocode failed for ({}, {}): {}", req.lat, req.lng, e);
            Err(AppError::from(e))
        }
    }
}

/// 실제 지도 타일이 아닌 자리 표시용 벡터 이미지를 돌려준다
#[axum::debug_handler]
pub async fn static_map(
    payload: Result<Json<CoordinateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = parse_coordinate(payload)?;

    let svg = render_static_map(req.lat, req.lng);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

fn parse_coordinate(
    payload: Result<Json<CoordinateRequest>, JsonRejection>,
) -> Result<CoordinateRequest, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    if !(-90.0..=90.0).contains(&req.lat) {
        return Err(AppError::Validation(format!(
            "위도는 -90 ~ 90 사이여야 합니다 (lat={})",
            req.lat
        )));
    }
    if !(-180.0..=180.0).contains(&req.lng) {
        return Err(AppError::Validation(format!(
            "경도는 -180 ~ 180 사이여야 합니다 (lng={})",
            req.lng
        )));
    }
    Ok(req)
}

fn render_static_map(lat: f64, lng: f64) -> String {
    const WIDTH: u32 = 400;
    const HEIGHT: u32 = 300;
    const CELL: u32 = 40;

    let mut grid = String::new();
    let mut x = CELL;
    while x < WIDTH {
        grid.push_str(&format!(
            r##"<line x1="{x}" y1="0" x2="{x}" y2="{HEIGHT}" stroke="#c5d4c0" stroke-width="1"/>"##
        ));
        x += CELL;
    }
    let mut y = CELL;
    while y < HEIGHT {
        grid.push_str(&format!(
            r##"<line x1="0" y1="{y}" x2="{WIDTH}" y2="{y}" stroke="#c5d4c0" stroke-width="1"/>"##
        ));
        y += CELL;
    }

    let cx = WIDTH / 2;
    let cy = HEIGHT / 2;
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">
<rect width="{WIDTH}" height="{HEIGHT}" fill="#e8f0e4"/>
{grid}
<line x1="{cx}" y1="{y1}" x2="{cx}" y2="{y2}" stroke="#e53935" stroke-width="2"/>
<line x1="{x1}" y1="{cy}" x2="{x2}" y2="{cy}" stroke="#e53935" stroke-width="2"/>
<circle cx="{cx}" cy="{cy}" r="6" fill="#e53935"/>
<text x="{cx}" y="{ty}" text-anchor="middle" font-family="sans-serif" font-size="12" fill="#333">{lat:.6}, {lng:.6}</text>
</svg>"##,
        y1 = cy - 16,
        y2 = cy + 16,
        x1 = cx - 16,
        x2 = cx + 16,
        ty = HEIGHT - 14,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_map_is_svg_with_coordinate_caption() {
        let svg = render_static_map(37.541, 126.986);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("37.541000, 126.986000"));
    }

    #[test]
    fn static_map_marker_sits_at_center() {
        let svg = render_static_map(0.0, 0.0);
        assert!(svg.contains(r#"<circle cx="200" cy="150""#));
    }
}
