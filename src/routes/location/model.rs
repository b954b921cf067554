use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CoordinateRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct ClientConfigResponse {
    #[serde(rename = "kakaoJsKey")]
    pub kakao_js_key: String,
}

#[derive(Debug, Serialize)]
pub struct CoordinateToAddressResponse {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "usageCount")]
    pub usage_count: u32,
}
