use serde::Deserialize;

/// 문서는 있으나 지번/도로명이 모두 비어 있을 때 쓰는 표시 문자열
pub const ADDRESS_NOT_FOUND: &str = "주소 정보 없음";

/// 카카오 coord2address 응답. 필요한 필드만 역직렬화한다.
#[derive(Debug, Deserialize)]
pub struct CoordToAddressResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Document {
    pub address: Option<LotAddress>,
    pub road_address: Option<RoadAddress>,
}

/// 지번 주소
#[derive(Debug, Deserialize)]
pub struct LotAddress {
    pub address_name: String,
}

/// 도로명 주소
#[derive(Debug, Deserialize)]
pub struct RoadAddress {
    pub address_name: String,
}

/// 지번 주소를 우선하고, 없으면 도로명, 둘 다 없으면 표시 문자열
pub fn extract_address(doc: &Document) -> String {
    doc.address
        .as_ref()
        .map(|a| a.address_name.clone())
        .or_else(|| doc.road_address.as_ref().map(|r| r.address_name.clone()))
        .unwrap_or_else(|| ADDRESS_NOT_FOUND.to_string())
}
