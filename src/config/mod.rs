use std::env;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub kakao_rest_api_key: String,
    pub kakao_js_key: String,
    pub server_host: String,
    pub server_port: u16,
    pub daily_usage_limit: u32,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            // 필수 값: 기본값 없음 (키를 코드에 박아두지 않는다)
            kakao_rest_api_key: env::var("KAKAO_REST_API_KEY")?,
            // 지도 SDK용 JavaScript 키, /api/config로 페이지에 내려준다
            kakao_js_key: env::var("KAKAO_JS_KEY")?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            daily_usage_limit: env::var("DAILY_USAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }
}
