use chrono::{DateTime, Utc};
use serde::Serialize;

/// (클라이언트 IP, 날짜) 단위의 사용량 키
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsageKey {
    pub client_ip: String,
    pub date: String,
}

impl UsageKey {
    pub fn for_today(client_ip: &str) -> Self {
        Self {
            client_ip: client_ip.to_string(),
            date: today(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UsageRecord {
    pub count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UsageRecord {
    pub fn new(count: u32) -> Self {
        let now = Utc::now();
        Self {
            count,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageSnapshot {
    pub count: u32,
    pub limit: u32,
    pub date: String,
}

/// 사용량 키에 쓰는 UTC 기준 날짜 문자열
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
