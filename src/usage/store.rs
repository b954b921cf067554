use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::model::{UsageKey, UsageRecord};

/// 메모리 사용량 저장소. 프로세스 단위이며 재시작하면 초기화된다.
/// 멀티 프로세스로 띄우면 IP별 한도 보장이 깨진다 (배포 제약).
pub struct UsageStore {
    records: Mutex<HashMap<UsageKey, UsageRecord>>,
}

impl UsageStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UsageKey, UsageRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 조회 전용. 레코드가 없어도 생성하지 않는다.
    pub fn count(&self, key: &UsageKey) -> u32 {
        self.lock().get(key).map(|r| r.count).unwrap_or(0)
    }

    /// 한도 미만이면 카운트를 1 올리고 새 카운트를 돌려준다.
    /// 레코드 보장과 증가를 한 번의 잠금 안에서 처리한다.
    pub fn try_increment(&self, key: &UsageKey, limit: u32) -> Result<u32, u32> {
        let mut records = self.lock();
        match records.get_mut(key) {
            Some(record) => {
                if record.count >= limit {
                    return Err(record.count);
                }
                record.count += 1;
                record.updated_at = Utc::now();
                Ok(record.count)
            }
            None => {
                if limit == 0 {
                    return Err(0);
                }
                records.insert(key.clone(), UsageRecord::new(1));
                Ok(1)
            }
        }
    }

    /// 실패한 호출을 한도에서 되돌린다. 레코드가 없으면 아무 일도 하지 않는다.
    pub fn decrement(&self, key: &UsageKey) {
        let mut records = self.lock();
        if let Some(record) = records.get_mut(key) {
            record.count = record.count.saturating_sub(1);
            record.updated_at = Utc::now();
        }
    }
}

impl Default for UsageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(ip: &str) -> UsageKey {
        UsageKey {
            client_ip: ip.to_string(),
            date: "2026-08-26".to_string(),
        }
    }

    #[test]
    fn count_does_not_create_record() {
        let store = UsageStore::new();
        assert_eq!(store.count(&key("1.2.3.4")), 0);
        assert_eq!(store.count(&key("1.2.3.4")), 0);
        assert_eq!(store.try_increment(&key("1.2.3.4"), 100), Ok(1));
    }

    #[test]
    fn increment_until_limit() {
        let store = UsageStore::new();
        let k = key("1.2.3.4");
        for n in 1..=3 {
            assert_eq!(store.try_increment(&k, 3), Ok(n));
        }
        assert_eq!(store.try_increment(&k, 3), Err(3));
        assert_eq!(store.count(&k), 3);
    }

    #[test]
    fn keys_are_independent() {
        let store = UsageStore::new();
        assert_eq!(store.try_increment(&key("1.1.1.1"), 1), Ok(1));
        assert_eq!(store.try_increment(&key("2.2.2.2"), 1), Ok(1));
        assert_eq!(store.try_increment(&key("1.1.1.1"), 1), Err(1));
    }

    #[test]
    fn decrement_rolls_back() {
        let store = UsageStore::new();
        let k = key("1.2.3.4");
        assert_eq!(store.try_increment(&k, 100), Ok(1));
        store.decrement(&k);
        assert_eq!(store.count(&k), 0);
        // 레코드가 없으면 무시
        store.decrement(&key("9.9.9.9"));
        assert_eq!(store.count(&key("9.9.9.9")), 0);
    }

    #[test]
    fn zero_limit_refuses_first_call() {
        let store = UsageStore::new();
        assert_eq!(store.try_increment(&key("1.2.3.4"), 0), Err(0));
    }
}
