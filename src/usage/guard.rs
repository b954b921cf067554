use super::model::{UsageKey, UsageSnapshot, today};
use super::store::UsageStore;

/// 하루 한도 정책. 저장소 접근은 전부 이 타입을 거친다.
pub struct UsageGuard {
    store: UsageStore,
    limit: u32,
}

impl UsageGuard {
    pub fn new(limit: u32) -> Self {
        Self {
            store: UsageStore::new(),
            limit,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// 부작용 없는 현재 사용량 조회
    pub fn snapshot(&self, client_ip: &str) -> UsageSnapshot {
        let key = UsageKey::for_today(client_ip);
        UsageSnapshot {
            count: self.store.count(&key),
            limit: self.limit,
            date: key.date,
        }
    }

    /// 외부 호출 전에 한도 슬롯을 선점한다. 성공 시 새 카운트.
    /// 검사와 증가를 한 번에 처리하므로 동시 요청으로 한도를 넘을 수 없다.
    pub fn try_reserve(&self, client_ip: &str) -> Option<u32> {
        let key = UsageKey::for_today(client_ip);
        self.store.try_increment(&key, self.limit).ok()
    }

    /// 외부 호출이 실패했을 때 선점한 슬롯을 반납한다.
    /// 실패한 호출은 한도를 소비하지 않는다.
    pub fn release(&self, client_ip: &str) {
        let key = UsageKey::for_today(client_ip);
        self.store.decrement(&key);
    }
}
