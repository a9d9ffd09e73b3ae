//! 목록 스냅샷 캐시
//!
//! 반복 조회 때 저장소 호출을 줄이기 위한 시간 제한 캐시.
//! 스냅샷은 읽기 전용이며, 유효 시간이 지나면 `get` 이 `None` 을
//! 돌려주어 호출 측이 다음 접근에서 다시 읽게 한다.

use std::time::{Duration, Instant};

use crate::metadata::PhotoRecord;

#[derive(Debug)]
pub struct CachedListing {
    ttl: Duration,
    snapshot: Option<(Instant, Vec<PhotoRecord>)>,
}

impl CachedListing {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            snapshot: None,
        }
    }

    /// 유효한 스냅샷이 있으면 돌려준다. 만료・부재 시 `None`.
    pub fn get(&self) -> Option<&[PhotoRecord]> {
        let (fetched_at, records) = self.snapshot.as_ref()?;
        if fetched_at.elapsed() > self.ttl {
            return None;
        }
        Some(records)
    }

    /// 스냅샷 교체（시각도 갱신）
    pub fn put(&mut self, records: Vec<PhotoRecord>) {
        self.snapshot = Some((Instant::now(), records));
    }

    /// 업로드・삭제 뒤 강제 무효화
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }
}
