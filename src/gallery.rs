//! 갤러리 오케스트레이터
//!
//! 저장소 스냅샷・필터・세션을 하나의 렌더 패스 흐름으로 묶는다.
//! 목록은 TTL 캐시를 거치고, 업로드・삭제 성공 시 캐시를 무효화한다.

use std::time::Duration;

use crate::error::{GalleryError, Result};
use crate::filter::{apply_filter, FilterCriteria};
use crate::metadata::PhotoRecord;
use crate::session::GallerySession;
use crate::store::cache::CachedListing;
use crate::store::{DeleteReport, PhotoStore, UploadRequest};

pub struct Gallery {
    store: Box<dyn PhotoStore>,
    cache: CachedListing,
    pub session: GallerySession,
}

impl Gallery {
    pub fn new(store: Box<dyn PhotoStore>, cache_ttl: Duration) -> Self {
        Self {
            store,
            cache: CachedListing::new(cache_ttl),
            session: GallerySession::new(),
        }
    }

    /// 현재 스냅샷. 캐시가 유효하면 저장소를 다시 부르지 않는다.
    pub async fn records(&mut self) -> Result<Vec<PhotoRecord>> {
        if let Some(snapshot) = self.cache.get() {
            return Ok(snapshot.to_vec());
        }
        let records = self.store.list().await?;
        self.cache.put(records.clone());
        Ok(records)
    }

    /// 필터 적용 후의 표시 대상 목록
    pub async fn visible(&mut self, criteria: &FilterCriteria) -> Result<Vec<PhotoRecord>> {
        let records = self.records().await?;
        Ok(apply_filter(&records, criteria))
    }

    /// 식별자로 사진을 찾아 세션에 선택한다
    pub async fn select(&mut self, identifier: &str) -> Result<PhotoRecord> {
        let records = self.records().await?;
        let record = records
            .into_iter()
            .find(|r| r.identifier == identifier)
            .ok_or_else(|| GalleryError::PhotoNotFound(identifier.to_string()))?;
        self.session.select(record.clone());
        Ok(record)
    }

    pub async fn upload(&mut self, request: UploadRequest) -> Result<PhotoRecord> {
        let record = self.store.upload(request).await?;
        self.cache.invalidate();
        Ok(record)
    }

    /// 세션의 삭제 확정. 완전 성공 시에만 캐시를 무효화한다.
    pub async fn confirm_delete(&mut self) -> Result<DeleteReport> {
        let report = self.session.confirm(self.store.as_ref()).await?;
        if report.complete() {
            self.cache.invalidate();
        }
        Ok(report)
    }
}
