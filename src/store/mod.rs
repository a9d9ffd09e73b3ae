//! 사진 저장소 추상화
//!
//! 로컬（폴더＋사이드카）과 원격（객체 저장소＋레코드 테이블）이
//! 같은 `PhotoStore` 인터페이스를 구현한다. 호출 측（필터・세션・CLI）은
//! 어느 변종이 활성인지 알 필요가 없다.

pub mod cache;
mod exif;
pub mod local;
pub mod remote;
pub mod supabase;

use async_trait::async_trait;

use crate::error::{GalleryError, Result};
use crate::metadata::PhotoRecord;

pub use local::LocalFileStore;
pub use remote::{ObjectStorage, RecordTable, RemoteStore};

/// 업로드 한 건의 입력
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    /// 사용자가 제안한 파일명（정리・유일화를 거쳐 식별자가 된다）
    pub file_name: String,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub tags: Vec<String>,
}

/// 삭제 결과. 바이트 삭제와 행 삭제는 독립적으로 시도되며,
/// 한쪽 실패가 다른 쪽 시도를 막지 않는다.
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    pub object_deleted: bool,
    pub record_deleted: bool,
    pub object_error: Option<String>,
    pub record_error: Option<String>,
}

impl DeleteReport {
    /// 두 하위 작업이 모두 성공했을 때만 true
    pub fn complete(&self) -> bool {
        self.object_deleted && self.record_deleted
    }
}

/// 저장소 능력 집합 {list, upload?, delete?}
///
/// 업로드・삭제는 기본 구현이 `Unsupported` 를 돌려준다 — 로컬 변종은
/// list 만 제공한다.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// 현재 레코드 목록（변종별 고정 순서）
    async fn list(&self) -> Result<Vec<PhotoRecord>>;

    async fn upload(&self, _request: UploadRequest) -> Result<PhotoRecord> {
        Err(GalleryError::Unsupported("업로드"))
    }

    async fn delete(&self, _record: &PhotoRecord) -> Result<DeleteReport> {
        Err(GalleryError::Unsupported("삭제"))
    }
}
