//! 갤러리 세션 모듈
//!
//! 현재 선택된 사진과 삭제 확인 상태를 담는 작은 상태 기계.
//! 전역 가변 상태 대신 렌더 호출에 명시적으로 전달한다.
//!
//! ```text
//! NoneSelected --select--> Selected --request_delete--> ConfirmDelete
//!      ^                      |  ^                          |
//!      +-------- close -------+  +-------- cancel ----------+
//!      +------------- confirm（삭제 성공 시）----------------+
//! ```

use crate::error::{GalleryError, Result};
use crate::metadata::PhotoRecord;
use crate::store::{DeleteReport, PhotoStore};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    NoneSelected,
    Selected(PhotoRecord),
    ConfirmDelete(PhotoRecord),
}

#[derive(Debug, Clone)]
pub struct GallerySession {
    state: SessionState,
}

impl GallerySession {
    pub fn new() -> Self {
        Self {
            state: SessionState::NoneSelected,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 선택 중인 레코드（확인 대기 중 포함）
    pub fn selected(&self) -> Option<&PhotoRecord> {
        match &self.state {
            SessionState::NoneSelected => None,
            SessionState::Selected(record) | SessionState::ConfirmDelete(record) => Some(record),
        }
    }

    /// 사진 선택. 이전 선택은 대체된다.
    pub fn select(&mut self, record: PhotoRecord) {
        self.state = SessionState::Selected(record);
    }

    /// 상세 보기 닫기. 선택 상태에서만 의미가 있다.
    pub fn close(&mut self) {
        if let SessionState::Selected(_) = self.state {
            self.state = SessionState::NoneSelected;
        }
    }

    /// 삭제 확인 요청. 선택 상태에서만 전이한다.
    pub fn request_delete(&mut self) {
        if let SessionState::Selected(record) = &self.state {
            self.state = SessionState::ConfirmDelete(record.clone());
        }
    }

    /// 삭제 확인 취소 — 선택 상태로 복귀
    pub fn cancel(&mut self) {
        if let SessionState::ConfirmDelete(record) = &self.state {
            self.state = SessionState::Selected(record.clone());
        }
    }

    /// 삭제 확정. 저장소 삭제가 완전히 성공했을 때만 선택을 해제한다.
    /// 부분 실패・오류 시에는 확인 상태에 머문다（성공을 가장하지 않는다）.
    pub async fn confirm<S: PhotoStore + ?Sized>(&mut self, store: &S) -> Result<DeleteReport> {
        let record = match &self.state {
            SessionState::ConfirmDelete(record) => record.clone(),
            _ => {
                return Err(GalleryError::Config(
                    "삭제 확인 상태가 아닙니다".to_string(),
                ))
            }
        };

        let report = store.delete(&record).await?;
        if report.complete() {
            self.state = SessionState::NoneSelected;
        }
        Ok(report)
    }
}

impl Default for GallerySession {
    fn default() -> Self {
        Self::new()
    }
}
