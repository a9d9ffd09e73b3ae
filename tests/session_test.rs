//! 갤러리 세션 상태 기계 테스트
//!
//! 선택 → 삭제 확인 → 확정/취소 흐름과 실패 시의 상태 유지를 검증

use async_trait::async_trait;
use photo_gallery_rust::error::{GalleryError, Result};
use photo_gallery_rust::metadata::{normalize, PhotoRecord};
use photo_gallery_rust::session::{GallerySession, SessionState};
use photo_gallery_rust::store::{DeleteReport, PhotoStore};
use std::sync::{Arc, Mutex};

/// 삭제 결과를 주입할 수 있는 모의 저장소
#[derive(Clone)]
struct MockStore {
    records: Vec<PhotoRecord>,
    delete_succeeds: bool,
    deleted: Arc<Mutex<Vec<String>>>,
}

impl MockStore {
    fn new(delete_succeeds: bool) -> Self {
        Self {
            records: vec![normalize("a.jpg", None), normalize("b.jpg", None)],
            delete_succeeds,
            deleted: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl PhotoStore for MockStore {
    async fn list(&self) -> Result<Vec<PhotoRecord>> {
        Ok(self.records.clone())
    }

    async fn delete(&self, record: &PhotoRecord) -> Result<DeleteReport> {
        self.deleted.lock().unwrap().push(record.identifier.clone());
        if self.delete_succeeds {
            Ok(DeleteReport {
                object_deleted: true,
                record_deleted: true,
                ..Default::default()
            })
        } else {
            Ok(DeleteReport {
                object_deleted: false,
                object_error: Some("객체 삭제 실패(모의)".to_string()),
                record_deleted: true,
                ..Default::default()
            })
        }
    }
}

/// select(A) → requestDelete → cancel → 선택은 여전히 A
#[tokio::test]
async fn test_cancel_keeps_selection() {
    let mut session = GallerySession::new();
    session.select(normalize("a.jpg", None));
    session.request_delete();
    session.cancel();

    match session.state() {
        SessionState::Selected(record) => assert_eq!(record.identifier, "a.jpg"),
        other => panic!("unexpected state: {:?}", other),
    }
}

/// confirm 은 삭제가 완전히 성공했을 때만 선택을 해제한다
#[tokio::test]
async fn test_confirm_transitions_only_on_success() {
    let store = MockStore::new(true);
    let mut session = GallerySession::new();
    session.select(normalize("a.jpg", None));
    session.request_delete();

    let report = session.confirm(&store).await.unwrap();
    assert!(report.complete());
    assert_eq!(*session.state(), SessionState::NoneSelected);
    assert_eq!(*store.deleted.lock().unwrap(), vec!["a.jpg"]);
}

/// 부분 실패 시 확인 상태에 머물고 성공을 가장하지 않는다
#[tokio::test]
async fn test_confirm_stays_on_partial_failure() {
    let store = MockStore::new(false);
    let mut session = GallerySession::new();
    session.select(normalize("a.jpg", None));
    session.request_delete();

    let report = session.confirm(&store).await.unwrap();
    assert!(!report.complete());
    assert!(matches!(session.state(), SessionState::ConfirmDelete(_)));
}

/// 확인 상태가 아닌데 confirm 을 부르면 오류
#[tokio::test]
async fn test_confirm_outside_confirm_state_is_error() {
    let store = MockStore::new(true);
    let mut session = GallerySession::new();

    assert!(matches!(
        session.confirm(&store).await,
        Err(GalleryError::Config(_))
    ));

    session.select(normalize("a.jpg", None));
    assert!(matches!(
        session.confirm(&store).await,
        Err(GalleryError::Config(_))
    ));
    // 저장소 삭제는 한 번도 호출되지 않았다
    assert!(store.deleted.lock().unwrap().is_empty());
}

/// 새 선택은 이전 선택을 대체한다
#[tokio::test]
async fn test_select_replaces_previous() {
    let mut session = GallerySession::new();
    session.select(normalize("a.jpg", None));
    session.select(normalize("b.jpg", None));

    assert_eq!(session.selected().unwrap().identifier, "b.jpg");
}

/// 세션은 파괴되지 않고 재사용된다 — 삭제 후에도 다시 선택 가능
#[tokio::test]
async fn test_session_reusable_after_delete() {
    let store = MockStore::new(true);
    let mut session = GallerySession::new();

    session.select(normalize("a.jpg", None));
    session.request_delete();
    session.confirm(&store).await.unwrap();
    assert_eq!(*session.state(), SessionState::NoneSelected);

    session.select(normalize("b.jpg", None));
    assert_eq!(session.selected().unwrap().identifier, "b.jpg");
}
