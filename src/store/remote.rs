//! 원격 사진 저장소
//!
//! 객체 저장소（바이트）와 레코드 테이블（메타데이터）두 협력자 위에서
//! 동작한다. 업로드는 2단계 커밋: 바이트 저장 후 행 삽입이 실패하면
//! 방금 올린 객체를 보상 삭제한다. 보상 삭제까지 실패하면
//! 수동 정리가 필요한 고아 객체로 명시적으로 보고한다.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{GalleryError, Result};
use crate::metadata::{sanitize_tags, strip_extension, PhotoRecord};
use crate::store::{DeleteReport, PhotoStore, UploadRequest};

/// 이미지 바이트 협력자. 식별자 단위로 저장・삭제하고 표시용 URL 을 돌려준다.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, identifier: &str, bytes: &[u8]) -> Result<()>;
    async fn delete(&self, identifier: &str) -> Result<()>;
    fn public_url(&self, identifier: &str) -> String;
}

/// 메타데이터 행 협력자. 목록은 업로드 시각 내림차순.
#[async_trait]
pub trait RecordTable: Send + Sync {
    async fn select_all(&self) -> Result<Vec<PhotoRecord>>;
    /// 삽입 후 `row_id` 가 채워진 레코드를 돌려준다
    async fn insert(&self, record: &PhotoRecord) -> Result<PhotoRecord>;
    async fn delete(&self, row_id: &str) -> Result<()>;
}

pub struct RemoteStore<S, T> {
    storage: S,
    table: T,
}

impl<S: ObjectStorage, T: RecordTable> RemoteStore<S, T> {
    pub fn new(storage: S, table: T) -> Self {
        Self { storage, table }
    }
}

#[async_trait]
impl<S: ObjectStorage, T: RecordTable> PhotoStore for RemoteStore<S, T> {
    async fn list(&self) -> Result<Vec<PhotoRecord>> {
        let mut records = self.table.select_all().await?;
        for record in &mut records {
            if record.source.is_empty() {
                record.source = self.storage.public_url(&record.identifier);
            }
        }
        Ok(records)
    }

    async fn upload(&self, request: UploadRequest) -> Result<PhotoRecord> {
        let identifier = unique_identifier(&request.file_name, &request.bytes);

        self.storage.put(&identifier, &request.bytes).await?;

        let record = PhotoRecord {
            title: request
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| strip_extension(&identifier).to_string()),
            caption: request.caption.unwrap_or_default(),
            tags: sanitize_tags(&request.tags),
            date: None,
            raw_date: None,
            source: self.storage.public_url(&identifier),
            row_id: None,
            identifier: identifier.clone(),
        };

        match self.table.insert(&record).await {
            Ok(inserted) => Ok(inserted),
            Err(insert_error) => {
                // 보상 삭제 — 고아 바이트를 남기지 않는다
                if let Err(rollback_error) = self.storage.delete(&identifier).await {
                    return Err(GalleryError::OrphanedObject {
                        identifier,
                        detail: format!(
                            "삽입 실패: {insert_error} / 롤백 실패: {rollback_error}"
                        ),
                    });
                }
                Err(insert_error)
            }
        }
    }

    async fn delete(&self, record: &PhotoRecord) -> Result<DeleteReport> {
        let mut report = DeleteReport::default();

        match self.storage.delete(&record.identifier).await {
            Ok(()) => report.object_deleted = true,
            Err(error) => report.object_error = Some(error.to_string()),
        }

        match record.row_id.as_deref() {
            Some(row_id) => match self.table.delete(row_id).await {
                Ok(()) => report.record_deleted = true,
                Err(error) => report.record_error = Some(error.to_string()),
            },
            None => {
                report.record_error = Some("행 ID 가 없어 메타데이터를 삭제할 수 없습니다".to_string())
            }
        }

        Ok(report)
    }
}

/// 확장자 허용 목록. 목록 밖 확장자는 기본 이미지 타입으로 강제한다.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
const DEFAULT_EXTENSION: &str = "jpg";

lazy_static! {
    /// 안전 문자 집합（영숫자・`_`・`-`・`.`）밖의 문자
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]").unwrap();
}

/// 제안 파일명에서 충돌 내성이 있는 저장 식별자를 만든다.
///
/// - 어간: 안전 문자만 남긴다（전부 지워지면 `photo`）
/// - 확장자: 소문자화 후 허용 목록 검사, 벗어나면 `.jpg`
/// - 내용 해시＋현재 시각에서 딴 접미사로 유일성을 보장
pub fn unique_identifier(proposed: &str, bytes: &[u8]) -> String {
    let (stem, extension) = match proposed.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext.to_lowercase()),
        _ => (proposed, String::new()),
    };

    let stem = UNSAFE_CHARS.replace_all(stem, "").to_string();
    let stem = if stem.is_empty() { "photo" } else { stem.as_str() };

    let extension = if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        extension
    } else {
        DEFAULT_EXTENSION.to_string()
    };

    format!("{}_{}.{}", stem, random_suffix(bytes), extension)
}

/// 바이트 내용과 나노초 시각의 SHA-256 앞 12자리
fn random_suffix(bytes: &[u8]) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.update(nanos.to_le_bytes());
    let digest = hasher.finalize();

    hex::encode(digest)[..12].to_string()
}
