//! Supabase 호환 REST 구현
//!
//! `ObjectStorage` 는 Storage API（`/storage/v1`）, `RecordTable` 은
//! PostgREST（`/rest/v1`）를 사용한다. 접속 정보는 설정・환경 변수에서만
//! 받는다 — 코드에 자격 증명을 넣지 않는다.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::date::parse_date;
use crate::error::{GalleryError, Result};
use crate::metadata::{sanitize_tags, strip_extension, PhotoRecord};
use crate::store::{ObjectStorage, RecordTable};

/// 원격 테이블 한 행. 선택 필드는 전부 누락을 허용하고
/// 레코드 변환 시 기본값으로 채운다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl RemoteRow {
    /// 행 → 레코드. 빠진 선택 필드는 정규화 규칙대로 기본값을 채운다.
    pub fn into_record(self) -> PhotoRecord {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| strip_extension(&self.filename).to_string());

        let date = self.uploaded_at.as_deref().and_then(parse_date);

        PhotoRecord {
            identifier: self.filename,
            title,
            caption: self.caption.unwrap_or_default(),
            tags: sanitize_tags(self.tags.unwrap_or_default()),
            date,
            raw_date: self.uploaded_at,
            source: self.url.unwrap_or_default(),
            row_id: self.id.map(|id| id.to_string()),
        }
    }

    fn from_record(record: &PhotoRecord) -> Self {
        Self {
            id: None,
            filename: record.identifier.clone(),
            title: Some(record.title.clone()),
            caption: Some(record.caption.clone()),
            tags: Some(record.tags.clone()),
            url: Some(record.source.clone()),
            uploaded_at: Some(Utc::now().to_rfc3339()),
        }
    }
}

/// 상태 코드가 실패면 본문을 담은 `ApiCall` 오류로 바꾼다
async fn check_status(response: reqwest::Response, context: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GalleryError::ApiCall(format!("{context}: {status} {body}")))
}

pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(base_url: &str, api_key: &str, bucket: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: bucket.to_string(),
        }
    }

    fn object_url(&self, identifier: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, identifier
        )
    }

    fn content_type(identifier: &str) -> &'static str {
        match identifier.rsplit_once('.').map(|(_, ext)| ext) {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn put(&self, identifier: &str, bytes: &[u8]) -> Result<()> {
        let response = self
            .client
            .post(self.object_url(identifier))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("Content-Type", Self::content_type(identifier))
            .body(bytes.to_vec())
            .send()
            .await?;
        check_status(response, "객체 업로드").await?;
        Ok(())
    }

    async fn delete(&self, identifier: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.object_url(identifier))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .send()
            .await?;
        check_status(response, "객체 삭제").await?;
        Ok(())
    }

    fn public_url(&self, identifier: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, identifier
        )
    }
}

pub struct SupabaseTable {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseTable {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl RecordTable for SupabaseTable {
    async fn select_all(&self) -> Result<Vec<PhotoRecord>> {
        let response = self
            .client
            .get(self.table_url())
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .query(&[("select", "*"), ("order", "uploaded_at.desc")])
            .send()
            .await?;
        let response = check_status(response, "목록 조회").await?;

        let rows: Vec<RemoteRow> = response.json().await?;
        Ok(rows.into_iter().map(RemoteRow::into_record).collect())
    }

    async fn insert(&self, record: &PhotoRecord) -> Result<PhotoRecord> {
        let response = self
            .client
            .post(self.table_url())
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .json(&RemoteRow::from_record(record))
            .send()
            .await?;
        let response = check_status(response, "행 삽입").await?;

        let mut rows: Vec<RemoteRow> = response.json().await?;
        match rows.pop() {
            Some(row) => Ok(row.into_record()),
            None => Err(GalleryError::ApiCall(
                "행 삽입 응답이 비어 있습니다".to_string(),
            )),
        }
    }

    async fn delete(&self, row_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.table_url())
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .query(&[("id", format!("eq.{row_id}"))])
            .send()
            .await?;
        check_status(response, "행 삭제").await?;
        Ok(())
    }
}
