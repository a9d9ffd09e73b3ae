//! 사진 레코드와 메타데이터 정규화 모듈
//!
//! 사이드카・원격 행의 불완전한 메타데이터를 기본값으로 채워
//! 균일한 `PhotoRecord` 를 만든다. 항목 하나가 깨져 있어도
//! 전체 목록이 중단되지 않도록, 정규화는 절대 실패하지 않는다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date::parse_date;

/// 갤러리의 기본 엔티티. 저장소 종류와 무관하게 같은 형태를 가진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// 저장소 안에서 유일한 식별자（로컬: 파일명, 원격: 객체 경로）
    pub identifier: String,
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 해석된 날짜. 없거나 해석 불가면 `None`
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// 원본 날짜 문자열（진단용）
    #[serde(default)]
    pub raw_date: Option<String>,
    /// 이미지 바이트를 가져올 위치（로컬 경로 또는 공개 URL）
    #[serde(default)]
    pub source: String,
    /// 원격 행 삭제용 핸들
    #[serde(default)]
    pub row_id: Option<String>,
}

/// 파일명에서 확장자를 제거한다. `IMG_01.jpg` → `IMG_01`
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// 태그 목록 정리: 공백 트림, 빈 문자열 제거, 중복은 첫 등장만 유지
pub fn sanitize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            continue;
        }
        if !cleaned.iter().any(|t| t == tag) {
            cleaned.push(tag.to_string());
        }
    }
    cleaned
}

/// 원시 메타데이터 항목에서 `PhotoRecord` 를 만든다.
///
/// - 항목 자체가 없으면 전부 기본값
/// - 필드가 있어도 타입이 틀리면（예: tags 가 배열이 아님）기본값으로 대체
pub fn normalize(identifier: &str, raw: Option<&Value>) -> PhotoRecord {
    let title = raw
        .and_then(|v| v.get("title"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| strip_extension(identifier).to_string());

    let caption = raw
        .and_then(|v| v.get("caption"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let raw_date = raw
        .and_then(|v| v.get("date"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let date = raw_date.as_deref().and_then(parse_date);

    let tags = raw
        .and_then(|v| v.get("tags"))
        .and_then(Value::as_array)
        .map(|array| sanitize_tags(array.iter().filter_map(Value::as_str)))
        .unwrap_or_default();

    PhotoRecord {
        identifier: identifier.to_string(),
        title,
        caption,
        tags,
        date,
        raw_date,
        source: String::new(),
        row_id: None,
    }
}
