//! 날짜 문자열 해석 모듈
//!
//! 사이드카・EXIF・원격 행의 자유 형식 날짜 문자열을 `NaiveDate` 로 변환한다.
//! 해석 실패는 오류가 아니라 `None` — 날짜 불명 사진은 필터에서 항상 통과한다.

use chrono::NaiveDate;

/// 지원하는 날짜 형식
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y년 %m월 %d일",
];

/// 날짜 문자열을 해석한다. 실패하면 `None`.
///
/// ISO-8601 날짜시각（`2025-04-01T09:30:00+09:00`）과 EXIF 표시 형식
/// （`2025-04-01 09:30:00`）은 앞 10자리의 날짜 부분만 사용한다.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    // 날짜시각 문자열은 날짜 부분 프리픽스로 재시도
    if let Some(head) = text.get(..10) {
        for format in &["%Y-%m-%d", "%Y:%m:%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(head, format) {
                return Some(date);
            }
        }
    }

    None
}
