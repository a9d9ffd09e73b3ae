//! 필터 엔진 모듈
//!
//! 텍스트・태그・날짜 범위 조건으로 사진 목록을 좁힌다.
//! 순서 유지, 무변경（순수 함수）. 날짜 불명 사진은 날짜 조건으로
//! 절대 제외하지 않는다（불명 ≠ 범위 밖）.

use chrono::NaiveDate;

use crate::metadata::PhotoRecord;

/// 한 번의 표시 패스에 쓰이는 필터 조건
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// 제목+캡션 부분 일치 검색어（소문자 비교）
    pub text_query: String,
    /// 전부 포함해야 하는 태그（AND 의미）
    pub required_tags: Vec<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    /// 시작일이 끝일보다 늦으면 조용히 맞바꿔 범위를 정돈한다
    pub fn normalized(&self) -> Self {
        let mut criteria = self.clone();
        if let (Some(from), Some(to)) = (criteria.date_from, criteria.date_to) {
            if from > to {
                criteria.date_from = Some(to);
                criteria.date_to = Some(from);
            }
        }
        criteria
    }

    fn matches(&self, record: &PhotoRecord) -> bool {
        // 1. 텍스트 일치（빈 검색어는 항상 통과）
        if !self.text_query.is_empty() {
            let haystack = format!("{}{}", record.title, record.caption).to_lowercase();
            if !haystack.contains(&self.text_query.to_lowercase()) {
                return false;
            }
        }

        // 2. 태그 부분집합（AND）
        if !self.required_tags.is_empty() {
            let has_all = self
                .required_tags
                .iter()
                .all(|required| record.tags.iter().any(|tag| tag == required));
            if !has_all {
                return false;
            }
        }

        // 3/4. 날짜 범위 — 날짜 불명은 무조건 통과
        if let Some(from) = self.date_from {
            if record.date.is_some_and(|date| date < from) {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date.is_some_and(|date| date > to) {
                return false;
            }
        }

        true
    }
}

/// 필터 적용. 입력 순서를 유지하며 레코드를 변경하지 않는다.
pub fn apply_filter(records: &[PhotoRecord], criteria: &FilterCriteria) -> Vec<PhotoRecord> {
    let criteria = criteria.normalized();
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// 목록 전체의 태그 모음（필터 UI 선택지용, 정렬・중복 제거）
pub fn collect_tags(records: &[PhotoRecord]) -> Vec<String> {
    let mut tags: Vec<String> = records
        .iter()
        .flat_map(|record| record.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::normalize;
    use serde_json::json;

    fn record(title: &str, tags: &[&str], date: Option<&str>) -> PhotoRecord {
        let mut raw = json!({ "title": title, "tags": tags });
        if let Some(date) = date {
            raw["date"] = json!(date);
        }
        normalize(&format!("{}.jpg", title), Some(&raw))
    }

    fn sample() -> Vec<PhotoRecord> {
        vec![
            record("봄의 창가", &["봄"], Some("2025-04-01")),
            record("비 오는 날", &["비"], Some("2025-05-03")),
        ]
    }

    #[test]
    fn test_empty_criteria_passes_everything() {
        let records = sample();
        let visible = apply_filter(&records, &FilterCriteria::default());
        assert_eq!(visible, records);
    }

    #[test]
    fn test_text_query_matches_title() {
        let records = sample();
        let criteria = FilterCriteria {
            text_query: "봄".to_string(),
            ..Default::default()
        };
        let visible = apply_filter(&records, &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "봄의 창가");
    }

    #[test]
    fn test_text_query_matches_caption_case_insensitive() {
        let raw = json!({ "title": "창가", "caption": "Morning Light" });
        let records = vec![normalize("a.jpg", Some(&raw))];
        let criteria = FilterCriteria {
            text_query: "morning".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filter(&records, &criteria).len(), 1);
    }

    #[test]
    fn test_required_tags_are_and_not_or() {
        let records = vec![
            record("a", &["spring"], None),
            record("b", &["spring", "rain", "cafe"], None),
        ];
        let criteria = FilterCriteria {
            required_tags: vec!["spring".to_string(), "rain".to_string()],
            ..Default::default()
        };
        let visible = apply_filter(&records, &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "b");
    }

    #[test]
    fn test_date_range_excludes_outside() {
        let records = sample();
        let criteria = FilterCriteria {
            date_from: parse("2025-04-15"),
            date_to: parse("2025-05-31"),
            ..Default::default()
        };
        let visible = apply_filter(&records, &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "비 오는 날");
    }

    #[test]
    fn test_reversed_range_behaves_as_swapped() {
        let records = sample();
        let reversed = FilterCriteria {
            date_from: parse("2025-05-31"),
            date_to: parse("2025-04-15"),
            ..Default::default()
        };
        let swapped = FilterCriteria {
            date_from: parse("2025-04-15"),
            date_to: parse("2025-05-31"),
            ..Default::default()
        };
        assert_eq!(
            apply_filter(&records, &reversed),
            apply_filter(&records, &swapped)
        );
    }

    #[test]
    fn test_unknown_date_never_excluded_by_date_bounds() {
        let records = vec![record("날짜 없는 사진", &[], None)];
        let criteria = FilterCriteria {
            date_from: parse("1999-01-01"),
            date_to: parse("1999-01-02"),
            ..Default::default()
        };
        assert_eq!(apply_filter(&records, &criteria).len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let records = sample();
        let criteria = FilterCriteria::default();
        let once = apply_filter(&records, &criteria);
        let twice = apply_filter(&once, &criteria);
        assert_eq!(once, twice);
        assert_eq!(once[0].title, "봄의 창가");
        assert_eq!(once[1].title, "비 오는 날");
    }

    #[test]
    fn test_collect_tags_sorted_unique() {
        let records = vec![
            record("a", &["비", "카페"], None),
            record("b", &["봄", "카페"], None),
        ];
        assert_eq!(collect_tags(&records), vec!["봄", "비", "카페"]);
    }

    fn parse(text: &str) -> Option<NaiveDate> {
        crate::date::parse_date(text)
    }
}
