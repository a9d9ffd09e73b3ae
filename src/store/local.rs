//! 로컬 파일 저장소
//!
//! 고정 폴더를 스캔하고 `metadata.json` 사이드카를 읽어
//! 정규화된 레코드 목록을 만든다. 업로드・삭제는 지원하지 않는다.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use walkdir::WalkDir;

use crate::date::parse_date;
use crate::error::{GalleryError, Result};
use crate::metadata::{normalize, PhotoRecord};
use crate::store::{exif, PhotoStore};

/// 사이드카 파일명（폴더 안, 선택 사항）
const SIDECAR_FILE_NAME: &str = "metadata.json";

/// 지원 확장자（대소문자 무시）
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub struct LocalFileStore {
    folder: PathBuf,
}

impl LocalFileStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// 사이드카를 파일명 → 항목 매핑으로 읽는다.
    /// 파일이 없거나 JSON 이 깨져 있으면 빈 매핑 — 목록을 중단시키지 않는다.
    fn load_sidecar(&self) -> HashMap<String, Value> {
        let path = self.folder.join(SIDECAR_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return HashMap::new(),
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// 폴더 직하의 이미지 파일명을 사전순으로 모은다（재귀 없음）
    fn scan_file_names(&self) -> Result<Vec<String>> {
        if !self.folder.exists() {
            return Err(GalleryError::FolderNotFound(
                self.folder.display().to_string(),
            ));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.folder)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let supported = path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()));
            if !supported {
                continue;
            }
            if let Some(name) = path.file_name() {
                names.push(name.to_string_lossy().to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl PhotoStore for LocalFileStore {
    async fn list(&self) -> Result<Vec<PhotoRecord>> {
        let sidecar = self.load_sidecar();
        let names = self.scan_file_names()?;

        let mut records = Vec::with_capacity(names.len());
        for name in names {
            let mut record = normalize(&name, sidecar.get(&name));
            let path = self.folder.join(&name);
            record.source = path.display().to_string();

            // 사이드카에 날짜가 전혀 없을 때만 EXIF 로 보충
            if record.raw_date.is_none() {
                if let Some(raw) = exif::extract_date(&path) {
                    record.date = parse_date(&raw);
                    record.raw_date = Some(raw);
                }
            }

            records.push(record);
        }
        Ok(records)
    }
}
