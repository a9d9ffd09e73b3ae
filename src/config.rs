use crate::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 원격 접속 정보 환경 변수（설정 파일보다 우선）
const ENV_REMOTE_URL: &str = "GALLERY_REMOTE_URL";
const ENV_REMOTE_KEY: &str = "GALLERY_REMOTE_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 로컬 갤러리 폴더
    pub images_dir: PathBuf,
    /// 원격 저장소 기본 URL（예: https://xxxx.supabase.co）
    pub remote_url: Option<String>,
    pub remote_key: Option<String>,
    pub bucket: String,
    pub table: String,
    /// 목록 캐시 유효 시간（초）
    pub cache_ttl_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GalleryError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home
            .join(".config")
            .join("photo-gallery")
            .join("config.json"))
    }

    /// 원격 접속 정보. 환경 변수 우선, 없으면 설정 파일.
    /// 둘 다 없으면 원격 작업을 시작하기 전에 치명적 오류로 중단한다.
    pub fn remote_credentials(&self) -> Result<(String, String)> {
        let url = std::env::var(ENV_REMOTE_URL)
            .ok()
            .or_else(|| self.remote_url.clone());
        let key = std::env::var(ENV_REMOTE_KEY)
            .ok()
            .or_else(|| self.remote_key.clone());

        match (url, key) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Ok((url, key)),
            _ => Err(GalleryError::MissingCredentials),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            remote_url: None,
            remote_key: None,
            bucket: "photos".into(),
            table: "photos".into(),
            cache_ttl_seconds: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.images_dir, PathBuf::from("images"));
        assert_eq!(config.bucket, "photos");
        assert_eq!(config.cache_ttl_seconds, 60);
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let config = Config::default();
        // 환경 변수가 없는 전제（테스트 환경 기본값）
        if std::env::var(ENV_REMOTE_URL).is_err() && std::env::var(ENV_REMOTE_KEY).is_err() {
            assert!(matches!(
                config.remote_credentials(),
                Err(GalleryError::MissingCredentials)
            ));
        }
    }

    #[test]
    fn test_config_file_credentials_used() {
        if std::env::var(ENV_REMOTE_URL).is_ok() || std::env::var(ENV_REMOTE_KEY).is_ok() {
            return;
        }
        let config = Config {
            remote_url: Some("https://demo.supabase.co".into()),
            remote_key: Some("secret".into()),
            ..Default::default()
        };
        let (url, key) = config.remote_credentials().unwrap();
        assert_eq!(url, "https://demo.supabase.co");
        assert_eq!(key, "secret");
    }
}
