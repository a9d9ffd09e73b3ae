use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("원격 저장소 접속 정보가 없습니다. GALLERY_REMOTE_URL / GALLERY_REMOTE_KEY 환경 변수 또는 `photo-gallery config` 로 설정해주세요")]
    MissingCredentials,

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("사진을 찾을 수 없습니다: {0}")]
    PhotoNotFound(String),

    #[error("이미지를 읽을 수 없습니다: {0}")]
    ImageLoad(String),

    #[error("이 저장소는 {0} 기능을 지원하지 않습니다")]
    Unsupported(&'static str),

    #[error("원격 API 호출 실패: {0}")]
    ApiCall(String),

    #[error("업로드 롤백 실패: 객체 {identifier} 가 저장소에 남아 있어 수동 삭제가 필요합니다 ({detail})")]
    OrphanedObject { identifier: String, detail: String },

    #[error("HTTP 요청 오류: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON 해석 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("입력 오류: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
