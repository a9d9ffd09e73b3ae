use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-gallery")]
#[command(about = "감성 사진 갤러리 - 로컬/원격 사진 목록・업로드・삭제 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 사진 목록을 필터해서 표시
    List {
        /// 로컬 갤러리 폴더（기본: 설정의 images_dir）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// 원격 저장소 사용
        #[arg(short, long)]
        remote: bool,

        /// 검색어（제목・캡션 부분 일치）
        #[arg(short, long)]
        query: Option<String>,

        /// 필수 태그（여러 번 지정 가능, AND 조건）
        #[arg(short, long)]
        tag: Vec<String>,

        /// 시작 날짜（예: 2025-04-01）
        #[arg(long)]
        from: Option<String>,

        /// 끝 날짜
        #[arg(long)]
        to: Option<String>,
    },

    /// 사진 한 장의 상세 정보 표시
    Show {
        /// 사진 식별자（파일명）
        #[arg(required = true)]
        identifier: String,

        #[arg(short, long)]
        folder: Option<PathBuf>,

        #[arg(short, long)]
        remote: bool,
    },

    /// 원격 저장소에 사진 업로드
    Upload {
        /// 업로드할 이미지 파일
        #[arg(required = true)]
        file: PathBuf,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        caption: Option<String>,

        /// 쉼표 구분 태그（예: "봄,카페"）
        #[arg(long)]
        tags: Option<String>,
    },

    /// 원격 저장소에서 사진 삭제（확인 후）
    Delete {
        /// 사진 식별자
        #[arg(required = true)]
        identifier: String,

        /// 확인 프롬프트 생략
        #[arg(short, long)]
        yes: bool,
    },

    /// 설정 확인・변경
    Config {
        /// 원격 저장소 URL 설정
        #[arg(long)]
        set_url: Option<String>,

        /// 원격 저장소 API 키 설정
        #[arg(long)]
        set_key: Option<String>,

        /// 객체 저장소 버킷 설정
        #[arg(long)]
        set_bucket: Option<String>,

        /// 레코드 테이블 이름 설정
        #[arg(long)]
        set_table: Option<String>,

        /// 현재 설정 표시
        #[arg(long)]
        show: bool,
    },
}
