use clap::Parser;
use photo_gallery_rust::{cli, config, date, error, filter, gallery, metadata, store};

use cli::{Cli, Commands};
use config::Config;
use error::{GalleryError, Result};
use filter::FilterCriteria;
use gallery::Gallery;
use metadata::PhotoRecord;
use std::path::PathBuf;
use std::time::Duration;
use store::supabase::{SupabaseStorage, SupabaseTable};
use store::{LocalFileStore, PhotoStore, RemoteStore, UploadRequest};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::List {
            folder,
            remote,
            query,
            tag,
            from,
            to,
        } => {
            println!("✨ 감성 사진 갤러리\n");

            let store = build_store(&config, remote, folder)?;
            let mut gallery = Gallery::new(store, cache_ttl(&config));

            let criteria = FilterCriteria {
                text_query: query.unwrap_or_default(),
                required_tags: tag,
                date_from: parse_bound(from.as_deref()),
                date_to: parse_bound(to.as_deref()),
            };

            let visible = gallery.visible(&criteria).await?;
            println!("총 {}장 표시 중\n", visible.len());
            for record in &visible {
                print_row(record, cli.verbose);
            }

            let tags = filter::collect_tags(&visible);
            if !tags.is_empty() {
                println!("\n태그: {}", tags.join(", "));
            }
        }

        Commands::Show {
            identifier,
            folder,
            remote,
        } => {
            let store = build_store(&config, remote, folder)?;
            let mut gallery = Gallery::new(store, cache_ttl(&config));

            gallery.select(&identifier).await?;
            if let Some(record) = gallery.session.selected() {
                print_detail(record);
            }
        }

        Commands::Upload {
            file,
            title,
            caption,
            tags,
        } => {
            println!("📤 사진 업로드\n");

            let bytes = std::fs::read(&file)
                .map_err(|_| GalleryError::FileNotFound(file.display().to_string()))?;
            if image::guess_format(&bytes).is_err() {
                return Err(GalleryError::ImageLoad(file.display().to_string()));
            }

            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let request = UploadRequest {
                bytes,
                file_name,
                title,
                caption,
                tags: tags
                    .as_deref()
                    .map(|t| t.split(',').map(str::to_string).collect())
                    .unwrap_or_default(),
            };

            let store = build_store(&config, true, None)?;
            let mut gallery = Gallery::new(store, cache_ttl(&config));
            let record = gallery.upload(request).await?;

            println!("✔ 업로드 완료: {}", record.identifier);
            println!("  URL: {}", record.source);
        }

        Commands::Delete { identifier, yes } => {
            println!("🗑 사진 삭제\n");

            let store = build_store(&config, true, None)?;
            let mut gallery = Gallery::new(store, cache_ttl(&config));

            let record = gallery.select(&identifier).await?;
            gallery.session.request_delete();

            let confirmed = yes || confirm_prompt(&record)?;
            if !confirmed {
                gallery.session.cancel();
                println!("취소했습니다");
                return Ok(());
            }

            let report = gallery.confirm_delete().await?;
            if report.complete() {
                println!("✔ 삭제 완료: {}", identifier);
            } else {
                // 부분 실패를 감추지 않는다
                eprintln!("⚠ 삭제가 완전히 끝나지 않았습니다:");
                if let Some(error) = &report.object_error {
                    eprintln!("  - 이미지 바이트: {}", error);
                }
                if let Some(error) = &report.record_error {
                    eprintln!("  - 메타데이터 행: {}", error);
                }
            }
        }

        Commands::Config {
            set_url,
            set_key,
            set_bucket,
            set_table,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_url {
                config.remote_url = Some(url);
                changed = true;
            }
            if let Some(key) = set_key {
                config.remote_key = Some(key);
                changed = true;
            }
            if let Some(bucket) = set_bucket {
                config.bucket = bucket;
                changed = true;
            }
            if let Some(table) = set_table {
                config.table = table;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 설정을 저장했습니다: {}", Config::config_path()?.display());
            }
            if show || !changed {
                println!("images_dir: {}", config.images_dir.display());
                println!("remote_url: {}", config.remote_url.as_deref().unwrap_or("(미설정)"));
                println!(
                    "remote_key: {}",
                    if config.remote_key.is_some() { "(설정됨)" } else { "(미설정)" }
                );
                println!("bucket: {}", config.bucket);
                println!("table: {}", config.table);
                println!("cache_ttl_seconds: {}", config.cache_ttl_seconds);
            }
        }
    }

    Ok(())
}

/// 변종 선택: 원격이면 접속 정보를 먼저 검증한다（없으면 즉시 중단）
fn build_store(
    config: &Config,
    remote: bool,
    folder: Option<PathBuf>,
) -> Result<Box<dyn PhotoStore>> {
    if remote {
        let (url, key) = config.remote_credentials()?;
        let storage = SupabaseStorage::new(&url, &key, &config.bucket);
        let table = SupabaseTable::new(&url, &key, &config.table);
        Ok(Box::new(RemoteStore::new(storage, table)))
    } else {
        let folder = folder.unwrap_or_else(|| config.images_dir.clone());
        Ok(Box::new(LocalFileStore::new(folder)))
    }
}

fn cache_ttl(config: &Config) -> Duration {
    Duration::from_secs(config.cache_ttl_seconds)
}

/// 날짜 경계 해석. 해석 불가는 경고 후 무시（날짜 조건 없음으로 취급）
fn parse_bound(text: Option<&str>) -> Option<chrono::NaiveDate> {
    let text = text?;
    let parsed = date::parse_date(text);
    if parsed.is_none() {
        eprintln!("⚠ 날짜 형식을 해석할 수 없어 무시합니다: {}", text);
    }
    parsed
}

fn confirm_prompt(record: &PhotoRecord) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(format!("'{}' 을(를) 정말 삭제할까요?", record.title))
        .default(false)
        .interact()
        .map_err(|e| GalleryError::Prompt(e.to_string()))
}

fn print_row(record: &PhotoRecord, verbose: bool) {
    let date = record
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "----------".to_string());
    let tags = if record.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", record.tags.join(", "))
    };
    println!("{}  {}{}", date, record.title, tags);
    if verbose {
        println!("    {} ({})", record.identifier, record.source);
    }
}

fn print_detail(record: &PhotoRecord) {
    println!("📷 {}", record.title);
    if !record.caption.is_empty() {
        println!("{}", record.caption);
    }
    if let Some(date) = record.date {
        println!("촬영/등록일: {}", date);
    } else if let Some(raw) = &record.raw_date {
        println!("날짜(해석 불가): {}", raw);
    }
    if !record.tags.is_empty() {
        println!("태그: {}", record.tags.join(", "));
    }
    println!("위치: {}", record.source);
}
