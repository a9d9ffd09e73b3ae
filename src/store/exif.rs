//! EXIF 촬영 날짜 추출（사이드카에 날짜가 없을 때의 보조 수단）

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// `DateTimeOriginal`, 없으면 `DateTime` 을 문자열로 돌려준다.
/// EXIF 가 없거나 읽을 수 없는 파일은 `None` — 항목 단위로 조용히 넘어간다.
pub(crate) fn extract_date(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    [exif::Tag::DateTimeOriginal, exif::Tag::DateTime]
        .iter()
        .find_map(|&tag| {
            exif.get_field(tag, exif::In::PRIMARY)
                .map(|field| field.display_value().to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extract_date_non_image_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.jpg");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"plain text").unwrap();

        assert!(extract_date(&path).is_none());
    }

    #[test]
    fn test_extract_date_missing_file_is_none() {
        assert!(extract_date(Path::new("/nonexistent/photo.jpg")).is_none());
    }
}
