//! 폴더 탐색 모듈
//!
//! 입력 폴더를 재귀적으로 탐색하여 변환 대상 파일을 수집합니다.

use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::pattern::Selector;

/// 탐색 결과
#[derive(Debug, Default)]
pub struct Selection {
    /// 선택된 파일 (깊은 경로가 먼저 오도록 탐색 순서의 역순)
    pub matched: Vec<PathBuf>,
    /// 선택되지 않은 일반 파일 수
    pub unmatched: usize,
}

/// 변환 대상 파일 수집
///
/// 탐색 순서는 파일 시스템이 돌려주는 순서를 따르며, 수집이 끝나면
/// 뒤집어서 하위 폴더의 파일이 먼저 처리되게 합니다.
pub fn scan(root: &Path, selector: &Selector) -> Selection {
    let mut selection = Selection::default();

    for entry in WalkDir::new(root).into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("탐색 중 항목 건너뜀: {}", e);
                continue;
            }
        };

        if !entry.path().is_file() {
            continue;
        }

        if selector.matches(entry.path()) {
            selection.matched.push(entry.into_path());
        } else {
            selection.unmatched += 1;
        }
    }

    selection.matched.reverse();
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_scan_by_extension_class() {
        let temp_dir = TempDir::new().unwrap();
        let a = touch(temp_dir.path(), "a/1.avi");
        let b = touch(temp_dir.path(), "a/b/2.mkv");
        touch(temp_dir.path(), "c/3.txt");

        let selector = Selector::new("mp4", None).unwrap();
        let selection = scan(temp_dir.path(), &selector);

        assert_eq!(selection.matched.len(), 2);
        assert!(selection.matched.contains(&a));
        assert!(selection.matched.contains(&b));
        assert_eq!(selection.unmatched, 1);
    }

    #[test]
    fn test_scan_reverses_walk_order() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a/1.avi");
        touch(temp_dir.path(), "a/b/2.mkv");
        touch(temp_dir.path(), "a/b/c/3.mov");

        let selector = Selector::new("mp4", None).unwrap();
        let selection = scan(temp_dir.path(), &selector);

        let mut walked: Vec<PathBuf> = WalkDir::new(temp_dir.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.into_path())
            .collect();
        walked.reverse();
        assert_eq!(selection.matched, walked);
    }

    #[test]
    fn test_scan_with_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let t1 = touch(temp_dir.path(), "track01.wav");
        let t2 = touch(temp_dir.path(), "disc/track02.txt");
        touch(temp_dir.path(), "intro.mp3");
        touch(temp_dir.path(), "track/other.mp3");

        let selector = Selector::new("mp3", Some("^track")).unwrap();
        let selection = scan(temp_dir.path(), &selector);

        assert_eq!(selection.matched.len(), 2);
        assert!(selection.matched.contains(&t1));
        assert!(selection.matched.contains(&t2));
        assert_eq!(selection.unmatched, 2);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let selector = Selector::new("mp4", None).unwrap();
        let selection = scan(temp_dir.path(), &selector);

        assert!(selection.matched.is_empty());
        assert_eq!(selection.unmatched, 0);
    }
}
