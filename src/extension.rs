//! 확장자 분류 모듈
//!
//! 오디오/비디오 확장자 목록과 분류 로직을 담당합니다.

use std::fmt;
use std::path::Path;

/// 비디오 확장자 목록
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "flv", "wmv", "m4v", "webm"];

/// 오디오 확장자 목록 (ogg는 보통 오디오로 취급)
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "m4a", "opus", "ape", "wav", "aac", "ogg", "oga", "aiff", "flac", "alac",
];

/// 확장자 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionClass {
    Video,
    Audio,
}

impl ExtensionClass {
    /// 확장자의 분류 반환 (대소문자 구분, 점 없이)
    ///
    /// # Examples
    /// ```
    /// use mconvert::extension::ExtensionClass;
    ///
    /// assert_eq!(ExtensionClass::of("mkv"), Some(ExtensionClass::Video));
    /// assert_eq!(ExtensionClass::of("flac"), Some(ExtensionClass::Audio));
    /// assert_eq!(ExtensionClass::of("MKV"), None);
    /// ```
    pub fn of(extension: &str) -> Option<Self> {
        if VIDEO_EXTENSIONS.contains(&extension) {
            Some(ExtensionClass::Video)
        } else if AUDIO_EXTENSIONS.contains(&extension) {
            Some(ExtensionClass::Audio)
        } else {
            None
        }
    }

    /// 파일 경로의 확장자로 분류
    pub fn of_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::of)
    }
}

impl fmt::Display for ExtensionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionClass::Video => write!(f, "비디오"),
            ExtensionClass::Audio => write!(f, "오디오"),
        }
    }
}

/// 인식 가능한 모든 확장자 (비디오 먼저)
pub fn all_extensions() -> impl Iterator<Item = &'static str> {
    VIDEO_EXTENSIONS
        .iter()
        .chain(AUDIO_EXTENSIONS.iter())
        .copied()
}
