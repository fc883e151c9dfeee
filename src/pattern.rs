//! 파일 선택 모듈
//!
//! 확장자 분류 또는 정규식을 사용한 변환 대상 파일 선택을 담당합니다.

use regex::Regex;
use std::path::Path;

use crate::error::{MConvertError, Result};
use crate::extension::ExtensionClass;

/// 변환 대상 파일 선택기
#[derive(Debug, Clone)]
pub enum Selector {
    /// 목표 확장자와 같은 분류의 확장자를 가진 파일 선택
    ///
    /// 목표 확장자가 어느 분류에도 없으면 `None`이며 아무 파일도 선택하지 않습니다.
    Extension(Option<ExtensionClass>),
    /// 파일 이름이 정규식과 처음부터 일치하는 파일 선택
    Pattern(Regex),
}

impl Selector {
    /// 새 선택기 생성
    ///
    /// # Arguments
    /// * `extension` - 출력 확장자 (점 없이)
    /// * `pattern` - 정규식 문자열 (있으면 확장자 매칭 대신 사용)
    ///
    /// # Returns
    /// 컴파일된 `Selector` 또는 에러
    ///
    /// # Examples
    /// ```
    /// use mconvert::pattern::Selector;
    /// use std::path::Path;
    ///
    /// let selector = Selector::new("mp4", Some("^clip")).unwrap();
    /// assert!(selector.matches(Path::new("/videos/clip1.mov")));
    /// assert!(!selector.matches(Path::new("/videos/myclip.mov")));
    /// ```
    pub fn new(extension: &str, pattern: Option<&str>) -> Result<Self> {
        match pattern {
            Some(p) => Regex::new(p)
                .map(Selector::Pattern)
                .map_err(|e| MConvertError::InvalidPattern {
                    pattern: p.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(Selector::Extension(ExtensionClass::of(extension))),
        }
    }

    /// 파일이 변환 대상인지 확인
    ///
    /// 정규식 모드에서는 폴더 부분을 제외한 파일 이름만 검사하며,
    /// 일치가 0번 위치에서 시작해야 합니다 (끝은 고정하지 않음).
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Selector::Extension(Some(class)) => ExtensionClass::of_path(path) == Some(*class),
            Selector::Extension(None) => false,
            Selector::Pattern(regex) => {
                let Some(file_name) = path.file_name() else {
                    return false;
                };
                // 가장 왼쪽 일치가 0이 아니면 0에서 시작하는 일치도 없음
                regex
                    .find(&file_name.to_string_lossy())
                    .map(|m| m.start() == 0)
                    .unwrap_or(false)
            }
        }
    }

    /// 정규식 모드인지 확인
    pub fn has_pattern(&self) -> bool {
        matches!(self, Selector::Pattern(_))
    }
}
