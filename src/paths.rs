//! 경로 변환 모듈
//!
//! 입력 파일 경로를 출력 폴더 아래의 경로로 옮기고 확장자를 바꿉니다.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::{MConvertError, Result};

/// 기본 출력 폴더 이름에 붙는 접미사
pub const CONVERTED_SUFFIX: &str = "-converted";

/// 입력 파일에 대응하는 출력 파일 경로 계산
///
/// 입력 루트에 대한 상대 경로를 출력 루트에 붙이고 확장자를 교체합니다.
///
/// # Examples
/// ```
/// use mconvert::paths::output_path_for;
/// use std::path::{Path, PathBuf};
///
/// let out = output_path_for(
///     Path::new("/a/b"),
///     Path::new("/a/b-converted"),
///     Path::new("/a/b/x/y.mov"),
///     "mp4",
/// )
/// .unwrap();
/// assert_eq!(out, PathBuf::from("/a/b-converted/x/y.mp4"));
/// ```
pub fn output_path_for(
    input_root: &Path,
    output_root: &Path,
    input: &Path,
    extension: &str,
) -> Result<PathBuf> {
    let relative = input
        .strip_prefix(input_root)
        .map_err(|_| MConvertError::OutsideInputRoot {
            path: input.to_path_buf(),
            root: input_root.to_path_buf(),
        })?;

    if relative.file_name().is_none() {
        return Err(MConvertError::OutsideInputRoot {
            path: input.to_path_buf(),
            root: input_root.to_path_buf(),
        });
    }

    Ok(output_root.join(relative).with_extension(extension))
}

/// 경로 끝의 구분자와 `.` 구성 요소 제거
pub fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// 기본 출력 폴더 경로 (입력 폴더 옆의 `<이름>-converted`)
///
/// 이름을 알 수 없는 경로(`.`, `..`, `/`)는 `None`을 반환합니다.
pub fn default_output_dir(input_root: &Path) -> Option<PathBuf> {
    let name = input_root.file_name()?;
    let mut converted = OsString::from(name);
    converted.push(CONVERTED_SUFFIX);

    Some(match input_root.parent() {
        Some(parent) => parent.join(converted),
        None => PathBuf::from(converted),
    })
}
