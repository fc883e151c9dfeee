//! 에러 타입 정의 모듈
//!
//! mconvert에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// mconvert에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum MConvertError {
    /// 입력 폴더가 존재하지 않음
    #[error("입력 폴더를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력이 폴더가 아님
    #[error("입력 경로가 폴더가 아닙니다: {path}")]
    NotADirectory { path: PathBuf },

    /// 현재 작업 폴더를 확인할 수 없음
    #[error("현재 작업 폴더를 확인할 수 없습니다: {reason}")]
    CurrentDirUnavailable { reason: String },

    /// 유효하지 않은 정규식
    #[error("유효하지 않은 정규식 ({pattern}): {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// 입력 루트 밖의 파일
    #[error("입력 폴더 밖의 파일입니다 ({root}): {path}")]
    OutsideInputRoot { path: PathBuf, root: PathBuf },
}

/// mconvert 결과 타입 별칭
pub type Result<T> = std::result::Result<T, MConvertError>;
