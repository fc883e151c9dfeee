//! 실행 설정 모듈
//!
//! CLI 인자의 기본값을 채우고 검증하여 실행 동안 바뀌지 않는 설정을 만듭니다.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::error::{MConvertError, Result};
use crate::extension::ExtensionClass;
use crate::paths::{default_output_dir, normalize, CONVERTED_SUFFIX};
use crate::pattern::Selector;
use crate::runner::DEFAULT_PROGRAM;

/// 확정된 실행 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 입력 루트 폴더
    pub input_dir: PathBuf,
    /// 출력 루트 폴더
    pub output_dir: PathBuf,
    /// 출력 파일 확장자
    pub extension: String,
    /// 변환 대상 선택기
    pub selector: Selector,
    /// 드라이런 여부
    pub dry_run: bool,
    /// 변환 프로그램으로 전달할 인자
    pub passthrough: Vec<OsString>,
    /// 변환 프로그램
    pub program: OsString,
    /// 처리 결과 기록 파일
    pub log: Option<PathBuf>,
    /// 상세 출력 여부
    pub verbose: bool,
}

impl Config {
    /// CLI 인자로부터 설정 생성
    ///
    /// 입력 폴더가 없으면 현재 작업 폴더를 사용합니다.
    pub fn from_args(args: Args) -> Result<Self> {
        let input_dir = match args.input_directory {
            Some(dir) => normalize(&dir),
            None => std::env::current_dir().map_err(|e| MConvertError::CurrentDirUnavailable {
                reason: e.to_string(),
            })?,
        };

        validate_input_dir(&input_dir)?;

        let output_dir = match args.output_directory {
            Some(dir) => normalize(&dir),
            None => resolve_default_output(&input_dir),
        };

        let selector = Selector::new(&args.extension, args.regex.as_deref())?;

        Ok(Self {
            input_dir,
            output_dir,
            extension: args.extension,
            selector,
            dry_run: args.dry_run,
            passthrough: args.passthrough,
            program: args.ffmpeg,
            log: args.log,
            verbose: args.verbose,
        })
    }

    /// CLI를 거치지 않는 설정 생성 (라이브러리 사용용)
    ///
    /// 입력 폴더 검증과 정규식 컴파일은 `from_args`와 같습니다.
    pub fn builder(input_dir: impl AsRef<Path>, extension: &str) -> ConfigBuilder {
        ConfigBuilder {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: None,
            extension: extension.to_string(),
            regex: None,
            dry_run: false,
            passthrough: Vec::new(),
            program: OsString::from(DEFAULT_PROGRAM),
        }
    }

    /// 출력 확장자의 분류
    pub fn extension_class(&self) -> Option<ExtensionClass> {
        ExtensionClass::of(&self.extension)
    }
}

/// `Config` 빌더
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    input_dir: PathBuf,
    output_dir: Option<PathBuf>,
    extension: String,
    regex: Option<String>,
    dry_run: bool,
    passthrough: Vec<OsString>,
    program: OsString,
}

impl ConfigBuilder {
    /// 출력 폴더 설정
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// 정규식 설정
    pub fn with_regex(mut self, pattern: &str) -> Self {
        self.regex = Some(pattern.to_string());
        self
    }

    /// 드라이런 설정
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 전달 인자 설정
    pub fn with_passthrough<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.passthrough = args.into_iter().map(Into::into).collect();
        self
    }

    /// 변환 프로그램 설정
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// 검증 후 설정 생성
    pub fn build(self) -> Result<Config> {
        let args = Args {
            extension: self.extension,
            input_directory: Some(self.input_dir),
            output_directory: self.output_dir,
            dry_run: self.dry_run,
            regex: self.regex,
            ffmpeg: self.program,
            log: None,
            verbose: false,
            passthrough: self.passthrough,
        };
        Config::from_args(args)
    }
}

/// 입력 경로 유효성 검사
fn validate_input_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(MConvertError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_dir() {
        return Err(MConvertError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// 기본 출력 폴더 결정
///
/// `.` 처럼 이름이 없는 입력은 실제 경로로 바꿔서 이름을 얻습니다.
fn resolve_default_output(input_dir: &Path) -> PathBuf {
    default_output_dir(input_dir)
        .or_else(|| {
            fs::canonicalize(input_dir)
                .ok()
                .and_then(|p| default_output_dir(&p))
        })
        .unwrap_or_else(|| input_dir.join(CONVERTED_SUFFIX))
}
