//! 외부 명령 실행 모듈
//!
//! 변환 명령 구성과 파일 시스템/프로세스 호출 추상화를 담당합니다.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// 변환 프로그램 기본값
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// 변환 프로그램에 전달되는 입력 파일 플래그
pub const INPUT_FLAG: &str = "-i";

/// 변환 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ConversionCommand {
    /// `<program> -i <input> <passthrough...> <output>` 순서로 명령 구성
    pub fn new(program: &OsStr, input: &Path, passthrough: &[OsString], output: &Path) -> Self {
        let mut args = Vec::with_capacity(passthrough.len() + 3);
        args.push(OsString::from(INPUT_FLAG));
        args.push(input.as_os_str().to_os_string());
        args.extend(passthrough.iter().cloned());
        args.push(output.as_os_str().to_os_string());

        Self {
            program: program.to_os_string(),
            args,
        }
    }

    /// 사람이 읽기 위한 명령 문자열
    ///
    /// 공백이 들어간 토큰만 큰따옴표로 감쌉니다. 다른 셸 문자는 이스케이프하지 않습니다.
    ///
    /// # Examples
    /// ```
    /// use mconvert::runner::ConversionCommand;
    /// use std::ffi::{OsStr, OsString};
    /// use std::path::Path;
    ///
    /// let cmd = ConversionCommand::new(
    ///     OsStr::new("ffmpeg"),
    ///     Path::new("/in/my clip.avi"),
    ///     &[OsString::from("-vcodec"), OsString::from("libx264")],
    ///     Path::new("/out/my clip.mp4"),
    /// );
    /// assert_eq!(
    ///     cmd.preview(),
    ///     r#"ffmpeg -i "/in/my clip.avi" -vcodec libx264 "/out/my clip.mp4""#
    /// );
    /// ```
    pub fn preview(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|token| quote_whitespace(&token.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote_whitespace(token: &str) -> String {
    if token.chars().any(char::is_whitespace) {
        format!("\"{}\"", token)
    } else {
        token.to_string()
    }
}

/// 변환 프로세스 종료 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    pub success: bool,
    /// 시그널로 종료된 경우 `None`
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }
}

/// 파일 시스템 확인/생성과 변환 프로세스 실행 추상화
pub trait Executor {
    /// 폴더 존재 여부
    fn dir_exists(&self, path: &Path) -> bool;

    /// 중간 폴더까지 생성 (이미 있으면 성공)
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;

    /// 명령을 실행하고 끝날 때까지 대기
    fn run(&mut self, command: &ConversionCommand) -> io::Result<ProcessExit>;
}

/// 실제 파일 시스템과 자식 프로세스를 사용하는 실행기
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn dir_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn run(&mut self, command: &ConversionCommand) -> io::Result<ProcessExit> {
        // stdout은 버리고 stderr는 그대로 둬서 도구 자체 메시지는 보이게 함
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdout(Stdio::null())
            .status()?;

        Ok(ProcessExit {
            success: status.success(),
            code: status.code(),
        })
    }
}
