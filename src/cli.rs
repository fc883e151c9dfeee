//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.
//! mconvert가 모르는 인자는 모두 변환 프로그램으로 그대로 전달됩니다.

use clap::builder::PossibleValuesParser;
use clap::{CommandFactory, Parser};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::extension::all_extensions;
use crate::runner::DEFAULT_PROGRAM;

/// mconvert CLI 인자 구조체
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mconvert",
    author = "YourName <your@email.com>",
    version,
    about = "MEDIA FOLDER BATCH CONVERTER - 폴더 트리의 오디오/비디오 파일을 ffmpeg로 일괄 변환하는 CLI 도구",
    long_about = r#"
MEDIA FOLDER BATCH CONVERTER
============================

입력 폴더를 재귀적으로 탐색하여 오디오/비디오 파일을 찾고,
파일마다 ffmpeg를 한 번씩 실행합니다. 출력 폴더에는 입력 폴더의
하위 구조가 그대로 재현됩니다.

mconvert가 인식하지 못하는 인자는 모두 순서대로 ffmpeg에 전달됩니다.
단, ffmpeg의 -i 는 입력 폴더 지정에 사용되며, -i 앞에 와야 하는
ffmpeg 인자(구간 탐색 등)는 지원하지 않습니다.

예제:
  mconvert -i /path/to/videos -e mp4 -acodec libfdk_aac -vcodec libx264
  mconvert -e mp4 -vcodec libx264 -o /output/video/path
  mconvert -e mp4 -vcodec libx264 --dry-run
  mconvert -e mp3 --regex "^track" -b:a 320k
"#
)]
pub struct Args {
    /// 출력 파일 확장자 (같은 분류의 입력 파일이 변환 대상이 됨)
    #[arg(short, long, value_parser = PossibleValuesParser::new(all_extensions()))]
    pub extension: String,

    /// 변환할 입력 폴더 (기본값: 현재 작업 폴더)
    #[arg(short = 'i', long = "inputdirectory")]
    pub input_directory: Option<PathBuf>,

    /// 출력 폴더 (기본값: 입력 폴더 옆의 "<이름>-converted")
    #[arg(short = 'o', long = "outputdirectory")]
    pub output_directory: Option<PathBuf>,

    /// 실제 변환 없이 실행될 명령만 표시
    #[arg(short, long)]
    pub dry_run: bool,

    /// 입력 파일 이름에 적용할 정규식 (확장자 매칭 대신 사용)
    #[arg(long)]
    pub regex: Option<String>,

    /// 변환 프로그램
    #[arg(long, env = "MCONVERT_FFMPEG", default_value = DEFAULT_PROGRAM)]
    pub ffmpeg: OsString,

    /// 파일별 처리 결과를 JSON Lines로 기록할 파일
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// 상세 출력 모드
    #[arg(long)]
    pub verbose: bool,

    /// 변환 프로그램으로 전달할 인자
    #[arg(skip)]
    pub passthrough: Vec<OsString>,
}

impl Args {
    /// 프로세스 인자를 파싱 (실패 시 사용법을 출력하고 종료)
    ///
    /// UTF-8이 아닌 경로도 받을 수 있도록 `args_os`를 사용합니다.
    pub fn from_env() -> Self {
        match Self::try_from_argv(std::env::args_os()) {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// 인자 목록을 파싱 (첫 번째 항목은 프로그램 이름)
    pub fn try_from_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let (known, passthrough) = split_known_args(argv.into_iter().map(Into::into));
        let mut args = Self::try_parse_from(known)?;
        args.passthrough = passthrough;
        Ok(args)
    }
}

/// mconvert가 아는 플래그 목록
struct KnownFlags {
    /// 값을 받는 플래그
    valued: HashSet<String>,
    /// 값이 없는 스위치
    switches: HashSet<String>,
}

impl KnownFlags {
    fn from_command() -> Self {
        let mut command = Args::command();
        command.build();

        let mut flags = KnownFlags {
            valued: HashSet::new(),
            switches: HashSet::new(),
        };

        for arg in command.get_arguments() {
            let spellings = arg
                .get_short()
                .map(|s| format!("-{}", s))
                .into_iter()
                .chain(arg.get_long().map(|l| format!("--{}", l)));

            let target = if arg.get_action().takes_values() {
                &mut flags.valued
            } else {
                &mut flags.switches
            };
            target.extend(spellings);
        }

        flags
    }

    fn is_valued(&self, token: &OsString) -> bool {
        token.to_str().map(|t| self.valued.contains(t)).unwrap_or(false)
    }

    fn is_switch(&self, token: &OsString) -> bool {
        token.to_str().map(|t| self.switches.contains(t)).unwrap_or(false)
    }

    /// `--name=value` 형태의 알려진 플래그인지 확인
    ///
    /// 값 부분이 UTF-8이 아니면 이름 부분만 바이트로 비교합니다.
    fn is_inline_valued(&self, token: &OsString) -> bool {
        let bytes = token.as_encoded_bytes();
        if !bytes.starts_with(b"--") {
            return false;
        }
        bytes
            .iter()
            .position(|&b| b == b'=')
            .and_then(|eq| std::str::from_utf8(&bytes[..eq]).ok())
            .map(|name| self.valued.contains(name))
            .unwrap_or(false)
    }
}

/// 인자를 mconvert용과 변환 프로그램용으로 분리
///
/// 첫 번째 항목(프로그램 이름)은 항상 mconvert 쪽에 남습니다.
/// `--` 뒤의 인자는 모두 변환 프로그램으로 전달됩니다.
pub fn split_known_args<I>(argv: I) -> (Vec<OsString>, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let flags = KnownFlags::from_command();
    let mut known = Vec::new();
    let mut passthrough = Vec::new();

    let mut tokens = argv.into_iter();
    if let Some(program) = tokens.next() {
        known.push(program);
    }

    while let Some(token) = tokens.next() {
        if token == "--" {
            passthrough.extend(tokens.by_ref());
            break;
        }

        if flags.is_valued(&token) {
            known.push(token);
            if let Some(value) = tokens.next() {
                known.push(value);
            }
        } else if flags.is_switch(&token) || flags.is_inline_valued(&token) {
            known.push(token);
        } else {
            passthrough.push(token);
        }
    }

    (known, passthrough)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<OsString> {
        tokens.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_split_interleaved_arguments() {
        let (known, passthrough) = split_known_args(argv(&[
            "mconvert",
            "-acodec",
            "libfdk_aac",
            "-e",
            "mp4",
            "-vcodec",
            "libx264",
            "-i",
            "/videos",
            "--dry-run",
        ]));

        assert_eq!(known, argv(&["mconvert", "-e", "mp4", "-i", "/videos", "--dry-run"]));
        assert_eq!(passthrough, argv(&["-acodec", "libfdk_aac", "-vcodec", "libx264"]));
    }

    #[test]
    fn test_split_inline_values_and_separator() {
        let (known, passthrough) = split_known_args(argv(&[
            "mconvert",
            "--extension=mp3",
            "--regex=^track",
            "-b:a",
            "320k",
            "--",
            "-d",
            "--verbose",
        ]));

        assert_eq!(known, argv(&["mconvert", "--extension=mp3", "--regex=^track"]));
        assert_eq!(passthrough, argv(&["-b:a", "320k", "-d", "--verbose"]));
    }

    #[test]
    fn test_split_keeps_similar_ffmpeg_flags() {
        let (known, passthrough) =
            split_known_args(argv(&["mconvert", "-e", "mp4", "-vf", "scale=1280:-2", "-v", "error"]));

        assert_eq!(known, argv(&["mconvert", "-e", "mp4"]));
        assert_eq!(passthrough, argv(&["-vf", "scale=1280:-2", "-v", "error"]));
    }

    #[test]
    fn test_try_from_argv() {
        let args = Args::try_from_argv([
            "mconvert",
            "-e",
            "mp4",
            "-o",
            "/out",
            "-crf",
            "23",
            "--log",
            "report.jsonl",
        ])
        .unwrap();

        assert_eq!(args.extension, "mp4");
        assert_eq!(args.output_directory, Some(PathBuf::from("/out")));
        assert_eq!(args.input_directory, None);
        assert_eq!(args.log, Some(PathBuf::from("report.jsonl")));
        assert!(!args.dry_run);
        assert_eq!(args.passthrough, argv(&["-crf", "23"]));
    }

    #[test]
    fn test_extension_required_and_restricted() {
        assert!(Args::try_from_argv(["mconvert", "-vcodec", "libx264"]).is_err());
        assert!(Args::try_from_argv(["mconvert", "-e", "txt"]).is_err());
        assert!(Args::try_from_argv(["mconvert", "-e", "MP4"]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_arguments() {
        use std::os::unix::ffi::OsStringExt;

        let raw_dir = OsString::from_vec(b"/tmp/raw\xff".to_vec());
        let raw_title = OsString::from_vec(b"title=\xfe".to_vec());
        let args = Args::try_from_argv(vec![
            OsString::from("mconvert"),
            OsString::from("-e"),
            OsString::from("mp4"),
            OsString::from("-i"),
            raw_dir.clone(),
            OsString::from("-metadata"),
            raw_title.clone(),
        ])
        .unwrap();

        assert_eq!(args.input_directory, Some(PathBuf::from(raw_dir)));
        assert_eq!(args.passthrough, vec![OsString::from("-metadata"), raw_title]);
    }

    #[cfg(unix)]
    #[test]
    fn test_inline_value_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let inline = OsString::from_vec(b"--inputdirectory=/tmp/raw\xff".to_vec());
        let (known, passthrough) =
            split_known_args(vec![OsString::from("mconvert"), inline.clone()]);

        assert_eq!(known, vec![OsString::from("mconvert"), inline]);
        assert!(passthrough.is_empty());
    }

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }
}
