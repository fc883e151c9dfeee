//! 파일 변환 처리 모듈
//!
//! 선택된 파일마다 출력 폴더를 준비하고 변환 명령을 실행하거나 미리 보여줍니다.

use log::{debug, info, warn};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::paths::output_path_for;
use crate::runner::{ConversionCommand, Executor};
use crate::scanner::{scan, Selection};

/// 파일 처리 결과
///
/// 경로는 JSON 문자열로 기록되며 UTF-8이 아닌 바이트는 U+FFFD로 바뀝니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    /// 입력 파일 경로
    #[serde(serialize_with = "serialize_path_lossy")]
    pub input: PathBuf,
    /// 출력 파일 경로 (계산할 수 없으면 없음)
    #[serde(serialize_with = "serialize_opt_path_lossy")]
    pub output: Option<PathBuf>,
    /// 처리 결과
    #[serde(flatten)]
    pub outcome: Outcome,
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

fn serialize_opt_path_lossy<S: Serializer>(
    path: &Option<PathBuf>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match path {
        Some(path) => serialize_path_lossy(path, serializer),
        None => serializer.serialize_none(),
    }
}

/// 파일별 처리 결과 종류
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// 변환 프로그램이 성공적으로 종료됨
    Converted,
    /// 드라이런에서 명령을 표시함
    Planned,
    /// 출력 경로를 계산할 수 없어 건너뜀
    Skipped { reason: String },
    /// 변환 실패
    Failed { failure: Failure },
}

/// 변환 실패 원인
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// 출력 폴더 생성 실패
    CreateDir { reason: String },
    /// 프로세스 실행 실패 (프로그램 없음 등)
    Spawn { reason: String },
    /// 0이 아닌 종료 코드 (시그널 종료 시 코드 없음)
    Exit { code: Option<i32> },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::CreateDir { reason } => write!(f, "출력 폴더 생성 실패: {}", reason),
            Failure::Spawn { reason } => write!(f, "변환 프로그램 실행 실패: {}", reason),
            Failure::Exit { code: Some(code) } => write!(f, "종료 코드 {}", code),
            Failure::Exit { code: None } => write!(f, "시그널로 종료됨"),
        }
    }
}

impl ProcessResult {
    /// 변환 성공 결과 생성
    pub fn converted(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output: Some(output),
            outcome: Outcome::Converted,
        }
    }

    /// 드라이런 결과 생성
    pub fn planned(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output: Some(output),
            outcome: Outcome::Planned,
        }
    }

    /// 건너뜀 결과 생성
    pub fn skipped(input: PathBuf, reason: String) -> Self {
        Self {
            input,
            output: None,
            outcome: Outcome::Skipped { reason },
        }
    }

    /// 실패 결과 생성
    pub fn failed(input: PathBuf, output: PathBuf, failure: Failure) -> Self {
        Self {
            input,
            output: Some(output),
            outcome: Outcome::Failed { failure },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

/// 한 번의 실행 결과
#[derive(Debug, Default)]
pub struct RunReport {
    /// 선택되지 않은 일반 파일 수
    pub unmatched: usize,
    /// 처리 순서대로의 파일별 결과
    pub results: Vec<ProcessResult>,
}

/// 선택된 파일을 순서대로 처리하는 처리기
///
/// 드라이런 출력은 `out`에 기록됩니다. 이미 확인하거나 만든 출력 폴더는
/// 기억해 두므로 폴더 생성은 폴더마다 최대 한 번입니다.
pub struct Processor<'a, E: Executor, W: Write> {
    config: &'a Config,
    executor: &'a mut E,
    out: W,
    ready_dirs: HashSet<PathBuf>,
}

impl<'a, E: Executor, W: Write> Processor<'a, E, W> {
    pub fn new(config: &'a Config, executor: &'a mut E, out: W) -> Self {
        Self {
            config,
            executor,
            out,
            ready_dirs: HashSet::new(),
        }
    }

    /// 모든 파일 처리
    ///
    /// 파일별 실패는 결과에 기록되고 다음 파일로 넘어갑니다.
    /// 에러는 드라이런 출력 쓰기에 실패한 경우에만 반환됩니다.
    pub fn process_all(&mut self, files: &[PathBuf]) -> io::Result<Vec<ProcessResult>> {
        let mut results = Vec::with_capacity(files.len());
        for path in files {
            results.push(self.process_file(path)?);
        }
        self.out.flush()?;
        Ok(results)
    }

    /// 단일 파일 처리
    pub fn process_file(&mut self, input: &Path) -> io::Result<ProcessResult> {
        let config = self.config;
        let output = match output_path_for(
            &config.input_dir,
            &config.output_dir,
            input,
            &config.extension,
        ) {
            Ok(output) => output,
            Err(e) => {
                warn!("{}", e);
                return Ok(ProcessResult::skipped(input.to_path_buf(), e.to_string()));
            }
        };

        if let Some(parent) = output.parent() {
            if let Err(e) = self.ensure_dir(parent)? {
                warn!("출력 폴더 생성 실패 ({}): {}", parent.display(), e);
                return Ok(ProcessResult::failed(
                    input.to_path_buf(),
                    output,
                    Failure::CreateDir {
                        reason: e.to_string(),
                    },
                ));
            }
        }

        let command =
            ConversionCommand::new(&config.program, input, &config.passthrough, &output);

        if config.dry_run {
            writeln!(self.out, "{}", command.preview())?;
            return Ok(ProcessResult::planned(input.to_path_buf(), output));
        }

        debug!("실행: {}", command.preview());
        let result = match self.executor.run(&command) {
            Ok(exit) if exit.success => {
                info!("변환 완료: {}", output.display());
                ProcessResult::converted(input.to_path_buf(), output)
            }
            Ok(exit) => ProcessResult::failed(
                input.to_path_buf(),
                output,
                Failure::Exit { code: exit.code },
            ),
            Err(e) => ProcessResult::failed(
                input.to_path_buf(),
                output,
                Failure::Spawn {
                    reason: e.to_string(),
                },
            ),
        };

        if let Outcome::Failed { ref failure } = result.outcome {
            warn!("변환 실패 ({}): {}", input.display(), failure);
        }

        Ok(result)
    }

    /// 출력 폴더 준비
    ///
    /// 바깥 `io::Result`는 드라이런 출력 쓰기 실패, 안쪽은 폴더 생성 실패입니다.
    ///
    /// 드라이런은 기억한 폴더만 건너뛰므로, 실제 실행이었다면 앞선
    /// `create_dir_all`이 이미 만들었을 상위 폴더도 `mkdir -p`로 다시 표시될 수 있습니다.
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<io::Result<()>> {
        if self.ready_dirs.contains(dir) {
            return Ok(Ok(()));
        }

        if !self.executor.dir_exists(dir) {
            if self.config.dry_run {
                writeln!(self.out, "mkdir -p {}", dir.display())?;
            } else {
                debug!("폴더 생성: {}", dir.display());
                if let Err(e) = self.executor.create_dir_all(dir) {
                    return Ok(Err(e));
                }
            }
        }

        self.ready_dirs.insert(dir.to_path_buf());
        Ok(Ok(()))
    }
}

/// 탐색부터 변환까지 한 번에 실행
pub fn run<E: Executor, W: Write>(
    config: &Config,
    executor: &mut E,
    out: W,
) -> io::Result<RunReport> {
    let Selection { matched, unmatched } = scan(&config.input_dir, &config.selector);
    debug!(
        "선택된 파일 {}개, 제외된 파일 {}개",
        matched.len(),
        unmatched
    );

    let results = Processor::new(config, executor, out).process_all(&matched)?;

    Ok(RunReport { unmatched, results })
}
