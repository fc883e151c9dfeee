//! mconvert - MEDIA FOLDER BATCH CONVERTER
//!
//! 폴더 트리의 오디오/비디오 파일을 찾아 파일마다 ffmpeg를 실행하는 CLI 도구입니다.
//! 입력 폴더의 하위 구조는 출력 폴더 아래에 그대로 재현됩니다.
//!
//! # 주요 기능
//!
//! - 🎬 **확장자 분류 매칭**: `-e mp4`는 모든 비디오 파일, `-e mp3`는 모든 오디오 파일을 선택
//! - 🔍 **정규식 필터링**: 파일 이름 앞부분에 대한 정규식 매칭 (확장자 매칭 대신)
//! - 🔁 **인자 전달**: 인식하지 못한 인자는 순서대로 ffmpeg에 전달
//! - 🧪 **드라이런 모드**: 폴더 생성과 변환 없이 실행될 명령만 표시
//! - 📝 **결과 기록**: 파일별 처리 결과를 JSON Lines로 저장
//!
//! # 예제
//!
//! ```bash
//! # 비디오 파일을 모두 mp4로 변환
//! mconvert -i ./videos -e mp4 -vcodec libx264
//!
//! # 미리 보기
//! mconvert -i ./videos -e mp4 -vcodec libx264 --dry-run
//!
//! # track으로 시작하는 파일만 mp3로
//! mconvert -e mp3 --regex "^track" -b:a 320k
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extension;
pub mod paths;
pub mod pattern;
pub mod processor;
pub mod runner;
pub mod scanner;
pub mod stats;

// Re-exports for convenient access
pub use cli::Args;
pub use config::Config;
pub use error::{MConvertError, Result};
pub use extension::ExtensionClass;
pub use pattern::Selector;
pub use processor::{run, Failure, Outcome, ProcessResult, Processor, RunReport};
pub use runner::{ConversionCommand, Executor, ProcessExit, SystemExecutor};
pub use scanner::{scan, Selection};
pub use stats::Statistics;
