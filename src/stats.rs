//! 통계 및 유틸리티 모듈
//!
//! 처리 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

use crate::processor::{Outcome, ProcessResult};

/// 처리 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 선택된 파일 수
    pub total_files: usize,
    /// 선택되지 않은 파일 수
    pub unmatched: usize,
    /// 변환 성공 수
    pub converted: usize,
    /// 드라이런에서 표시한 수
    pub planned: usize,
    /// 건너뛴 수
    pub skipped: usize,
    /// 변환 실패 수
    pub failed: usize,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize, unmatched: usize) -> Self {
        Self {
            total_files,
            unmatched,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 파일 처리 결과 반영
    pub fn record(&mut self, result: &ProcessResult) {
        match result.outcome {
            Outcome::Converted => self.converted += 1,
            Outcome::Planned => self.planned += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 처리 통계 요약 출력 (stderr)
    pub fn print_summary(&self, dry_run: bool) {
        eprintln!("\n{}", "═".repeat(50).bright_blue());
        eprintln!("{}", " 📊 처리 통계".bright_white().bold());
        eprintln!("{}", "═".repeat(50).bright_blue());

        eprintln!("  {} 대상 파일:    {}", "📁".bright_cyan(), self.total_files);
        eprintln!("  {} 제외 파일:    {}", "🚫".bright_white(), self.unmatched);

        if dry_run {
            eprintln!(
                "  {} 예정:         {}",
                "📋".bright_yellow(),
                self.planned.to_string().yellow()
            );
        } else {
            eprintln!(
                "  {} 성공:         {}",
                "✅".bright_green(),
                self.converted.to_string().green()
            );

            if self.failed > 0 {
                eprintln!(
                    "  {} 실패:         {}",
                    "❌".bright_red(),
                    self.failed.to_string().red()
                );
            } else {
                eprintln!("  {} 실패:         {}", "✅".bright_green(), "0".green());
            }
        }

        if self.skipped > 0 {
            eprintln!(
                "  {} 건너뜀:       {}",
                "⚠️".bright_yellow(),
                self.skipped.to_string().yellow()
            );
        }

        eprintln!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        eprintln!("{}", "═".repeat(50).bright_blue());
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}시간 {}분", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}분 {}초", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
