//! mconvert - MEDIA FOLDER BATCH CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use colored::Colorize;
use log::warn;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use mconvert::{
    cli::Args,
    config::Config,
    processor::{run, Outcome, ProcessResult},
    runner::SystemExecutor,
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::from_env();

    init_logging(args.verbose);

    let config = Config::from_args(args)?;

    // 결과 기록 파일은 변환 전에 열어서 경로 문제를 먼저 확인
    let log_file = match config.log {
        Some(ref path) => Some(
            File::create(path)
                .with_context(|| format!("결과 기록 파일을 만들 수 없습니다: {:?}", path))?,
        ),
        None => None,
    };

    // 헤더 출력
    print_header(&config);

    // 탐색과 변환
    let mut executor = SystemExecutor;
    let stdout = io::stdout();
    let report = run(&config, &mut executor, stdout.lock()).context("명령 출력 실패")?;

    if report.results.is_empty() {
        eprintln!("{}", "⚠️ 변환할 파일이 없습니다.".yellow());
    } else {
        eprintln!(
            "  {} 처리한 파일 수: {}",
            "📋".bright_white(),
            report.results.len().to_string().bright_green()
        );
    }

    let mut stats = Statistics::new(report.results.len(), report.unmatched);
    for result in &report.results {
        stats.record(result);
        if config.verbose && !config.dry_run {
            print_result(result);
        }
    }

    // 결과 기록 (실패해도 요약은 출력)
    if let (Some(file), Some(path)) = (log_file, config.log.as_deref()) {
        match write_result_log(file, &report.results) {
            Ok(()) => eprintln!("\n{} 결과 기록 저장: {:?}", "📝".bright_cyan(), path),
            Err(e) => warn!("결과 기록 실패 ({:?}): {:#}", path, e),
        }
    }

    // 통계 출력
    stats.print_summary(config.dry_run);

    Ok(())
}

/// 로거 초기화 (RUST_LOG가 있으면 우선)
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "mconvert=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// 헤더 출력
fn print_header(config: &Config) {
    eprintln!("\n{}", "═".repeat(50).bright_blue());
    eprintln!(
        "{}",
        " 🎬 MEDIA FOLDER BATCH CONVERTER".bright_white().bold()
    );
    eprintln!("{}", "═".repeat(50).bright_blue());
    eprintln!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), config.input_dir);
    eprintln!("  {} 출력 폴더: {:?}", "📄".bright_green(), config.output_dir);
    eprintln!("  {} 확장자: {}", "⚙️".bright_yellow(), config.extension);

    if let Some(class) = config.extension_class() {
        if !config.selector.has_pattern() {
            eprintln!("  {} 선택 기준: {} 파일", "🎯".bright_cyan(), class);
        }
    }

    if let mconvert::Selector::Pattern(ref regex) = config.selector {
        eprintln!("  {} 정규식 필터: {}", "🔍".bright_magenta(), regex.as_str());
    }

    if !config.passthrough.is_empty() {
        eprintln!(
            "  {} 전달 인자: {}",
            "➡️".bright_white(),
            config
                .passthrough
                .iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    if config.dry_run {
        eprintln!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    eprintln!("{}", "═".repeat(50).bright_blue());
}

/// 파일별 결과 출력
fn print_result(result: &ProcessResult) {
    let name = result.input.file_name().unwrap_or_default();
    match &result.outcome {
        Outcome::Converted | Outcome::Planned => {
            eprintln!("  {} {:?}", "✓".green(), name);
        }
        Outcome::Skipped { reason } => {
            eprintln!("  {} {:?}", "-".yellow(), name);
            eprintln!("    {}", reason.dimmed());
        }
        Outcome::Failed { failure } => {
            eprintln!("  {} {:?}", "•".red(), name);
            eprintln!("    {}", failure.to_string().dimmed());
        }
    }
}

/// 결과 기록 파일 작성 (한 줄에 파일 하나)
fn write_result_log(file: File, results: &[ProcessResult]) -> Result<()> {
    let mut writer = BufWriter::new(file);

    for result in results {
        serde_json::to_writer(&mut writer, result)
            .with_context(|| format!("결과 직렬화 실패: {:?}", result.input))?;
        writeln!(writer)?;
    }
    writer.flush()?;

    Ok(())
}
