//! # Console Reporting Module / 控制台报告模块
//!
//! This module renders the aggregate report: a summary table with one line per
//! test in invocation order, followed by the captured output of failed tests.
//!
//! 此模块渲染汇总报告：按调用顺序每个测试一行的摘要表，随后是失败测试的捕获输出。

use colored::*;

use crate::core::models::{Report, TestResult, TestStatus};
use crate::infra::t;

/// Renders the summary table as plain text, one line per result in report order.
/// The output is deterministic apart from the measured durations.
///
/// 将摘要表渲染为纯文本，按报告顺序每个结果一行。
///
/// # Output Format / 输出格式
/// ```text
///   - Passed   | list                                     |      0.01s | exit 0
///   - Failed   | thread                                   |      1.52s | exit 0 (3 memcheck errors)
/// ```
pub fn render(report: &Report, locale: &str) -> String {
    report
        .results()
        .iter()
        .map(|result| format_line(result, &status_cell(result.status, locale), locale))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints the summary banner, the colored table and the overall verdict.
/// Returns the overall status so the caller can turn it into an exit code.
///
/// 打印摘要横幅、彩色表格和总体结论。返回总体状态，以便调用者将其转换为退出码。
pub fn print_summary(report: &Report, locale: &str) -> TestStatus {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());

    if report.is_empty() {
        println!("  {}", t!("report.no_tests_run", locale = locale).dimmed());
    }

    for result in report.results() {
        let status = status_cell(result.status, locale);
        let status = match result.status {
            TestStatus::Passed => status.green(),
            TestStatus::Failed => status.red(),
        };
        println!("{}", format_line(result, &status.to_string(), locale));
    }

    let overall = report.overall();
    let failed = report.failures().count();
    match overall {
        TestStatus::Passed => println!(
            "\n{}",
            t!("report.all_passed", locale = locale, total = report.len())
                .green()
                .bold()
        ),
        TestStatus::Failed => println!(
            "\n{}",
            t!("report.some_failed", locale = locale, failed = failed, total = report.len())
                .red()
                .bold()
        ),
    }
    overall
}

/// Prints the captured output of every failed test.
/// Does nothing when all tests passed.
pub fn print_failure_details(report: &Report, locale: &str) {
    let failures: Vec<&TestResult> = report.failures().collect();
    if failures.is_empty() {
        return;
    }

    println!("\n{}", t!("report.failure_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));

    for (i, result) in failures.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            failures.len(),
            t!("report.failure_header", locale = locale).red(),
            result.title.cyan()
        );
        println!("\n--- {} ---\n", t!("report.test_log", locale = locale).yellow());
        if result.output.trim().is_empty() {
            println!("{}", t!("report.no_output", locale = locale).dimmed());
        } else {
            println!("{}", result.output.trim_end());
        }
        println!("\n{}", "-".repeat(80));
    }
}

fn status_cell(status: TestStatus, locale: &str) -> String {
    format!("{:<8}", status.label(locale))
}

fn format_line(result: &TestResult, status: &str, locale: &str) -> String {
    let duration = format!("{:.2}s", result.duration.as_secs_f64());
    let memcheck = if result.memcheck_errors > 0 {
        format!(
            " ({})",
            t!("report.memcheck_errors", locale = locale, count = result.memcheck_errors)
        )
    } else {
        String::new()
    };
    format!(
        "  - {} | {:<40} | {:>10} | {} {}{}",
        status,
        result.title,
        duration,
        t!("report.exit", locale = locale),
        result.exit_code,
        memcheck
    )
}
