//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module runs a single test case to completion: it builds the command
//! line, optionally wrapped by the memory-check tool, hands it to the host
//! shell, waits for the process and turns the exit code and the memory-check
//! report into a [`TestResult`].
//!
//! 此模块将单个测试用例运行至结束：构建命令行（可选地由内存检查工具包装），
//! 交给宿主 shell 执行并等待进程结束，然后将退出码和内存检查报告转换为 [`TestResult`]。

use anyhow::{anyhow, Context};
use colored::*;
use std::time::Instant;

use crate::{
    core::{
        error::{Error, Result},
        memcheck::MemoryCheckAdapter,
        models::{TestCase, TestResult},
    },
    infra::{command, fs, t},
};

/// Runs test cases one at a time.
/// 逐个运行测试用例。
#[derive(Debug, Clone)]
pub struct Executor {
    memcheck: MemoryCheckAdapter,
    /// Language of the progress messages.
    locale: String,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(MemoryCheckAdapter::default())
    }
}

impl Executor {
    pub fn new(memcheck: MemoryCheckAdapter) -> Self {
        Self {
            memcheck,
            locale: "en".to_string(),
        }
    }

    /// Sets the language used for progress and failure messages.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn memcheck(&self) -> &MemoryCheckAdapter {
        &self.memcheck
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Builds the shell line `[memcheck prefix] command args`.
    ///
    /// `command args` is passed through unmodified; the prefix words are quoted
    /// so that paths with spaces survive the shell.
    pub fn command_line(&self, case: &TestCase) -> anyhow::Result<String> {
        let line = case.definition.command_line();
        if line.is_empty() {
            return Err(anyhow!("Empty command for test '{}'", case.name()));
        }

        let mut words = Vec::new();
        for word in self
            .memcheck
            .prefix(case.policy.check_mode, &case.policy.report_path)
        {
            let quoted = shlex::try_quote(&word)
                .with_context(|| format!("Failed to quote memory-check argument: {word}"))?;
            words.push(quoted.into_owned());
        }
        words.push(line);
        Ok(words.join(" "))
    }

    /// Runs `case` and blocks until its process has exited.
    ///
    /// A nonzero exit code or a dirty memory-check report yields a `Failed` result.
    /// An unreadable memory-check report is returned as an error, since the verdict
    /// of this test cannot be known.
    pub async fn run(&self, case: &TestCase) -> Result<TestResult> {
        let locale = self.locale.as_str();
        let policy = &case.policy;
        let checked = policy.check_mode.is_enabled();

        println!(
            "{}",
            t!("run.running_test", locale = locale, name = case.name()).blue()
        );

        if checked {
            let removed = fs::remove_stale_report(&policy.report_path).map_err(|source| {
                Error::StaleReport {
                    path: policy.report_path.clone(),
                    source,
                }
            })?;
            if removed {
                tracing::debug!(path = %policy.report_path.display(), "removed stale report");
            }
        }

        let start_time = Instant::now();
        let (exit_code, mut output, launched) = match self.command_line(case) {
            Ok(line) => {
                tracing::debug!(test = case.name(), command = %line, "launching");
                let mut cmd = command::shell_command(&line);
                cmd.kill_on_drop(true);

                let (status_res, output) = command::spawn_and_tee(cmd).await;
                match status_res {
                    Ok(status) => (command::exit_code(&status), output, true),
                    Err(e) => {
                        let message = t!(
                            "run.launch_failed",
                            locale = locale,
                            program = &case.definition.command,
                            error = e
                        );
                        eprintln!("{}", message.red());
                        (
                            command::LAUNCH_FAILURE_EXIT_CODE,
                            format!("{output}{message}\n"),
                            true,
                        )
                    }
                }
            }
            Err(e) => {
                let message = format!("{e:#}");
                eprintln!("{}", message.red());
                (command::LAUNCH_FAILURE_EXIT_CODE, format!("{message}\n"), false)
            }
        };
        let duration = start_time.elapsed();

        // Nothing ran when the command line could not be built, so there is no report to read.
        let (memory_check_ok, memcheck_errors) = if checked && launched {
            let report = self.memcheck.inspect(&policy.report_path)?;
            tracing::debug!(
                test = case.name(),
                errors = report.error_count,
                "evaluated {} report",
                policy.check_mode
            );
            if !report.is_clean() {
                let message = t!(
                    "run.memcheck_errors",
                    locale = locale,
                    count = report.error_count,
                    kinds = report.kinds.join(", ")
                );
                println!("{}", message.red());
                output.push_str(&message);
                output.push('\n');
            }
            (report.is_clean(), report.error_count)
        } else {
            (true, 0)
        };

        let result = TestResult::new(case.name(), exit_code, memory_check_ok, duration, output)
            .with_memcheck_errors(memcheck_errors);

        let secs = format!("{:.2}", duration.as_secs_f64());
        if result.is_failure() {
            println!(
                "{}",
                t!(
                    "run.test_failed",
                    locale = locale,
                    name = case.name(),
                    code = exit_code,
                    duration = secs
                )
                .red()
            );
        } else {
            println!(
                "{}",
                t!(
                    "run.test_passed",
                    locale = locale,
                    name = case.name(),
                    duration = secs
                )
                .green()
            );
        }

        Ok(result)
    }
}
