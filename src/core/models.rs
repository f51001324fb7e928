//! # Data Models Module / 数据模型模块
//!
//! This module defines the data that flows through a run: the execution policy
//! shared by all tests, the resolved test cases, the per-test results and the
//! aggregate report.
//!
//! 此模块定义了运行过程中流转的数据：所有测试共享的执行策略、
//! 已解析的测试用例、单个测试结果以及汇总报告。

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::TestDefinition;
use crate::infra::t;

/// Report file used by the memory-check tool when none is given.
pub const DEFAULT_REPORT_PATH: &str = "vg.xml";

/// Selects whether, and how, a test is wrapped by the memory-check tool.
/// 选择是否以及如何使用内存检查工具包装测试。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Run the command bare.
    #[default]
    None,
    /// Full leak and memory-error detection (valgrind memcheck).
    Full,
    /// Thread-race detection (valgrind helgrind).
    Thread,
}

impl CheckMode {
    /// Resolves the two command-line switches into one mode.
    /// Full checking takes precedence when both are requested.
    pub fn from_flags(full: bool, thread: bool) -> Self {
        match (full, thread) {
            (true, _) => CheckMode::Full,
            (false, true) => CheckMode::Thread,
            (false, false) => CheckMode::None,
        }
    }

    pub fn is_enabled(self) -> bool {
        self != CheckMode::None
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckMode::None => f.write_str("none"),
            CheckMode::Full => f.write_str("memcheck"),
            CheckMode::Thread => f.write_str("helgrind"),
        }
    }
}

/// Execution policy shared by every test case of a run.
/// 一次运行中所有测试用例共享的执行策略。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPolicy {
    pub check_mode: CheckMode,
    /// Where the memory-check tool writes its XML report. The same path is
    /// reused by every test, so reports must be consumed one at a time.
    /// 内存检查工具写入 XML 报告的位置。所有测试复用同一路径，因此报告必须逐个处理。
    pub report_path: PathBuf,
}

impl ExecutionPolicy {
    pub fn new(check_mode: CheckMode, report_path: impl Into<PathBuf>) -> Self {
        Self {
            check_mode,
            report_path: report_path.into(),
        }
    }
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self::new(CheckMode::None, DEFAULT_REPORT_PATH)
    }
}

/// A test definition bound to the execution policy of the current run.
/// 绑定到当前运行执行策略的测试定义。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub definition: TestDefinition,
    pub policy: ExecutionPolicy,
}

impl TestCase {
    pub fn new(definition: TestDefinition, policy: ExecutionPolicy) -> Self {
        Self { definition, policy }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Final status of a single test, or of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Passed,
    Failed,
}

impl TestStatus {
    pub fn is_passed(self) -> bool {
        self == TestStatus::Passed
    }

    /// Gets the localized label of the status for display.
    /// 获取状态的本地化标签以供显示。
    pub fn label(self, locale: &str) -> String {
        match self {
            TestStatus::Passed => t!("report.status_passed", locale = locale).to_string(),
            TestStatus::Failed => t!("report.status_failed", locale = locale).to_string(),
        }
    }
}

/// The outcome of running one test case.
/// 运行单个测试用例的结果。
#[derive(Debug, Clone)]
pub struct TestResult {
    /// The test name / 测试名称
    pub title: String,
    /// Exit code of the launched process. Signals map to `128 + signal`,
    /// a process that could not be launched reports `127`.
    /// 已启动进程的退出码。信号映射为 `128 + 信号`，无法启动的进程报告 `127`。
    pub exit_code: i32,
    /// `false` if the memory-check report contained error records.
    /// Always `true` when no check mode was active.
    pub memory_check_ok: bool,
    /// Number of error records found in the memory-check report.
    pub memcheck_errors: usize,
    pub status: TestStatus,
    pub duration: Duration,
    /// Combined stdout and stderr of the process / 进程的 stdout 与 stderr 合并输出
    pub output: String,
}

impl TestResult {
    /// Builds a result, deriving `status` from the exit code and the memory check.
    pub fn new(
        title: impl Into<String>,
        exit_code: i32,
        memory_check_ok: bool,
        duration: Duration,
        output: String,
    ) -> Self {
        let status = if exit_code == 0 && memory_check_ok {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        };
        Self {
            title: title.into(),
            exit_code,
            memory_check_ok,
            memcheck_errors: 0,
            status,
            duration,
            output,
        }
    }

    pub fn with_memcheck_errors(mut self, count: usize) -> Self {
        self.memcheck_errors = count;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.status == TestStatus::Failed
    }
}

/// The ordered results of one run.
/// 一次运行的有序结果。
#[derive(Debug, Clone, Default)]
pub struct Report {
    results: Vec<TestResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Results in invocation order.
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// `Passed` only if at least one test ran and every test passed.
    /// An empty report has verified nothing and counts as `Failed`.
    pub fn overall(&self) -> TestStatus {
        if !self.results.is_empty() && self.results.iter().all(|r| r.status.is_passed()) {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        }
    }
}
