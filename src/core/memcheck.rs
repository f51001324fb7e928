//! # Memory Check Module / 内存检查模块
//!
//! Wraps test commands with a valgrind-compatible memory-error detector and
//! interprets the XML report it writes. A run is clean when the report holds no
//! `error` element.
//!
//! 使用与 valgrind 兼容的内存错误检测工具包装测试命令，并解析其写入的 XML 报告。
//! 当报告中不包含 `error` 元素时，运行被视为干净。

use std::fs;
use std::path::Path;

use crate::core::error::{Error, Result};
use crate::core::models::CheckMode;

/// Memory-check tool launched when none is configured.
pub const DEFAULT_TOOL: &str = "valgrind";

/// Builds the wrapper command line for a check mode and evaluates the resulting report.
/// 为检查模式构建包装命令行，并评估生成的报告。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCheckAdapter {
    tool: String,
}

impl Default for MemoryCheckAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

impl MemoryCheckAdapter {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// The words placed in front of the test command. Empty for [`CheckMode::None`].
    ///
    /// ```text
    /// Full:   valgrind --xml=yes --xml-file=<report>
    /// Thread: valgrind --xml=yes --xml-file=<report> --tool=helgrind
    /// ```
    pub fn prefix(&self, mode: CheckMode, report_path: &Path) -> Vec<String> {
        let mut words = match mode {
            CheckMode::None => return Vec::new(),
            CheckMode::Full | CheckMode::Thread => vec![
                self.tool.clone(),
                "--xml=yes".to_string(),
                format!("--xml-file={}", report_path.display()),
            ],
        };
        if mode == CheckMode::Thread {
            words.push("--tool=helgrind".to_string());
        }
        words
    }

    /// `true` when the report at `report_path` contains no error records.
    ///
    /// A missing, unreadable or malformed report is an [`Error::ReportParse`]: the
    /// tool either never ran or died before writing its output.
    pub fn evaluate(&self, report_path: &Path) -> Result<bool> {
        Ok(self.inspect(report_path)?.is_clean())
    }

    /// Like [`evaluate`](Self::evaluate), but keeps the error count and kinds.
    pub fn inspect(&self, report_path: &Path) -> Result<MemcheckReport> {
        inspect(report_path)
    }
}

/// What a memory-check report says about one test run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemcheckReport {
    /// Number of `error` elements in the report.
    pub error_count: usize,
    /// Distinct `<kind>` values of the errors, in report order (e.g. `Leak_DefinitelyLost`, `Race`).
    pub kinds: Vec<String>,
}

impl MemcheckReport {
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }
}

/// Reads and parses the report file at `report_path`.
/// 读取并解析 `report_path` 处的报告文件。
pub fn inspect(report_path: &Path) -> Result<MemcheckReport> {
    let content = fs::read_to_string(report_path).map_err(|e| Error::ReportParse {
        path: report_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_report(&content, report_path)
}

/// Parses report text. `report_path` is only used in error messages.
pub fn parse_report(content: &str, report_path: &Path) -> Result<MemcheckReport> {
    let document = roxmltree::Document::parse(content).map_err(|e| Error::ReportParse {
        path: report_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut report = MemcheckReport::default();
    // `descendants` yields the root itself first; only records below it count.
    for error in document
        .root_element()
        .descendants()
        .skip(1)
        .filter(|node| node.is_element() && node.has_tag_name("error"))
    {
        report.error_count += 1;
        let kind = error
            .children()
            .find(|child| child.has_tag_name("kind"))
            .and_then(|kind| kind.text())
            .map(str::trim);
        if let Some(kind) = kind {
            if !report.kinds.iter().any(|known| known == kind) {
                report.kinds.push(kind.to_string());
            }
        }
    }

    Ok(report)
}
