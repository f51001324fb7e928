//! # Error Types / 错误类型
//!
//! Errors that abort a run. Per-test failures are not errors: they are recorded
//! as `Failed` results in the report and never interrupt the run.
//!
//! 会中止运行的错误。单个测试的失败不属于错误：它们作为 `Failed` 结果记录在报告中，
//! 不会中断运行。

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the runner's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions raised by the configuration store and the memory-check adapter.
/// 由配置存储和内存检查适配器引发的致命错误。
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration errors, raised before any test runs ===
    #[error("unable to load test configuration '{}'", .path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("platform '{platform}' does not exist in {}", .path.display())]
    PlatformNotFound { platform: String, path: PathBuf },

    #[error("test '{name}' does not exist for platform '{platform}' in {}", .path.display())]
    TestNotFound {
        name: String,
        platform: String,
        path: PathBuf,
    },

    // === Memory-check report errors, raised mid-run ===
    #[error("unable to parse memory-check report '{}': {reason}", .path.display())]
    ReportParse { path: PathBuf, reason: String },

    #[error("unable to remove stale memory-check report '{}'", .path.display())]
    StaleReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// `true` for errors that can only occur once tests have started running.
    /// Such an error discards the partial report.
    pub fn is_fatal_mid_run(&self) -> bool {
        matches!(self, Error::ReportParse { .. } | Error::StaleReport { .. })
    }
}
