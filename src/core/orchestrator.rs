//! # Orchestrator Module / 编排模块
//!
//! Drives the executor over a plan, strictly one test at a time. All tests of a
//! run share one memory-check report file, so a test's report is fully consumed
//! before the next test is started. There is no timeout: a hung test blocks the
//! run until it exits.
//!
//! 严格逐个地在计划上驱动执行器。一次运行中的所有测试共享同一个内存检查报告文件，
//! 因此在下一个测试开始之前，上一个测试的报告必须被完全处理。
//! 没有超时机制：挂起的测试会阻塞运行直到其退出。

use crate::core::config::TestDefinition;
use crate::core::error::Result;
use crate::core::execution::Executor;
use crate::core::models::{ExecutionPolicy, Report, TestCase};

/// Runs `definitions` in order under `policy` and collects the results.
///
/// Failed tests are recorded and the run continues. A memory-check report that
/// cannot be read stops the run at once: the error is returned, no further test
/// is started and the partial report is dropped.
pub async fn run_all(
    definitions: &[TestDefinition],
    policy: &ExecutionPolicy,
    executor: &Executor,
) -> Result<Report> {
    let mut report = Report::new();

    for definition in definitions {
        let case = TestCase::new(definition.clone(), policy.clone());
        let result = executor.run(&case).await.inspect_err(|e| {
            tracing::debug!(test = case.name(), "aborting run: {e}");
        })?;
        report.push(result);
    }

    Ok(report)
}
