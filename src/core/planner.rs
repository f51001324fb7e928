//! # Test Execution Planner Module / 测试执行计划模块
//!
//! This module decides which tests of a platform run, and in which order.
//!
//! 此模块决定运行平台中的哪些测试以及运行顺序。

use crate::core::config::{PlatformTests, TestDefinition};
use crate::core::error::Result;

/// Which tests of the platform were requested.
/// 请求运行平台中的哪些测试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestSelection {
    /// Every test, in declaration order.
    All,
    /// The named tests, in the order they were requested.
    Named(Vec<String>),
}

/// Represents the list of tests a run will execute.
/// 表示一次运行将执行的测试列表。
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub platform: String,
    /// The definitions to run, in execution order / 要运行的测试定义，按执行顺序排列
    pub definitions: Vec<TestDefinition>,
}

/// Creates an execution plan for `tests` according to `selection`.
///
/// A named selection is resolved fail-fast: a single unknown name rejects the
/// whole plan with [`crate::core::error::Error::TestNotFound`] and nothing runs.
///
/// 根据 `selection` 为 `tests` 创建执行计划。
/// 具名选择采用快速失败策略：只要有一个未知名称，整个计划即被拒绝，不会运行任何测试。
pub fn plan_execution(tests: &PlatformTests, selection: &TestSelection) -> Result<ExecutionPlan> {
    let definitions = match selection {
        TestSelection::All => tests.definitions().to_vec(),
        TestSelection::Named(names) => tests.select_named(names)?,
    };

    Ok(ExecutionPlan {
        platform: tests.platform().to_string(),
        definitions,
    })
}
