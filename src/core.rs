//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the runner,
//! including configuration loading, data models, the memory-check adapter
//! and the test execution logic.
//!
//! 此模块包含运行器的核心功能，
//! 包括配置加载、数据模型、内存检查适配器和测试执行逻辑。

pub mod config;
pub mod error;
pub mod execution;
pub mod memcheck;
pub mod models;
pub mod orchestrator;
pub mod planner;

// Re-exports
pub use config::{PlatformTests, TestConfig, TestDefinition};
pub use error::Error;
pub use execution::Executor;
pub use models::{CheckMode, ExecutionPolicy, Report, TestCase, TestResult, TestStatus};
