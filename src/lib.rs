//! # utest runner Library / utest 运行器库
//!
//! This library provides the core functionality of `utest`, a configuration-driven
//! unit test runner. Test commands are grouped by platform in a YAML or TOML file,
//! run one after another (optionally under valgrind or helgrind), and combined
//! into a single pass/fail verdict.
//!
//! 此库为 `utest` 提供核心功能，这是一个配置驱动的单元测试运行器。
//! 测试命令在 YAML 或 TOML 文件中按平台分组，依次运行（可选地在 valgrind 或
//! helgrind 下运行），并汇总为单一的通过/失败结论。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, data models, memory checking and the execution engine
//! - `infra` - Infrastructure services like process execution and logging
//! - `reporting` - Console summary of the run
//! - `cli` / `commands` - Command-line interface
//!
//! - `core` - 配置、数据模型、内存检查和执行引擎
//! - `infra` - 基础设施服务，如进程执行和日志记录
//! - `reporting` - 运行结果的控制台摘要
//! - `cli` / `commands` - 命令行接口

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::models;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Maps a requested locale onto one the runner ships translations for.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the language
/// code (e.g., "en"), and finally falls back to the default language ("en").
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}
