//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the runner,
//! including process execution, file system housekeeping and logging.
//!
//! 此模块为运行器提供基础设施服务，
//! 包括进程执行、文件系统维护和日志记录。

pub mod command;
pub mod fs;
pub mod logging;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
