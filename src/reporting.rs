//! # Reporting Module / 报告模块
//!
//! This module handles the display of the aggregate test report on the console,
//! with internationalization support.
//!
//! 此模块处理汇总测试报告在控制台上的显示，支持国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{print_failure_details, print_summary, render};
