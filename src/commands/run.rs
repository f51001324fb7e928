// src/commands/run.rs

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{
        config,
        memcheck::MemoryCheckAdapter,
        models::{CheckMode, ExecutionPolicy, TestStatus},
        orchestrator,
        planner::{self, TestSelection},
        Executor,
    },
    infra::t,
    reporting::{print_failure_details, print_summary},
};

/// Everything one invocation needs, fixed once the command line is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Path of the YAML/TOML test configuration.
    pub config: PathBuf,
    pub platform: String,
    pub selection: TestSelection,
    pub check_mode: CheckMode,
    /// Where the memory-check tool writes its XML report.
    pub report_path: PathBuf,
    /// Program used as the memory-check tool.
    pub memcheck_tool: String,
    pub locale: String,
}

impl RunOptions {
    pub fn policy(&self) -> ExecutionPolicy {
        ExecutionPolicy::new(self.check_mode, self.report_path.clone())
    }
}

/// Loads the configuration, runs the selected tests and prints the summary.
///
/// Returns the overall verdict. Configuration errors and unreadable memory-check
/// reports are returned as errors, in which case no summary is printed.
pub async fn execute(options: &RunOptions) -> Result<TestStatus> {
    let locale = options.locale.as_str();

    println!(
        "{}",
        t!("loading_config", locale = locale, path = options.config.display())
    );
    let tests = config::load(&options.config, &options.platform)?;
    let plan = planner::plan_execution(&tests, &options.selection)?;

    println!(
        "{}",
        t!(
            "running_platform",
            locale = locale,
            platform = plan.platform.yellow(),
            count = plan.definitions.len()
        )
        .bold()
    );
    if options.check_mode.is_enabled() {
        println!(
            "{}",
            t!(
                "memcheck_enabled",
                locale = locale,
                mode = options.check_mode,
                tool = &options.memcheck_tool,
                path = options.report_path.display()
            )
            .cyan()
        );
    }
    if plan.definitions.is_empty() {
        println!("{}", t!("no_cases_to_run", locale = locale).yellow());
    }

    let executor = Executor::new(MemoryCheckAdapter::new(options.memcheck_tool.clone()))
        .with_locale(locale);
    let report = orchestrator::run_all(&plan.definitions, &options.policy(), &executor)
        .await
        .with_context(|| t!("run_aborted", locale = locale).to_string())?;

    let overall = print_summary(&report, locale);
    print_failure_details(&report, locale);
    Ok(overall)
}
