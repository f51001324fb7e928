// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use std::{env, ffi::OsString, path::PathBuf};

use crate::{
    commands::{self, run::RunOptions},
    core::{memcheck, models, planner::TestSelection, CheckMode, TestStatus},
    infra::t,
};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language<I, T>(args: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<String> = args
        .into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            arg.to_string_lossy().into_owned()
        })
        .collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return crate::resolve_locale(lang);
        }
    }
    if let Some(lang) = args.iter().find_map(|arg| arg.strip_prefix("--lang=")) {
        return crate::resolve_locale(lang);
    }
    // Fallback to system language detection
    crate::resolve_locale(&sys_locale::get_locale().unwrap_or_else(|| "en".to_string()))
}

fn build_cli(locale: &str) -> Command {
    Command::new("utest")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help(t!("arg_version", locale = locale).to_string())
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("PATH")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("platform")
                .short('p')
                .long("platform")
                .help(t!("arg_platform", locale = locale).to_string())
                .value_name("PLATFORM")
                .required(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .help(t!("arg_all", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("valgrind")
                .short('V')
                .long("valgrind")
                .help(t!("arg_valgrind", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("helgrind")
                .short('H')
                .long("helgrind")
                .help(t!("arg_helgrind", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("xml")
                .short('x')
                .long("xml")
                .help(t!("arg_xml", locale = locale).to_string())
                .value_name("XML_FILE")
                .default_value(models::DEFAULT_REPORT_PATH)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("memcheck-tool")
                .long("memcheck-tool")
                .help(t!("arg_memcheck_tool", locale = locale).to_string())
                .value_name("PROGRAM")
                .default_value(memcheck::DEFAULT_TOOL)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("tests")
                .help(t!("arg_tests", locale = locale).to_string())
                .value_name("NAMES")
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .group(
            ArgGroup::new("selection")
                .args(["all", "tests"])
                .multiple(true)
                .required(true),
        )
}

/// Turns parsed matches into the immutable options of one run.
fn options_from_matches(matches: &ArgMatches, locale: String) -> RunOptions {
    let config = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_default(); // Required
    let platform = matches
        .get_one::<String>("platform")
        .cloned()
        .unwrap_or_default(); // Required
    let names: Vec<String> = matches
        .get_many::<String>("tests")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let selection = if matches.get_flag("all") {
        if !names.is_empty() {
            tracing::warn!("--all given together with test names; running every test");
        }
        TestSelection::All
    } else {
        TestSelection::Named(names)
    };

    let full = matches.get_flag("valgrind");
    let thread = matches.get_flag("helgrind");
    if full && thread {
        tracing::warn!("--valgrind and --helgrind both given; using full memory checking");
    }

    RunOptions {
        config,
        platform,
        selection,
        check_mode: CheckMode::from_flags(full, thread),
        report_path: matches
            .get_one::<PathBuf>("xml")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(models::DEFAULT_REPORT_PATH)),
        memcheck_tool: matches
            .get_one::<String>("memcheck-tool")
            .cloned()
            .unwrap_or_else(|| memcheck::DEFAULT_TOOL.to_string()),
        locale,
    }
}

/// Parses an explicit argument list (the first item is the program name).
pub fn try_parse_from<I, T>(args: I) -> Result<RunOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<T> = args.into_iter().collect();
    let language = pre_parse_language(args.iter().cloned());
    let matches = build_cli(&language).try_get_matches_from(args)?;
    Ok(options_from_matches(&matches, language))
}

/// Parses the process arguments, exiting with a usage message on error.
pub fn parse_args() -> RunOptions {
    let language = pre_parse_language(env::args_os());
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();
    options_from_matches(&matches, language)
}

pub async fn process_command(options: RunOptions) -> Result<TestStatus> {
    commands::run::execute(&options).await
}
