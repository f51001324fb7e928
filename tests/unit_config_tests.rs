//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Tests for loading platform test definitions from YAML and TOML, schema
//! validation, and test selection.
//!
//! 测试从 YAML 和 TOML 加载平台测试定义、模式验证以及测试选择。

mod common;

use common::{setup_test_environment, write_config};
use std::path::Path;
use utest_runner::core::config::{self, ConfigFormat, TestConfig, TestDefinition};
use utest_runner::core::error::Error;
use utest_runner::core::planner::{plan_execution, TestSelection};

const YAML_CONFIG: &str = r#"
linux:
  list:
    command: build/tests/list_test
    args: ""
  thread:
    command: build/tests/thread_test
    args: "--iterations 10"
  bytebuffer:
    command: build/tests/bytebuffer_test
    args: ""
win32:
  list:
    command: build\tests\list_test.exe
    args: ""
"#;

fn yaml_config() -> TestConfig {
    TestConfig::parse(YAML_CONFIG, ConfigFormat::Yaml, Path::new("unittests.yaml")).unwrap()
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_yaml_preserves_declaration_order() {
        let config = yaml_config();
        assert_eq!(config.platforms().collect::<Vec<_>>(), vec!["linux", "win32"]);

        let linux = config.platform("linux").unwrap();
        assert_eq!(linux.select_all(), vec!["list", "thread", "bytebuffer"]);
        assert_eq!(
            linux.get("thread"),
            Some(&TestDefinition::new(
                "thread",
                "build/tests/thread_test",
                "--iterations 10"
            ))
        );
    }

    #[test]
    fn test_toml_preserves_declaration_order() {
        let content = r#"
[linux.zeta]
command = "/bin/true"
args = ""

[linux.alpha]
command = "/bin/false"
args = "-x"

[linux.mid]
command = "/bin/true"
args = ""
"#;
        let config =
            TestConfig::parse(content, ConfigFormat::Toml, Path::new("unittests.toml")).unwrap();
        let linux = config.platform("linux").unwrap();
        assert_eq!(linux.select_all(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(linux.get("alpha").unwrap().args, "-x");
    }

    #[test]
    fn test_missing_args_key_is_rejected() {
        let content = "linux:\n  broken:\n    command: /bin/true\n";
        let err = TestConfig::parse(content, ConfigFormat::Yaml, Path::new("c.yaml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("args"), "unexpected message: {source}");
    }

    #[test]
    fn test_non_string_command_is_rejected() {
        let content = "[linux.broken]\ncommand = 5\nargs = \"\"\n";
        let err = TestConfig::parse(content, ConfigFormat::Toml, Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let content = "linux:\n  list: [unclosed\n";
        let err = TestConfig::parse(content, ConfigFormat::Yaml, Path::new("c.yaml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_empty_platform_has_no_tests() {
        let content = "linux: {}\nwin32:\n  list: { command: list.exe, args: \"\" }\n";
        let config = TestConfig::parse(content, ConfigFormat::Yaml, Path::new("c.yaml")).unwrap();
        assert!(config.platform("linux").unwrap().is_empty());
        assert_eq!(config.platform("win32").unwrap().len(), 1);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/unittests.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("unittests.TOML")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("unittests.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("unittests.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("unittests")), ConfigFormat::Yaml);
    }

    #[test]
    fn test_command_line_is_trimmed() {
        assert_eq!(TestDefinition::new("t", "/bin/true", "").command_line(), "/bin/true");
        assert_eq!(TestDefinition::new("t", "prog", "-a -b").command_line(), "prog -a -b");
    }
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let dir = setup_test_environment();
        let path = write_config(&dir, "unittests.yaml", YAML_CONFIG);

        let linux = config::load(&path, "linux").unwrap();
        assert_eq!(linux.platform(), "linux");
        assert_eq!(linux.source(), path.as_path());
        assert_eq!(linux.len(), 3);
    }

    #[test]
    fn test_missing_file_is_config_not_found() {
        let dir = setup_test_environment();
        let path = dir.path().join("does-not-exist.yaml");

        let err = config::load(&path, "linux").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
        assert!(err.to_string().contains("does-not-exist.yaml"));
        assert!(!err.is_fatal_mid_run());
    }

    #[test]
    fn test_unknown_platform() {
        let dir = setup_test_environment();
        let path = write_config(&dir, "unittests.yaml", YAML_CONFIG);

        let err = config::load(&path, "esp32").unwrap_err();
        match err {
            Error::PlatformNotFound { platform, .. } => assert_eq!(platform, "esp32"),
            other => panic!("Expected PlatformNotFound, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod selection_tests {
    use super::*;

    #[test]
    fn test_select_named_keeps_request_order() {
        let linux = yaml_config().platform("linux").unwrap();
        let selected = linux.select_named(&["bytebuffer", "list"]).unwrap();
        let names: Vec<_> = selected.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["bytebuffer", "list"]);
    }

    #[test]
    fn test_select_named_fails_fast_on_unknown_name() {
        let linux = yaml_config().platform("linux").unwrap();
        let err = linux.select_named(&["list", "nope", "thread"]).unwrap_err();
        match err {
            Error::TestNotFound { name, platform, .. } => {
                assert_eq!(name, "nope");
                assert_eq!(platform, "linux");
            }
            other => panic!("Expected TestNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_all_uses_declaration_order() {
        let linux = yaml_config().platform("linux").unwrap();
        let plan = plan_execution(&linux, &TestSelection::All).unwrap();
        assert_eq!(plan.platform, "linux");
        assert_eq!(plan.definitions, linux.definitions());
    }

    #[test]
    fn test_plan_named_rejects_whole_selection() {
        let linux = yaml_config().platform("linux").unwrap();
        let selection = TestSelection::Named(vec!["list".to_string(), "missing".to_string()]);
        assert!(matches!(
            plan_execution(&linux, &selection),
            Err(Error::TestNotFound { .. })
        ));
    }
}
