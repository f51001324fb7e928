//! # Test Configuration Module / 测试配置模块
//!
//! Loads the per-platform test definitions from a YAML or TOML file and validates
//! them against a typed schema. Declaration order is preserved, since running
//! "all" tests of a platform runs them in the order they were written.
//!
//! 从 YAML 或 TOML 文件加载按平台分组的测试定义，并根据类型化的模式进行验证。
//! 声明顺序会被保留，因为运行某个平台的"全部"测试时会按书写顺序执行。
//!
//! ```yaml
//! linux:
//!   list:
//!     command: build/tests/list_test
//!     args: ""
//!   thread:
//!     command: build/tests/thread_test
//!     args: "--iterations 10"
//! ```

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};

/// A single test as written in the configuration file.
/// The `command` and `args` strings are handed to the launcher unmodified.
/// 配置文件中定义的单个测试。`command` 和 `args` 会原样传递给启动器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDefinition {
    /// The test name, unique within its platform / 测试名称，在平台内唯一
    pub name: String,
    /// The executable to launch / 要启动的可执行文件
    pub command: String,
    /// Extra arguments appended after the command / 追加在命令之后的参数
    pub args: String,
}

impl TestDefinition {
    pub fn new(name: impl Into<String>, command: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: args.into(),
        }
    }

    /// The `command args` line, trimmed the way it is shown in logs.
    pub fn command_line(&self) -> String {
        format!("{} {}", self.command, self.args).trim().to_string()
    }
}

/// Schema of one test entry. Both keys are required.
#[derive(Debug, Deserialize)]
struct TestEntry {
    command: String,
    args: String,
}

/// The file formats a configuration can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from the file extension. Anything that is not `.toml`
    /// is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// A mapping that keeps its entries in declaration order and rejects duplicate keys.
struct Ordered<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping keyed by name")
            }

            // An empty YAML node (`linux:`) declares a platform without tests.
            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(Ordered(Vec::new()))
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, V)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    if entries.iter().any(|(existing, _)| *existing == key) {
                        return Err(de::Error::custom(format!("duplicate entry '{key}'")));
                    }
                    entries.push((key, value));
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// The whole configuration source: every platform and its tests.
/// 完整的配置源：所有平台及其测试。
#[derive(Debug, Clone)]
pub struct TestConfig {
    path: PathBuf,
    platforms: Vec<(String, Vec<TestDefinition>)>,
}

impl TestConfig {
    /// Reads and parses the configuration file at `path`.
    ///
    /// Any I/O, syntax or schema problem is reported as [`Error::ConfigNotFound`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigNotFound {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        Self::parse(&content, ConfigFormat::from_path(path), path)
    }

    /// Parses configuration text. `path` is only used in error messages.
    pub fn parse(content: &str, format: ConfigFormat, path: &Path) -> Result<Self> {
        let config_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::ConfigNotFound {
            path: path.to_path_buf(),
            source,
        };

        let raw: Ordered<Ordered<TestEntry>> = match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| config_error(Box::new(e)))?
            }
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| config_error(Box::new(e)))?,
        };

        let platforms = raw
            .0
            .into_iter()
            .map(|(platform, tests)| {
                let tests = tests
                    .0
                    .into_iter()
                    .map(|(name, entry)| TestDefinition {
                        name,
                        command: entry.command,
                        args: entry.args,
                    })
                    .collect();
                (platform, tests)
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            platforms,
        })
    }

    /// The file this configuration was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Platform keys in declaration order.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the tests declared for `platform`.
    pub fn platform(&self, platform: &str) -> Result<PlatformTests> {
        self.platforms
            .iter()
            .find(|(name, _)| name == platform)
            .map(|(name, tests)| PlatformTests {
                platform: name.clone(),
                source: self.path.clone(),
                tests: tests.clone(),
            })
            .ok_or_else(|| Error::PlatformNotFound {
                platform: platform.to_string(),
                path: self.path.clone(),
            })
    }
}

/// Loads `source` and returns the tests of `platform`.
/// 加载 `source` 并返回 `platform` 的测试。
pub fn load(source: &Path, platform: &str) -> Result<PlatformTests> {
    TestConfig::load(source)?.platform(platform)
}

/// The ordered test definitions of one platform.
/// 单个平台的有序测试定义。
#[derive(Debug, Clone)]
pub struct PlatformTests {
    platform: String,
    source: PathBuf,
    tests: Vec<TestDefinition>,
}

impl PlatformTests {
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TestDefinition> {
        self.tests.iter().find(|test| test.name == name)
    }

    /// All definitions in declaration order.
    pub fn definitions(&self) -> &[TestDefinition] {
        &self.tests
    }

    /// Every test name of the platform, in declaration order.
    pub fn select_all(&self) -> Vec<&str> {
        self.tests.iter().map(|test| test.name.as_str()).collect()
    }

    /// Resolves `names` in the order given. The first unknown name fails the whole
    /// selection with [`Error::TestNotFound`].
    pub fn select_named<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<TestDefinition>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name).cloned().ok_or_else(|| Error::TestNotFound {
                    name: name.to_string(),
                    platform: self.platform.clone(),
                    path: self.source.clone(),
                })
            })
            .collect()
    }
}
