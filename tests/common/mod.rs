// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

pub const CLEAN_REPORT: &str = r#"<?xml version="1.0"?>
<valgrindoutput>
  <protocolversion>4</protocolversion>
  <tool>memcheck</tool>
  <status><state>FINISHED</state></status>
  <errorcounts/>
</valgrindoutput>
"#;

pub const DIRTY_REPORT: &str = r#"<?xml version="1.0"?>
<valgrindoutput>
  <protocolversion>4</protocolversion>
  <tool>memcheck</tool>
  <error>
    <unique>0x0</unique>
    <kind>Leak_DefinitelyLost</kind>
  </error>
  <error>
    <unique>0x1</unique>
    <kind>InvalidRead</kind>
  </error>
</valgrindoutput>
"#;

pub const MALFORMED_REPORT: &str = "<valgrindoutput><error><kind>Leak</kind>";

pub fn setup_test_environment() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes a configuration file named `file_name` into `dir`.
pub fn write_config(dir: &TempDir, file_name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// Creates an executable script that stands in for valgrind.
///
/// It records its arguments in `<name>.args`, accepts valgrind-style leading
/// `--options`, runs the wrapped command, then writes `report` to the
/// `--xml-file=` path (or nothing when `report` is `None`) and exits with the
/// wrapped command's status.
#[cfg(unix)]
pub fn fake_checker(dir: &TempDir, name: &str, report: Option<&str>) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let write_report = match report {
        Some(xml) => format!("cat > \"$report\" <<'UTEST_XML'\n{xml}\nUTEST_XML\n"),
        None => String::new(),
    };
    let script = format!(
        r#"#!/bin/sh
echo "$*" > "$0.args"
report=""
while [ $# -gt 0 ]; do
  case "$1" in
    --xml-file=*) report="${{1#--xml-file=}}"; shift ;;
    --*) shift ;;
    *) break ;;
  esac
done
"$@"
status=$?
{write_report}exit $status
"#
    );

    let path = dir.path().join(name);
    fs::write(&path, script).expect("Failed to write fake checker");
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).unwrap();
    path
}

/// A `{command, args}` pair, as YAML flow mapping, that creates `marker` when run.
pub fn touch_entry(marker: &Path) -> String {
    format!("{{ command: touch, args: \"{}\" }}", marker.display())
}
