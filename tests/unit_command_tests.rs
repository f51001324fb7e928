//! # Command Module Unit Tests / Command 模块单元测试
//!
//! Tests for process spawning with live echo, output capture and exit-code mapping.
//!
//! 测试带实时回显的进程派生、输出捕获以及退出码映射。

#![cfg(unix)]

use tokio::process::Command;
use utest_runner::infra::command::{exit_code, shell_command, spawn_and_tee};
use utest_runner::infra::fs::remove_stale_report;

fn sh(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

#[tokio::test]
async fn test_captures_stdout_and_stderr() {
    let (status, output) = spawn_and_tee(sh("echo out-line; echo err-line >&2")).await;
    let status = status.unwrap();
    assert!(status.success());
    assert!(output.contains("out-line\n"));
    assert!(output.contains("err-line\n"));
}

#[tokio::test]
async fn test_non_utf8_output_keeps_the_pipe_drained() {
    // Well past the 64 KiB pipe buffer, after a byte that is not valid UTF-8.
    let script = "printf '\\377\\n'; i=0; while [ $i -lt 2000 ]; do \
                  echo 0123456789012345678901234567890123456789012345678; i=$((i+1)); done; \
                  echo DONE-MARKER; exit 0";
    let (status, output) = spawn_and_tee(sh(script)).await;
    assert_eq!(exit_code(&status.unwrap()), 0);
    assert!(output.starts_with('\u{FFFD}'));
    assert!(output.ends_with("DONE-MARKER\n"));
}

#[tokio::test]
async fn test_shell_command_uses_shell_rules() {
    let (status, output) =
        spawn_and_tee(shell_command("echo \"[$UTEST_UNSET_VAR]\" && exit 5")).await;
    assert_eq!(exit_code(&status.unwrap()), 5);
    assert_eq!(output, "[]\n");
}

#[tokio::test]
async fn test_nonzero_exit_code() {
    let (status, _) = spawn_and_tee(sh("exit 3")).await;
    assert_eq!(exit_code(&status.unwrap()), 3);
}

#[tokio::test]
async fn test_signal_maps_to_128_plus_signal() {
    let (status, _) = spawn_and_tee(sh("kill -9 $$")).await;
    assert_eq!(exit_code(&status.unwrap()), 128 + 9);
}

#[tokio::test]
async fn test_spawn_failure_is_reported() {
    let cmd = Command::new("this_command_definitely_does_not_exist_12345");
    let (status, output) = spawn_and_tee(cmd).await;
    assert!(status.is_err());
    assert!(output.is_empty());
}

#[test]
fn test_remove_stale_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vg.xml");
    assert!(!remove_stale_report(&path).unwrap());

    std::fs::write(&path, "<old/>").unwrap();
    assert!(remove_stale_report(&path).unwrap());
    assert!(!path.exists());
}
