//! # Process Execution Module / 进程执行模块
//!
//! Spawns test processes, echoes their output live and captures it for the
//! failure report.
//!
//! 派生测试进程，实时回显其输出，并为失败报告捕获输出。

use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;

/// Exit code recorded for a command that could not be launched, following the
/// shell's "command not found" convention.
pub const LAUNCH_FAILURE_EXIT_CODE: i32 = 127;

/// Builds a command that hands `line` to the host shell (`sh -c`, or `cmd /C`
/// on Windows), so quoting, variables and redirections follow the shell's rules.
///
/// 构建一个将 `line` 交给宿主 shell 执行的命令（`sh -c`，Windows 上为 `cmd /C`），
/// 因此引号、变量和重定向均遵循 shell 的规则。
pub fn shell_command(line: &str) -> Command {
    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C");
        cmd
    };
    #[cfg(not(windows))]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.arg("-c");
        cmd
    };
    cmd.arg(line);
    cmd
}

/// Spawns a command and waits for it to exit. Its stdout and stderr are read
/// line by line, echoed to the runner's own stdout and stderr as they arrive,
/// and combined into a single captured string.
///
/// Output is handled as raw bytes: lines that are not valid UTF-8 are echoed
/// unchanged and captured lossily, and both pipes are drained until the child
/// closes them.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令并等待其退出。其 stdout 和 stderr 被逐行读取，
/// 实时回显到运行器自身的 stdout 和 stderr，并合并为一个捕获的字符串。
/// 输出按原始字节处理：非 UTF-8 的行原样回显，并以有损方式捕获。
pub async fn spawn_and_tee(mut cmd: Command) -> (std::io::Result<ExitStatus>, String) {
    let mut child = match cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return (
            Err(std::io::Error::other("child output was not piped")),
            String::new(),
        );
    };

    // Both reader tasks append to the same buffer so the capture keeps the interleaving.
    let output = Arc::new(tokio::sync::Mutex::new(String::new()));
    let stdout_handle = tee_lines(stdout, tokio::io::stdout(), Arc::clone(&output));
    let stderr_handle = tee_lines(stderr, tokio::io::stderr(), Arc::clone(&output));

    let status = child.wait().await;

    // Wait for the readers so no trailing output is lost.
    for handle in [stdout_handle, stderr_handle] {
        if let Err(e) = handle.await {
            tracing::warn!("failed to join output reader: {e}");
        }
    }

    let captured = output.lock().await.clone();
    (status, captured)
}

fn tee_lines<R, W>(
    stream: R,
    mut echo: W,
    output: Arc<tokio::sync::Mutex<String>>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line).await {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("failed to read test output: {e}");
                    break;
                }
            }

            // The pipe keeps being drained even when our own stream is gone.
            if let Err(e) = echo.write_all(&line).await {
                tracing::debug!("failed to echo test output: {e}");
            } else if let Err(e) = echo.flush().await {
                tracing::debug!("failed to flush test output: {e}");
            }
            output.lock().await.push_str(&String::from_utf8_lossy(&line));
        }
    })
}

/// Converts an exit status into a shell-style exit code.
/// A process terminated by signal `n` reports `128 + n`.
pub fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}
