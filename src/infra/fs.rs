//! # File System Operations Module / 文件系统操作模块
//!
//! Housekeeping for the shared memory-check report file.
//!
//! 共享内存检查报告文件的维护操作。

use std::fs;
use std::io;
use std::path::Path;

/// Deletes a report left behind by an earlier run so it cannot be mistaken for
/// the report of the next test.
///
/// # Returns
/// `true` if a file was removed, `false` if there was nothing to remove.
pub fn remove_stale_report(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
