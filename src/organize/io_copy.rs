//! Streaming copy with durability.
//!
//! - Writes to a newly created destination file (O_EXCL semantics; never clobbers).
//! - Buffered I/O with large (1 MiB) buffers to reduce syscall count.
//! - Fsyncs the destination before returning, so the later rename publishes
//!   fully durable bytes.
//!
//! Snapshot semantics: the source file is read once from start to EOF; if it
//! grows concurrently, the additional bytes are not included. Shrinks during
//! the copy surface as read errors or early EOF.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Copy `src` -> `dst` using buffered I/O, then fsync the destination.
/// Returns the number of bytes written.
/// Notes:
/// - `dst` is created with `create_new(true)` so we never clobber an existing file.
/// - Callers are responsible for syncing the parent directory after the final rename.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    // Fast-path: on macOS, try APFS clonefile to CoW-clone the file.
    // This creates the destination path atomically and is O(1) for metadata.
    #[cfg(target_os = "macos")]
    {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;
        if let (Ok(src_c), Ok(dst_c)) = (
            CString::new(src.as_os_str().as_bytes()),
            CString::new(dst.as_os_str().as_bytes()),
        ) {
            // clonefile returns 0 on success, -1 on error with errno set.
            let rc = unsafe { libc::clonefile(src_c.as_ptr(), dst_c.as_ptr(), 0) };
            if rc == 0 {
                let bytes = File::open(src)?.metadata()?.len();
                let f = File::options().read(true).open(dst)?;
                f.sync_all()?;
                return Ok(bytes);
            }
            // On errors like EXDEV/ENOTSUP/EPERM fall through to streaming;
            // EEXIST is impossible here since temp names are unique.
        }
    }

    // Open source file for streaming or Linux fast-path.
    let src_f = File::open(src)?;

    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        // FILE_FLAG_WRITE_THROUGH = 0x80000000 for durable writes.
        const FILE_FLAG_WRITE_THROUGH: u32 = 0x8000_0000;
        opts.custom_flags(FILE_FLAG_WRITE_THROUGH);
    }

    let dst_f = opts.open(dst)?;

    // Fast-path: on Linux, try copy_file_range for in-kernel copy when supported.
    #[cfg(target_os = "linux")]
    {
        use std::os::unix::io::AsRawFd;
        let mut total: u64 = 0;
        let chunk: usize = 16 * 1024 * 1024; // 16 MiB per call
        loop {
            let rc = unsafe {
                libc::copy_file_range(
                    src_f.as_raw_fd(),
                    std::ptr::null_mut(),
                    dst_f.as_raw_fd(),
                    std::ptr::null_mut(),
                    chunk,
                    0,
                )
            };
            if rc > 0 {
                total += rc as u64;
                continue;
            } else if rc == 0 {
                // EOF reached
                dst_f.sync_all()?;
                return Ok(total);
            } else {
                let err = io::Error::last_os_error();
                if total == 0 {
                    // No bytes copied yet; unsupported errors fall back to
                    // streaming, everything else propagates.
                    match err.raw_os_error() {
                        Some(code)
                            if code == libc::EXDEV
                                || code == libc::ENOSYS
                                || code == libc::EINVAL
                                || code == libc::EPERM => {}
                        _ => return Err(err),
                    }
                } else {
                    // Partial copy then error: let the caller clean up the temp.
                    return Err(err);
                }
                break; // fallback
            }
        }
    }

    // Streaming fallback (and the non-Linux/non-macOS default): buffered io::copy
    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(bytes)
}
