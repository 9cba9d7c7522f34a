use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Sequence number keeps temp names unique even when parallel workers hit the
// same nanosecond.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".filebucket.{}.{}.{}.tmp", pid, nanos, seq);
    dst_dir.join(tmp_name)
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> std::io::Result<()> {
    let f = std::fs::File::open(dir)?;
    f.sync_all()
}
