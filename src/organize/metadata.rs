//! Metadata preservation.
//! - Copies timestamps (atime, mtime) and, on Unix, permission bits from source to dest.
//! - Best-effort: every copied file keeps its contents even when the
//!   filesystem refuses to take the metadata; failures are logged and ignored.

use filetime::{FileTime, set_file_times};
#[cfg(not(unix))]
use filetime::{set_file_atime, set_file_mtime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Preserve metadata on `dest` using already-fetched `src_meta`.
/// Callers pass src metadata to avoid re-statting the source repeatedly.
pub fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) {
    // 1) Timestamps
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let mt = FileTime::from_unix_time(src_meta.mtime(), src_meta.mtime_nsec() as u32);
        let at = FileTime::from_unix_time(src_meta.atime(), src_meta.atime_nsec() as u32);
        if let Err(e) = set_file_times(dest, at, mt) {
            warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
        } else {
            trace!(path = %dest.display(), "set atime/mtime on destination");
        }
    }
    #[cfg(not(unix))]
    {
        let at = src_meta.accessed().ok().map(FileTime::from_system_time);
        let mt = src_meta.modified().ok().map(FileTime::from_system_time);
        match (at, mt) {
            (Some(a), Some(m)) => {
                if let Err(e) = set_file_times(dest, a, m) {
                    warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
                }
            }
            (Some(a), None) => {
                if let Err(e) = set_file_atime(dest, a) {
                    warn!(path = %dest.display(), error = %e, "failed to set atime on destination");
                }
            }
            (None, Some(m)) => {
                if let Err(e) = set_file_mtime(dest, m) {
                    warn!(path = %dest.display(), error = %e, "failed to set mtime on destination");
                }
            }
            (None, None) => {}
        }
    }

    // 2) Permissions (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let src_mode = src_meta.permissions().mode() & 0o777;
        let perms = fs::Permissions::from_mode(src_mode);
        if let Err(e) = fs::set_permissions(dest, perms) {
            warn!(path = %dest.display(), mode = format!("{:o}", src_mode), error = %e, "failed to set permissions on destination");
        } else {
            trace!(path = %dest.display(), mode = format!("{:o}", src_mode), "set permissions on destination");
        }
    }

    // 3) Windows: preserve the readonly attribute
    #[cfg(windows)]
    {
        let ro = src_meta.permissions().readonly();
        match fs::metadata(dest) {
            Ok(meta) => {
                let mut perms = meta.permissions();
                perms.set_readonly(ro);
                if let Err(e) = fs::set_permissions(dest, perms) {
                    warn!(path = %dest.display(), readonly = ro, error = %e, "failed to set readonly attribute on destination");
                }
            }
            Err(e) => {
                warn!(path = %dest.display(), error = %e, "failed to stat destination for readonly preservation");
            }
        }
    }
}

/// Preserve extended attributes from source path to destination path.
/// Requires the "xattrs" feature (otherwise this is a no-op).
pub fn preserve_xattrs(src: &Path, dest: &Path) {
    #[cfg(feature = "xattrs")]
    {
        match xattr::list(src) {
            Ok(names) => {
                for name in names {
                    match xattr::get(src, &name) {
                        Ok(Some(value)) => {
                            if let Err(e) = xattr::set(dest, &name, &value) {
                                warn!(src = %src.display(), dest = %dest.display(), xattr = %name.to_string_lossy(), error = %e, "failed to set xattr on destination");
                            } else {
                                trace!(src = %src.display(), dest = %dest.display(), xattr = %name.to_string_lossy(), size = value.len(), "preserved xattr");
                            }
                        }
                        Ok(None) => {
                            if let Err(e) = xattr::set(dest, &name, &[]) {
                                warn!(src = %src.display(), dest = %dest.display(), xattr = %name.to_string_lossy(), error = %e, "failed to set empty xattr on destination");
                            }
                        }
                        Err(e) => {
                            warn!(src = %src.display(), xattr = %name.to_string_lossy(), error = %e, "failed to read xattr value from source");
                        }
                    }
                }
            }
            Err(e) => {
                warn!(src = %src.display(), error = %e, "failed to list xattrs; continuing");
            }
        }
    }
    #[cfg(not(feature = "xattrs"))]
    {
        let _ = (src, dest); // silence unused warnings
    }
}
