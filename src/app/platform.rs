// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

// ---------------- single-instance lock ----------------

fn lock_path() -> Result<PathBuf, String> {
    Ok(crate::ipc::runtime_dir()?.join("doomsday").join("doomsday.lock"))
}

/// Held for the lifetime of the counter; the lock file goes away on drop.
pub struct InstanceLock {
    _listener: UnixListener,
    path: PathBuf,
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn acquire_single_instance_lock() -> Result<InstanceLock, String> {
    let path = lock_path()?;
    acquire_lock_at(&path)
}

fn acquire_lock_at(path: &Path) -> Result<InstanceLock, String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let listener = match UnixListener::bind(path) {
        Ok(l) => l,
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => match UnixStream::connect(path) {
            Ok(_) => {
                return Err(format!(
                    "doomsday is already running (another instance holds {})",
                    path.display()
                ));
            }
            Err(_) => {
                // Left behind by a counter that died without cleaning up.
                let _ = std::fs::remove_file(path);
                UnixListener::bind(path)
                    .map_err(|e| format!("failed to bind instance lock {}: {e}", path.display()))?
            }
        },
        Err(e) => return Err(format!("failed to bind instance lock {}: {e}", path.display())),
    };

    Ok(InstanceLock {
        _listener: listener,
        path: path.to_path_buf(),
    })
}

/// Honors the `NO_COLOR` convention (any non-empty value disables color).
pub fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}
