use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

/// Serializes tests that touch the environment or the working directory.
pub(crate) static PROCESS_LOCK: Mutex<()> = Mutex::new(());

/// Restores the working directory when dropped.
pub(crate) struct CwdGuard(PathBuf);

impl CwdGuard {
    pub(crate) fn new() -> Self {
        CwdGuard(env::current_dir().unwrap())
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}
