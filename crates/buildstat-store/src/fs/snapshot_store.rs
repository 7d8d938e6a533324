//! Filesystem snapshot store
//!
//! One JSON record, `<root>/stats.json`, holding the latest snapshot in the
//! raw compilation-result shape.

use crate::errors::{io_error, store_unavailable, store_unavailable_from, Result};
use crate::fs::atomic::atomic_write;
use buildstat_core::config::default_store_dir;
use buildstat_core::errors::ExError;
use buildstat_core::model::Snapshot;
use buildstat_core::normalize::normalize_bytes;
use buildstat_core::store::SnapshotStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the persisted record
pub const SNAPSHOT_RECORD: &str = "stats.json";

/// Single-slot snapshot store under a root directory
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    /// Create a store rooted at `root`; nothing is touched until first use
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store in `<temp_dir>/buildstat`
    pub fn in_temp_dir() -> Self {
        Self::new(default_store_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the `stats.json` record
    pub fn record_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_RECORD)
    }

    fn check_root(&self, op: &str) -> Result<bool> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(true),
            Ok(_) => Err(store_unavailable(
                op,
                format!("store root {} is not a directory", self.root.display()),
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(store_unavailable_from(op, io_error("stat_store_root", e))),
        }
    }
}

impl SnapshotStore for FsSnapshotStore {
    /// Missing or unparseable record → `Ok(None)`
    fn load(&self) -> Result<Option<Snapshot>> {
        const OP: &str = "load_snapshot";

        if !self.check_root(OP)? {
            return Ok(None);
        }

        let path = self.record_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_unavailable_from(OP, io_error("read_record", e))),
        };

        match normalize_bytes(&bytes) {
            Ok(normalized) => Ok(Some(normalized.snapshot)),
            Err(err) => {
                warn_unreadable(&path, &err);
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        const OP: &str = "save_snapshot";

        self.check_root(OP)?;
        let mut bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| ExError::from(e).with_op(OP))?;
        bytes.push(b'\n');

        atomic_write(&self.record_path(), &bytes).map_err(|e| store_unavailable_from(OP, e))?;

        tracing::debug!(
            component = module_path!(),
            op = OP,
            path = %self.record_path().display(),
            modules = snapshot.modules.len(),
            assets = snapshot.assets.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        const OP: &str = "clear_snapshot";

        match fs::remove_file(self.record_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_unavailable_from(OP, io_error("remove_record", e))),
        }
    }
}

fn warn_unreadable(path: &Path, err: &ExError) {
    tracing::warn!(
        component = module_path!(),
        op = "load_snapshot",
        err_code = err.code(),
        path = %path.display(),
        reason = err.message(),
        "stored snapshot is unreadable; treating as first build"
    );
}
