use super::error::{RepositoryError, Result};

/// Explicit opt-in permissions for unindexed scans.
///
/// The operations that traverse a whole table (`find_all`, `count`,
/// `delete_all`, and offset pagination over a scan) must be enabled per
/// repository instance. Everything is denied by default, so a scan of a
/// large table is always a visible decision at the call site that
/// configures the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanPermissions {
    find_all: bool,
    count: bool,
    delete_all: bool,
}

impl ScanPermissions {
    /// Permissions with every scan operation denied.
    pub fn none() -> Self {
        Self::default()
    }

    /// Permissions with every scan operation enabled.
    pub fn allow_all() -> Self {
        Self {
            find_all: true,
            count: true,
            delete_all: true,
        }
    }

    /// Enables `find_all` and paged scans.
    pub fn allow_find_all(mut self) -> Self {
        self.find_all = true;
        self
    }

    /// Enables `count`.
    pub fn allow_count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Enables `delete_all`.
    pub fn allow_delete_all(mut self) -> Self {
        self.delete_all = true;
        self
    }

    /// Fails unless `find_all` scans are enabled.
    pub fn ensure_find_all(&self) -> Result<()> {
        Self::ensure(self.find_all, "find_all")
    }

    /// Fails unless `count` scans are enabled.
    pub fn ensure_count(&self) -> Result<()> {
        Self::ensure(self.count, "count")
    }

    /// Fails unless `delete_all` scans are enabled.
    pub fn ensure_delete_all(&self) -> Result<()> {
        Self::ensure(self.delete_all, "delete_all")
    }

    fn ensure(enabled: bool, operation: &'static str) -> Result<()> {
        if enabled {
            Ok(())
        } else {
            Err(RepositoryError::ScanNotEnabled { operation })
        }
    }
}
