use std::fs::Metadata;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

const OWNER_READ: u32 = 0o400;
const OWNER_EXEC: u32 = 0o100;

/// The parts of a `stat` result the dispatcher decides on.
///
/// Permissions are the owner bits of the mode, not an access check for the
/// running user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    pub is_regular: bool,
    pub size: u64,
    pub readable: bool,
    pub executable: bool,
}

impl FileMeta {
    /// Stats `path`, following symlinks. `None` means it does not exist or
    /// could not be examined.
    pub async fn stat(path: &Path) -> Option<Self> {
        tokio::fs::metadata(path)
            .await
            .ok()
            .map(|meta| Self::from_metadata(&meta))
    }

    pub fn from_metadata(meta: &Metadata) -> Self {
        let mode = meta.permissions().mode();

        Self {
            is_regular: meta.is_file(),
            size: meta.len(),
            readable: mode & OWNER_READ != 0,
            executable: mode & OWNER_EXEC != 0,
        }
    }

    /// Regular file with the owner read bit set.
    pub fn can_serve(&self) -> bool {
        self.is_regular && self.readable
    }

    /// Regular file with the owner execute bit set.
    pub fn can_run(&self) -> bool {
        self.is_regular && self.executable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::Permissions;

    #[tokio::test]
    async fn missing_path_has_no_metadata() {
        let dir = tempfile::tempdir().unwrap();

        assert!(FileMeta::stat(&dir.path().join("nope")).await.is_none());
    }

    #[tokio::test]
    async fn regular_file_bits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        std::fs::write(&path, "hello").unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(0o644)).unwrap();

        let meta = FileMeta::stat(&path).await.unwrap();

        assert!(meta.is_regular);
        assert_eq!(meta.size, 5);
        assert!(meta.can_serve());
        assert!(!meta.can_run());
    }

    #[tokio::test]
    async fn directory_is_neither_servable_nor_runnable() {
        let dir = tempfile::tempdir().unwrap();

        let meta = FileMeta::stat(dir.path()).await.unwrap();

        assert!(!meta.is_regular);
        assert!(!meta.can_serve());
        assert!(!meta.can_run());
    }

    #[tokio::test]
    async fn owner_bits_decide_even_for_privileged_users() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked");
        std::fs::write(&path, "x").unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(0o100)).unwrap();

        let meta = FileMeta::stat(&path).await.unwrap();

        assert!(!meta.readable);
        assert!(meta.executable);
    }
}
