use camino::Utf8Path;
use fs_err as fs;
use rulefix_types::PathKind;

/// Read-only filesystem queries used by classification and validation.
///
/// Kept behind a trait so the validator can be exercised against an
/// in-memory tree.
pub trait PathProbe {
    /// Kind of the path, or `None` when it does not exist.
    fn kind(&self, path: &Utf8Path) -> Option<PathKind>;

    fn is_readable(&self, path: &Utf8Path) -> bool;

    fn is_writable(&self, path: &Utf8Path) -> bool;
}

/// File-system backed `PathProbe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPathProbe;

impl PathProbe for FsPathProbe {
    fn kind(&self, path: &Utf8Path) -> Option<PathKind> {
        let meta = fs::metadata(path).ok()?;
        if meta.is_dir() {
            Some(PathKind::Directory)
        } else {
            Some(PathKind::File)
        }
    }

    fn is_readable(&self, path: &Utf8Path) -> bool {
        fs::File::open(path).is_ok()
    }

    /// Opens for writing without truncating, so ownership and ACLs count.
    fn is_writable(&self, path: &Utf8Path) -> bool {
        fs::OpenOptions::new().write(true).open(path).is_ok()
    }
}
