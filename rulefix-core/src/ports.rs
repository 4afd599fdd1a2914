//! Port traits abstracting the external collaborators away from dispatch.

use crate::error::{CapabilityError, CleanupError};
use camino::Utf8Path;

/// Entry points of the external transformation engine.
///
/// One method per scope × mode, plus the single legacy entry point. Each call
/// is expected to rewrite the source under `path` in place. Rule tokens are
/// opaque and passed through in order.
pub trait FixCapability {
    fn fix_all_for_file(&self, path: &Utf8Path) -> Result<(), CapabilityError>;

    fn fix_all_for_directory(
        &self,
        path: &Utf8Path,
        ignore_test_files: bool,
    ) -> Result<(), CapabilityError>;

    fn fix_included_for_file(&self, path: &Utf8Path, rules: &[String])
    -> Result<(), CapabilityError>;

    fn fix_included_for_directory(
        &self,
        path: &Utf8Path,
        rules: &[String],
        ignore_test_files: bool,
    ) -> Result<(), CapabilityError>;

    fn fix_excluded_for_file(&self, path: &Utf8Path, rules: &[String])
    -> Result<(), CapabilityError>;

    fn fix_excluded_for_directory(
        &self,
        path: &Utf8Path,
        rules: &[String],
        ignore_test_files: bool,
    ) -> Result<(), CapabilityError>;

    /// Legacy single transformation, applied to any path.
    fn fix_path(&self, path: &Utf8Path) -> Result<(), CapabilityError>;
}

/// Strips unused imports from a source file in place.
pub trait ImportCleanup {
    /// Returns whether the file was rewritten.
    fn clean(&self, path: &Utf8Path) -> Result<bool, CleanupError>;
}
