//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tempfile::TempDir;

/// A throwaway source tree the scenarios run the binary in.
#[derive(Debug)]
pub struct SourceTree {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl SourceTree {
    pub fn new() -> anyhow::Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|p| anyhow::anyhow!("non-UTF-8 tempdir {}", p.display()))?;
        Ok(Self { _temp: temp, root })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn add_dir(&self, rel: &str) -> anyhow::Result<()> {
        fs::create_dir_all(self.root.join(rel))?;
        Ok(())
    }

    pub fn add_file(&self, rel: &str, contents: &str) -> anyhow::Result<()> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(())
    }

    pub fn read(&self, rel: &str) -> anyhow::Result<String> {
        Ok(fs::read_to_string(self.root.join(rel))?)
    }
}
