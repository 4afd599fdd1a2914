use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Filesystem type of an existing path argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPath {
    pub path: Utf8PathBuf,
    pub kind: PathKind,
}

impl ClassifiedPath {
    pub fn new(path: impl Into<Utf8PathBuf>, kind: PathKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Path arguments partitioned into files and directories.
///
/// Entries keep the order in which the paths were given. A path appears at
/// most once, so the file and directory views never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ClassifiedPath>", into = "Vec<ClassifiedPath>")]
pub struct ClassifiedPaths {
    entries: Vec<ClassifiedPath>,
}

impl ClassifiedPaths {
    pub fn new(entries: impl IntoIterator<Item = ClassifiedPath>) -> Self {
        let mut seen: HashSet<Utf8PathBuf> = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.path.clone()))
            .collect();
        Self { entries }
    }

    /// All entries in input order.
    pub fn entries(&self) -> &[ClassifiedPath] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.of_kind(PathKind::File)
    }

    pub fn directories(&self) -> impl Iterator<Item = &Utf8Path> {
        self.of_kind(PathKind::Directory)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn of_kind(&self, kind: PathKind) -> impl Iterator<Item = &Utf8Path> {
        self.entries
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.path.as_path())
    }
}

impl From<Vec<ClassifiedPath>> for ClassifiedPaths {
    fn from(entries: Vec<ClassifiedPath>) -> Self {
        Self::new(entries)
    }
}

impl From<ClassifiedPaths> for Vec<ClassifiedPath> {
    fn from(paths: ClassifiedPaths) -> Self {
        paths.entries
    }
}
