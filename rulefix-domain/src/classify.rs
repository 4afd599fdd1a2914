//! Partitions path arguments by filesystem type.
//!
//! The probe runs once here. A path can still be removed or retyped before
//! dispatch reaches it; that window is accepted.

use crate::options::PathArguments;
use crate::ports::PathProbe;
use camino::{Utf8Path, Utf8PathBuf};
use rulefix_types::{ClassifiedPath, ClassifiedPaths, PathKind};
use tracing::debug;

/// One probed path argument. `kind` is `None` when nothing exists there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedPath {
    pub path: Utf8PathBuf,
    pub kind: Option<PathKind>,
}

/// Classification result for every path argument, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    entries: Vec<ProbedPath>,
}

impl Classification {
    pub fn entries(&self) -> &[ProbedPath] {
        &self.entries
    }

    /// Paths that did not exist when probed.
    pub fn missing(&self) -> impl Iterator<Item = &Utf8Path> {
        self.entries
            .iter()
            .filter(|e| e.kind.is_none())
            .map(|e| e.path.as_path())
    }

    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.entries
            .iter()
            .filter(|e| e.kind == Some(PathKind::File))
            .map(|e| e.path.as_path())
    }

    /// Existing paths only.
    pub fn to_classified(&self) -> ClassifiedPaths {
        ClassifiedPaths::new(self.entries.iter().filter_map(|e| {
            e.kind.map(|kind| ClassifiedPath::new(e.path.clone(), kind))
        }))
    }
}

pub fn classify(paths: &PathArguments, probe: &dyn PathProbe) -> Classification {
    let entries = paths
        .iter()
        .map(|path| {
            let kind = probe.kind(path);
            debug!(path = path.as_str(), ?kind, "classified path");
            ProbedPath {
                path: path.clone(),
                kind,
            }
        })
        .collect();
    Classification { entries }
}
