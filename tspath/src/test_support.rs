//! Test-only helpers for constructing cadences and scratch directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::cadence::Cadence;

/// A concrete point cadence.
pub fn point(x: i64, y: i64) -> Cadence {
    Cadence::point([x, y])
}

pub fn left(inner: Cadence) -> Cadence {
    Cadence::leftonto(inner)
}

pub fn right(inner: Cadence) -> Cadence {
    Cadence::rightonto(inner)
}

pub fn coord(parts: Vec<Cadence>, resolution: Cadence) -> Cadence {
    Cadence::coord(parts, resolution)
}

pub fn coord_res() -> Cadence {
    Cadence::CoordRes
}

/// The two-cadence form used throughout the docs:
/// `[leftonto(<0,0>), (leftonto(coordres) & leftonto(leftonto(coordres)))(<0,0>)]`.
pub fn worked_example() -> Vec<Cadence> {
    vec![
        left(point(0, 0)),
        coord(vec![left(coord_res()), left(left(coord_res()))], point(0, 0)),
    ]
}

/// Temporary directory that is removed on drop.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` under the directory, creating parents.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, contents).expect("write file");
        path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
