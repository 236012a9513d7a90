//! Lesson catalogs.
//!
//! A catalog groups lesson pages into titled sections:
//!
//! ```json
//! { "title": "2 vs 1",
//!   "sections": [ { "title": "Basics",
//!                   "lessons": [ { "title": "Opposition", "file": "lessons/2v1/opposition.html" } ] } ] }
//! ```
//!
//! Lesson pages themselves are opaque to the server.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub lessons: Vec<LessonRef>,
}

/// One lesson page: its display title and its path under the lessons
/// directory, which the server exposes at `/lessons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRef {
    pub title: String,
    pub file: String,
}

impl Catalog {
    pub fn lesson_count(&self) -> usize {
        self.sections.iter().map(|s| s.lessons.len()).sum()
    }
}

/// Parse a single catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, LessonError> {
    let text = std::fs::read_to_string(path).map_err(|source| LessonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LessonError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every `*.json` catalog in `dir`, ordered by file name.
///
/// A missing or unreadable directory and any malformed catalog are errors.
/// Other files are skipped.
pub fn load_catalogs(dir: &Path) -> Result<Vec<Catalog>, LessonError> {
    let io_err = |source| LessonError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-catalog entry");
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            load_catalog(path).inspect_err(|err| warn!(error = %err, "failed to load catalog"))
        })
        .collect()
}
