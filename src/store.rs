use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bytes::Bytes;

/// Read side of the bucket holding result files. Keys are
/// `<namespace>/<city>/<file>` paths; listing returns every key under a
/// prefix, `get` returns one whole object.
pub trait ObjectStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
    fn get(&self, key: &str) -> Result<Bytes>;
}

/// Bucket laid out on the local filesystem: keys become paths under `root`.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ObjectStore for DirStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let pattern = format!("{}/{}*", self.root.display(), prefix);
        let mut keys = Vec::new();
        for entry in
            glob::glob(&pattern).with_context(|| format!("bad listing pattern {pattern}"))?
        {
            let path = entry.context("read listing entry")?;
            if !path.is_file() {
                continue;
            }
            if let Ok(rel) = path.strip_prefix(&self.root) {
                keys.push(rel.to_string_lossy().into_owned());
            }
        }
        // Listing order decides concatenation order downstream.
        keys.sort();
        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Bytes> {
        let path = self.root.join(key);
        let raw =
            fs::read(&path).with_context(|| format!("read object {}", path.display()))?;
        Ok(Bytes::from(raw))
    }
}
