//! Package extraction: turns a folder tree or zip-compatible archive into a manifest string
//! plus opaque byte blobs addressable by relative path.

pub(crate) mod archive;
pub(crate) mod folder;

use std::{collections::BTreeMap, fmt, path::Path, sync::Arc};

use crate::foundation::error::{JaoError, JaoResult};

pub use archive::ZipExtractor;
pub use folder::FolderExtractor;

/// File name of the package manifest at the package root.
pub const MANIFEST_NAME: &str = "jao.json";

/// Read-only view over a loaded package.
pub trait Extractor: Send + Sync + fmt::Debug {
    /// Manifest JSON text.
    fn json(&self) -> &str;

    /// Bytes of a non-manifest entry, keyed by `/`-separated relative path.
    fn data(&self, path: &str) -> JaoResult<&[u8]>;

    /// Identifier of the package source (usually its path).
    fn filename(&self) -> &str;

    /// All data entry paths in sorted order.
    fn entries(&self) -> Vec<&str>;
}

/// In-memory package contents shared by the concrete extractors.
#[derive(Clone, Debug, Default)]
pub(crate) struct PackageContents {
    pub(crate) source: String,
    pub(crate) json: Option<String>,
    pub(crate) data: BTreeMap<String, Vec<u8>>,
}

impl PackageContents {
    pub(crate) fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Route an entry to the manifest slot or the data table.
    pub(crate) fn insert(&mut self, rel_path: &str, bytes: Vec<u8>) -> JaoResult<()> {
        let Some(key) = normalize_entry_path(rel_path) else {
            return Ok(());
        };
        if key == MANIFEST_NAME {
            let json = String::from_utf8(bytes)
                .map_err(|e| JaoError::package_load(&self.source, e))?;
            self.json = Some(json);
        } else {
            self.data.insert(key, bytes);
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> JaoResult<LoadedPackage> {
        let Some(json) = self.json else {
            return Err(JaoError::package_load(
                &self.source,
                anyhow::anyhow!("no file named {MANIFEST_NAME} has been found"),
            ));
        };
        Ok(LoadedPackage {
            source: self.source,
            json,
            data: self.data,
        })
    }
}

/// Validated package contents (manifest present).
#[derive(Clone, Debug)]
pub(crate) struct LoadedPackage {
    source: String,
    json: String,
    data: BTreeMap<String, Vec<u8>>,
}

impl LoadedPackage {
    pub(crate) fn json(&self) -> &str {
        &self.json
    }

    pub(crate) fn data(&self, path: &str) -> JaoResult<&[u8]> {
        normalize_entry_path(path)
            .and_then(|key| self.data.get(&key))
            .map(Vec::as_slice)
            .ok_or_else(|| JaoError::ContentNotFound(path.to_string()))
    }

    pub(crate) fn filename(&self) -> &str {
        &self.source
    }

    pub(crate) fn entries(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }
}

/// Normalize a package-relative path to `a/b/c` form.
///
/// Backslashes become slashes, empty and `.` segments are dropped. Returns `None` for paths
/// that name nothing or try to escape the package root.
pub fn normalize_entry_path(path: &str) -> Option<String> {
    let s = path.replace('\\', "/");
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return None;
        }
        out.push(part);
    }
    if out.is_empty() {
        return None;
    }
    Some(out.join("/"))
}

/// Open a package by path: directories load as folders, `.zip` / `.jao` files as archives.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_package(path: impl AsRef<Path>) -> JaoResult<Arc<dyn Extractor>> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(Arc::new(FolderExtractor::open(path)?));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("zip") | Some("jao") => Ok(Arc::new(ZipExtractor::open(path)?)),
        _ => Err(JaoError::UnknownFormat(path.display().to_string())),
    }
}

#[cfg(test)]
#[path = "../tests/unit/extract.rs"]
mod tests;
