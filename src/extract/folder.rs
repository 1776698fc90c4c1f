use std::path::Path;

use anyhow::Context as _;

use crate::extract::{Extractor, LoadedPackage, PackageContents};
use crate::foundation::error::{JaoError, JaoResult};

/// Package loaded eagerly from a directory tree.
#[derive(Clone, Debug)]
pub struct FolderExtractor {
    package: LoadedPackage,
}

impl FolderExtractor {
    /// Load every file under `root`; `root/jao.json` is the manifest.
    pub fn open(root: impl AsRef<Path>) -> JaoResult<Self> {
        let root = root.as_ref();
        let source = root.display().to_string();
        if !root.exists() {
            return Err(JaoError::package_load(
                &source,
                anyhow::anyhow!("folder provided does not exist"),
            ));
        }
        if !root.is_dir() {
            return Err(JaoError::package_load(
                &source,
                anyhow::anyhow!("path provided is not a folder"),
            ));
        }

        let mut contents = PackageContents::new(source.clone());
        for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| JaoError::package_load(&source, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| JaoError::package_load(&source, e))?;
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let bytes = std::fs::read(entry.path())
                .with_context(|| format!("read package file '{}'", entry.path().display()))
                .map_err(|e| JaoError::package_load(&source, e))?;
            contents.insert(&rel, bytes)?;
        }

        let package = contents.finish()?;
        tracing::debug!(
            source = %package.filename(),
            entries = package.entries().len(),
            "loaded folder package"
        );
        Ok(Self { package })
    }
}

impl Extractor for FolderExtractor {
    fn json(&self) -> &str {
        self.package.json()
    }

    fn data(&self, path: &str) -> JaoResult<&[u8]> {
        self.package.data(path)
    }

    fn filename(&self) -> &str {
        self.package.filename()
    }

    fn entries(&self) -> Vec<&str> {
        self.package.entries()
    }
}
