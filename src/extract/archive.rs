use std::{fs::File, io::BufReader, io::Read as _, path::Path};

use anyhow::Context as _;

use crate::extract::{Extractor, LoadedPackage, PackageContents};
use crate::foundation::error::{JaoError, JaoResult};

/// Package loaded eagerly from a zip-compatible archive (`.zip` or `.jao`).
#[derive(Clone, Debug)]
pub struct ZipExtractor {
    package: LoadedPackage,
}

impl ZipExtractor {
    /// Read every entry of the archive at `path`; the root `jao.json` entry is the manifest.
    pub fn open(path: impl AsRef<Path>) -> JaoResult<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let file = File::open(path)
            .with_context(|| format!("open archive '{source}'"))
            .map_err(|e| JaoError::package_load(&source, e))?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))
            .map_err(|e| JaoError::package_load(&source, e))?;

        let mut contents = PackageContents::new(source.clone());
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| JaoError::package_load(&source, e))?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut bytes = Vec::with_capacity(capacity_hint(entry.size()));
            entry
                .read_to_end(&mut bytes)
                .with_context(|| format!("read archive entry '{name}'"))
                .map_err(|e| JaoError::package_load(&source, e))?;
            contents.insert(&name, bytes)?;
        }

        let package = contents.finish()?;
        tracing::debug!(
            source = %package.filename(),
            entries = package.entries().len(),
            "loaded archive package"
        );
        Ok(Self { package })
    }
}

/// Upper bound on the buffer preallocated from an entry's declared size.
const MAX_PREALLOC: u64 = 1 << 20;

/// Preallocation for an entry declaring `declared` bytes; `read_to_end` grows past it.
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOC)).unwrap_or(0)
}

impl Extractor for ZipExtractor {
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

#[cfg(test)]
#[path = "../../tests/unit/extract/archive.rs"]
mod tests;
