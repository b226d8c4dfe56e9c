//! File import.
//!
//! Reading the file is the only await point; validation and application run
//! synchronously afterwards through [`Playground::import_str`].

use std::path::Path;

use super::{ApplySummary, Playground};
use crate::error::ImportError;

/// Reads an import file.
pub async fn read_import_file(path: &Path) -> Result<String, ImportError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })
}

impl Playground {
    /// Reads, validates and applies a config file.
    ///
    /// Nothing is applied unless the whole document is valid. Dropping the
    /// future before it completes leaves the playground untouched.
    pub async fn import_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<ApplySummary, ImportError> {
        let path = path.as_ref();
        let contents = read_import_file(path).await.inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "import read failed");
        })?;
        self.import_str(&contents).map_err(ImportError::Invalid)
    }
}
