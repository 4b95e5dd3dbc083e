//! Filesystem port for writing generated output.

use std::path::Path;

/// Provides filesystem access for the generated site.
///
/// Abstracting the filesystem keeps the pipeline testable without touching
/// the real disk.
pub trait FileSystem: Send + Sync {
    /// Creates a directory and all of its missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
