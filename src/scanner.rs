use crate::error::{Error, Result};
use crate::model::ModelFormat;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scanner for action model files.
///
/// Accepts either a single model file or a directory, which is walked recursively. `target`
/// and hidden directories are skipped. Files are returned sorted by path so that merged
/// models keep a stable action order.
///
/// # Example
///
/// ```no_run
/// use openapi_from_actions::scanner::ModelScanner;
/// use std::path::PathBuf;
///
/// let scanner = ModelScanner::new(PathBuf::from("./models"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} model files", result.model_files.len());
/// ```
pub struct ModelScanner {
    root_path: PathBuf,
}

/// Result of a scan.
pub struct ScanResult {
    /// Paths of all discovered `.json`, `.yaml` and `.yml` files, sorted
    pub model_files: Vec<PathBuf>,
    /// Entries that could not be accessed
    pub warnings: Vec<String>,
}

impl ModelScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Collect model files under the root path.
    ///
    /// # Errors
    ///
    /// Returns an error if the root path does not exist, or is a file without a model
    /// extension.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root_path.exists() {
            return Err(Error::InvalidArgument(format!(
                "Model path does not exist: {}",
                self.root_path.display()
            )));
        }

        if self.root_path.is_file() {
            return match ModelFormat::from_path(&self.root_path) {
                Some(_) => Ok(ScanResult {
                    model_files: vec![self.root_path.clone()],
                    warnings: Vec::new(),
                }),
                None => Err(Error::InvalidArgument(format!(
                    "Not a JSON or YAML model file: {}",
                    self.root_path.display()
                ))),
            };
        }

        let mut model_files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|e| e.path() == self.root_path || !Self::is_skipped(e.path()));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file() && ModelFormat::from_path(path).is_some() {
                        debug!("Found model file: {}", path.display());
                        model_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        model_files.sort();

        Ok(ScanResult {
            model_files,
            warnings,
        })
    }

    fn is_skipped(path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        file_name.starts_with('.') || file_name == "target"
    }
}
