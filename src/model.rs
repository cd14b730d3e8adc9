use crate::descriptor::ActionDescriptor;
use crate::error::{Error, Result};
use crate::type_resolver::TypeResolver;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A complete action model: the composite type catalog plus the ordered actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionModel {
    /// Composite type definitions referenced by the actions
    #[serde(default)]
    pub types: TypeResolver,
    /// Actions in declaration order
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
}

impl ActionModel {
    /// Append another model: catalogs are unioned, actions concatenated.
    pub fn merge(&mut self, other: ActionModel) {
        self.types.extend(other.types);
        self.actions.extend(other.actions);
    }
}

/// Encoding of a model file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Yaml,
}

impl ModelFormat {
    /// `.json` is JSON, `.yaml`/`.yml` is YAML, anything else is not a model file
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(ModelFormat::Json),
            "yaml" | "yml" => Some(ModelFormat::Yaml),
            _ => None,
        }
    }
}

/// Loader for action model files.
///
/// # Example
///
/// ```no_run
/// use openapi_from_actions::model::ModelLoader;
/// use std::path::Path;
///
/// let model = ModelLoader::load_file(Path::new("api.actions.json")).unwrap();
/// println!("Loaded {} actions", model.actions.len());
/// ```
pub struct ModelLoader;

impl ModelLoader {
    /// Read and decode a single model file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unrecognized extension or does not
    /// decode as an action model.
    pub fn load_file(path: &Path) -> Result<ActionModel> {
        debug!("Loading model file: {}", path.display());

        let format = ModelFormat::from_path(path).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "Unrecognized model file extension: {}",
                path.display()
            ))
        })?;

        let content = fs::read_to_string(path)?;
        let model = Self::parse_str(&content, format).map_err(|message| Error::ModelParse {
            file: path.to_path_buf(),
            message,
        })?;

        debug!(
            "Loaded {} actions and {} composite types from {}",
            model.actions.len(),
            model.types.len(),
            path.display()
        );
        Ok(model)
    }

    /// Decode a model from text
    pub fn parse_str(content: &str, format: ModelFormat) -> std::result::Result<ActionModel, String> {
        match format {
            ModelFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ModelFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Load several model files and merge them in the given order.
    ///
    /// Files that fail to load are skipped with a warning; an error is returned only if
    /// none of them could be loaded.
    pub fn load_files(paths: &[PathBuf]) -> Result<ActionModel> {
        let mut merged = ActionModel::default();
        let mut loaded = 0;
        let mut last_error = None;

        for path in paths {
            match Self::load_file(path) {
                Ok(model) => {
                    merged.merge(model);
                    loaded += 1;
                }
                Err(e) => {
                    warn!("Skipping model file: {}", e);
                    last_error = Some(e);
                }
            }
        }

        match (loaded, last_error) {
            (0, Some(e)) => Err(e),
            (0, None) => Err(Error::NoModelFiles),
            _ => Ok(merged),
        }
    }
}
