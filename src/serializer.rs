//! Text encoding of generated documents.
//!
//! The document types derive serde with OpenAPI 3.0 field names, so encoding is delegated
//! to `serde_json` and `serde_yaml`.

use crate::error::Result;
use crate::openapi_builder::OpenApiDocument;
use anyhow::Context;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an OpenAPI document to pretty-printed JSON.
///
/// # Example
///
/// ```
/// use openapi_from_actions::model::ActionModel;
/// use openapi_from_actions::openapi_builder::{build_document, Info};
/// use openapi_from_actions::serializer::serialize_json;
///
/// let doc = build_document(&ActionModel::default(), Info::default());
/// let json = serialize_json(&doc).unwrap();
/// assert!(json.contains("\"openapi\""));
/// ```
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Serializes an OpenAPI document to YAML.
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    Ok(serde_yaml::to_string(doc)?)
}

/// Writes string content to a file, creating parent directories as needed.
pub fn write_to_file(content: &str, path: &Path) -> anyhow::Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ActionDescriptor, HttpMethod, ParameterDescriptor, TypeDescriptor};
    use crate::model::ActionModel;
    use crate::openapi_builder::{build_document, Info};
    use tempfile::TempDir;

    fn sample_document() -> OpenApiDocument {
        let model = ActionModel {
            types: Default::default(),
            actions: vec![ActionDescriptor::new("Items", "Get")
                .with_route("items/{id}")
                .with_methods(vec![HttpMethod::Get])
                .with_parameter(ParameterDescriptor::new("id", TypeDescriptor::string()))
                .returning(TypeDescriptor::string())],
        };
        build_document(
            &model,
            Info {
                title: "Test API".to_string(),
                version: "2.0".to_string(),
            },
        )
    }

    #[test]
    fn test_serialize_json() {
        let json = serialize_json(&sample_document()).unwrap();

        assert!(json.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["openapi"], "3.0.1");
        assert_eq!(parsed["info"]["title"], "Test API");
        assert_eq!(parsed["info"]["version"], "2.0");
        assert_eq!(parsed["paths"]["items/{id}"]["get"]["operationId"], "Items_Get");
        assert!(parsed["components"]["schemas"].is_object());
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&sample_document()).unwrap();

        assert!(yaml.contains("openapi:"));
        assert!(yaml.contains("3.0.1"));
        assert!(yaml.contains("title: Test API"));
        assert!(yaml.contains("items/{id}"));
        assert!(yaml.contains("operationId: Items_Get"));
    }

    #[test]
    fn test_json_round_trip_preserves_document() {
        let doc = sample_document();
        let json = serialize_json(&doc).unwrap();
        let decoded: OpenApiDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out").join("nested").join("openapi.json");

        write_to_file("{}", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}");
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("openapi.json");

        write_to_file("initial", &file_path).unwrap();
        write_to_file("replaced", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "replaced");
    }
}
