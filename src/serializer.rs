//! Serialization module for writing the generated document to JSON or YAML.

use crate::swagger::SwaggerDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a Swagger document to pretty-printed JSON.
///
/// JSON is the primary output format; the indentation keeps the document
/// reviewable and diff-friendly under version control.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(document: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to JSON");
    serde_json::to_string_pretty(document).context("Failed to serialize Swagger document to JSON")
}

/// Serializes a Swagger document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(document: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to YAML");
    serde_yaml::to_string(document).context("Failed to serialize Swagger document to YAML")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be created or
/// written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!(
        "Successfully wrote {} bytes to {}",
        content.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SwaggerBuilder;
    use crate::ir::ApiDescription;
    use tempfile::TempDir;

    fn document() -> SwaggerDocument {
        let description: ApiDescription =
            serde_json::from_str(r#"{"service": {"name": "demo", "groups": []}}"#).unwrap();
        SwaggerBuilder::new(&description).build()
    }

    #[test]
    fn test_serialize_json_structure() {
        let json = serialize_json(&document()).unwrap();

        assert!(json.contains("\"swagger\": \"2.0\""));
        assert!(json.contains("\"securityDefinitions\""));
        assert!(json.contains("\"paths\""));
        // empty host must not appear
        assert!(!json.contains("\"host\""));
    }

    #[test]
    fn test_serialize_yaml_structure() {
        let yaml = serialize_yaml(&document()).unwrap();

        assert!(yaml.contains("swagger: '2.0'") || yaml.contains("swagger: \"2.0\""));
        assert!(yaml.contains("securityDefinitions:"));
    }

    #[test]
    fn test_write_to_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/swagger.json");

        write_to_file("{}", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
