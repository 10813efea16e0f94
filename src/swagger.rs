//! Swagger 2.0 output object model.
//!
//! Serialization-only view of the generated document. `paths`, `definitions`
//! and schema `properties` use [`IndexMap`] so the JSON output preserves
//! first-seen insertion order; plain hash maps would shuffle it and break
//! diff stability. Empty members are skipped so the document stays free of
//! noise like `"host": ""` or `"required": []`.

use indexmap::IndexMap;
use serde::Serialize;

/// A security requirement entry: scheme name to scope list.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Name of the single API-key security scheme.
pub const API_KEY_SCHEME: &str = "apiKey";

/// A requirement entry for one scheme with no scopes.
pub fn security_requirement(scheme: &str) -> SecurityRequirement {
    let mut requirement = IndexMap::new();
    requirement.insert(scheme.to_string(), Vec::new());
    requirement
}

/// Complete Swagger 2.0 document.
#[derive(Debug, Clone, Serialize)]
pub struct SwaggerDocument {
    /// Always `"2.0"`
    pub swagger: String,
    pub info: SwaggerInfo,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(rename = "basePath", skip_serializing_if = "String::is_empty")]
    pub base_path: String,
    pub schemes: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    #[serde(rename = "securityDefinitions")]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    pub security: Vec<SecurityRequirement>,
    /// Path template to path item, in first-seen route order
    pub paths: IndexMap<String, PathItem>,
    /// Type name to schema, in type-table order; one entry per named type
    pub definitions: IndexMap<String, SchemaObject>,
}

/// The `info` block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SwaggerInfo {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// One entry of `securityDefinitions`.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
}

/// Up to one operation per supported HTTP method.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

/// A single API operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "operationId", skip_serializing_if = "String::is_empty")]
    pub operation_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub responses: IndexMap<String, ResponseObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// One response entry of an operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseObject {
    pub description: String,
    /// Reference to the response type, or an empty schema when the route
    /// declares none
    pub schema: SchemaObject,
}

/// One operation parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub param_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    /// Body parameters carry their type as a schema reference instead of a
    /// type/format pair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Parameter {
    /// A parameter with only name, location and requiredness set.
    pub fn new(name: impl Into<String>, location: ParameterLocation, required: bool) -> Self {
        Self {
            name: name.into(),
            location,
            required,
            param_type: String::new(),
            format: String::new(),
            schema: None,
            default: None,
            enum_values: None,
            minimum: None,
            maximum: None,
            example: None,
            description: String::new(),
        }
    }

    /// The required string path parameter for a `{name}` segment.
    pub fn path(name: impl Into<String>) -> Self {
        let mut parameter = Parameter::new(name, ParameterLocation::Path, true);
        parameter.param_type = "string".to_string();
        parameter
    }

    /// The single required body parameter referencing a definition.
    pub fn body(reference: String) -> Self {
        let mut parameter = Parameter::new("body", ParameterLocation::Body, true);
        parameter.schema = Some(SchemaObject::reference(reference));
        parameter
    }
}

/// Transport location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

/// A schema: a `$ref`, a primitive type/format pair, an array, or an object
/// with ordered properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaObject {
    #[serde(rename = "$ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaObject>>,
    /// Property names required on an object schema; never contains duplicates
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl SchemaObject {
    /// A `$ref` schema.
    pub fn reference(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            ..Default::default()
        }
    }

    /// A primitive type/format schema.
    pub fn primitive(schema_type: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            schema_type: schema_type.into(),
            format: format.into(),
            ..Default::default()
        }
    }

    /// An array schema with the given item schema.
    pub fn array(items: SchemaObject) -> Self {
        Self {
            schema_type: "array".to_string(),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// A free-form object schema.
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_location_serializes_lowercase() {
        let parameter = Parameter::path("id");
        let json = serde_json::to_value(&parameter).unwrap();

        assert_eq!(json["in"], "path");
        assert_eq!(json["type"], "string");
        assert_eq!(json["required"], true);
        // unset constraint members are dropped
        assert!(json.get("minimum").is_none());
        assert!(json.get("schema").is_none());
    }

    #[test]
    fn test_body_parameter_carries_reference() {
        let parameter = Parameter::body("#/definitions/LoginRequest".to_string());
        let json = serde_json::to_value(&parameter).unwrap();

        assert_eq!(json["in"], "body");
        assert_eq!(json["schema"]["$ref"], "#/definitions/LoginRequest");
        assert!(json.get("type").is_none());
    }

    #[test]
    fn test_empty_schema_serializes_as_empty_object() {
        let json = serde_json::to_string(&SchemaObject::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_schema_reference_only_member() {
        let schema = SchemaObject::reference("#/definitions/UserReply");
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r##"{"$ref":"#/definitions/UserReply"}"##);
    }

    #[test]
    fn test_properties_preserve_insertion_order() {
        let mut properties = IndexMap::new();
        properties.insert("zebra".to_string(), SchemaObject::primitive("string", ""));
        properties.insert("alpha".to_string(), SchemaObject::primitive("string", ""));
        let schema = SchemaObject {
            schema_type: "object".to_string(),
            properties: Some(properties),
            ..Default::default()
        };

        let json = serde_json::to_string(&schema).unwrap();
        let zebra = json.find("zebra").unwrap();
        let alpha = json.find("alpha").unwrap();
        assert!(zebra < alpha, "insertion order must survive serialization");
    }

    #[test]
    fn test_path_item_skips_missing_operations() {
        let item = PathItem {
            get: Some(Operation::default()),
            ..Default::default()
        };

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("get").is_some());
        assert!(json.get("post").is_none());
        assert!(json.get("delete").is_none());
    }
}
